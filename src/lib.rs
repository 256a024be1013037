pub mod cli;
pub mod compare;
pub mod error;
pub mod footprint;
pub mod models;
pub mod report;
pub mod table;

pub use compare::ComparisonSession;
pub use error::{FootprintError, Result};
pub use footprint::FootprintCalculator;
pub use models::{EmissionRecord, Footprint, ItemContribution, Meal, MealItem};
pub use table::{EmissionTable, TableConfig, load_table};
