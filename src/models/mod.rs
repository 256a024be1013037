mod emission;
mod meal;

pub use emission::EmissionRecord;
pub use meal::{Footprint, ItemContribution, Meal, MealItem};

pub(crate) use emission::normalize_name;
