mod emission_table;
mod loader;

pub use emission_table::EmissionTable;
pub use loader::{TableConfig, load_table, read_table};
