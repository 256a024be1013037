pub mod calculator;
mod suggestions;

pub use calculator::{FootprintCalculator, contribution, reduction_percent};
