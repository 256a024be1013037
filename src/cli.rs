use std::path::PathBuf;

use clap::{Args, Parser};
use tracing_subscriber::EnvFilter;

use crate::table::TableConfig;

/// Options shared by both binaries.
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Path to the food production CSV file.
    #[arg(long, default_value = "data/Food_Production.csv")]
    pub data: PathBuf,

    /// Only print the food comparison chart, without prompting.
    #[arg(long)]
    pub visualize_only: bool,

    /// Column holding the food name.
    #[arg(long, default_value = "Food product")]
    pub name_column: String,

    /// Column holding the total emissions per kg.
    #[arg(long, default_value = "Total_emissions")]
    pub factor_column: String,

    /// Optional column holding the food category.
    #[arg(long, default_value = "Category")]
    pub category_column: String,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl DataArgs {
    pub fn table_config(&self) -> TableConfig {
        TableConfig {
            name_column: self.name_column.clone(),
            factor_column: self.factor_column.clone(),
            category_column: self.category_column.clone(),
        }
    }

    /// Install the log subscriber on stderr.
    ///
    /// `--verbose` forces debug; otherwise `RUST_LOG` applies, defaulting to warn.
    pub fn init_logging(&self) {
        let filter = if self.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        };

        // Ignore the error if a subscriber is already installed
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Calculate the carbon footprint of a meal.
#[derive(Parser, Debug)]
#[command(name = "footprint")]
#[command(author, version, about, long_about = None)]
pub struct CalculatorCli {
    #[command(flatten)]
    pub data: DataArgs,

    /// Where to write the meal results (.csv or .json).
    #[arg(short, long, default_value = "Meal_Carbon_Footprint.csv")]
    pub output: PathBuf,

    /// Number of lower-emission alternatives to suggest.
    #[arg(long, default_value = "3")]
    pub suggestions: usize,
}

/// Compare the carbon footprints of different meals.
#[derive(Parser, Debug)]
#[command(name = "compare")]
#[command(author, version, about, long_about = None)]
pub struct CompareCli {
    #[command(flatten)]
    pub data: DataArgs,

    /// Where to save the comparison (.csv or .json).
    #[arg(short, long, default_value = "Meal_Comparison.csv")]
    pub output: PathBuf,

    /// Number of lower-emission alternatives to suggest per meal.
    #[arg(long, default_value = "3")]
    pub suggestions: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculator_defaults() {
        let cli = CalculatorCli::parse_from(["footprint"]);
        assert_eq!(cli.data.data, PathBuf::from("data/Food_Production.csv"));
        assert!(!cli.data.visualize_only);
        assert_eq!(cli.output, PathBuf::from("Meal_Carbon_Footprint.csv"));
        assert_eq!(cli.suggestions, 3);
    }

    #[test]
    fn test_compare_flags() {
        let cli = CompareCli::parse_from([
            "compare",
            "--data",
            "foods.csv",
            "--visualize-only",
            "--factor-column",
            "kg_co2e",
            "-o",
            "out.json",
        ]);
        assert_eq!(cli.data.data, PathBuf::from("foods.csv"));
        assert!(cli.data.visualize_only);
        assert_eq!(cli.data.table_config().factor_column, "kg_co2e");
        assert_eq!(cli.data.table_config().name_column, "Food product");
        assert_eq!(cli.output, PathBuf::from("out.json"));
        assert_eq!(cli.suggestions, 3);
    }
}
