use clap::Parser;

use meal_footprint_rs::cli::CalculatorCli;
use meal_footprint_rs::error::Result;
use meal_footprint_rs::footprint::FootprintCalculator;
use meal_footprint_rs::models::Meal;
use meal_footprint_rs::report::{
    breakdown_chart, export_meal, food_comparison_chart, format_meal_details, prompt_meal,
};
use meal_footprint_rs::table::load_table;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CalculatorCli::parse();
    cli.data.init_logging();

    let table = load_table(&cli.data.data, &cli.data.table_config())?;
    println!("Data loaded successfully from {}", cli.data.data.display());

    if cli.data.visualize_only {
        println!();
        print!("{}", food_comparison_chart(&table));
        return Ok(());
    }

    let calculator = FootprintCalculator::new(&table);
    let (name, items) = prompt_meal(&table)?;
    let footprint = calculator.compute(&items)?;

    println!();
    print!(
        "{}",
        format_meal_details(&calculator, &name, &footprint, cli.suggestions)?
    );

    if !footprint.is_empty() {
        println!();
        print!("{}", breakdown_chart(&name, &footprint));
    }

    let meal = Meal {
        name,
        items,
        footprint,
    };
    export_meal(&meal, &cli.output)?;
    println!();
    println!("Results saved to {}", cli.output.display());

    println!();
    println!("Thank you for using the Carbon Footprint Calculator!");
    Ok(())
}
