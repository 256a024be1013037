use clap::Parser;

use meal_footprint_rs::cli::CompareCli;
use meal_footprint_rs::compare::ComparisonSession;
use meal_footprint_rs::error::Result;
use meal_footprint_rs::footprint::FootprintCalculator;
use meal_footprint_rs::report::{
    MenuChoice, breakdown_chart, export, food_comparison_chart, format_comparison,
    format_meal_details, meal_comparison_chart, prompt_meal, prompt_menu, prompt_yes_no,
    stacked_comparison_chart,
};
use meal_footprint_rs::table::load_table;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CompareCli::parse();
    cli.data.init_logging();

    let table = load_table(&cli.data.data, &cli.data.table_config())?;
    println!("Data loaded successfully from {}", cli.data.data.display());

    if cli.data.visualize_only {
        println!();
        print!("{}", food_comparison_chart(&table));
        return Ok(());
    }

    let mut session = ComparisonSession::new(FootprintCalculator::new(&table));

    loop {
        println!();
        match prompt_menu()? {
            MenuChoice::AddMeal => add_meal(&mut session)?,
            MenuChoice::Compare => print!("{}", format_comparison(&session)),
            MenuChoice::Visualize => visualize(&session),
            MenuChoice::Breakdown => {
                for meal in session.meals() {
                    println!();
                    print!(
                        "{}",
                        format_meal_details(
                            session.calculator(),
                            &meal.name,
                            &meal.footprint,
                            cli.suggestions
                        )?
                    );
                }
            }
            MenuChoice::Save => save(&session, &cli.output),
            MenuChoice::Exit => {
                println!();
                println!("Thank you for using the Meal Carbon Footprint Comparison Tool!");
                return Ok(());
            }
        }
    }
}

/// Prompt for a meal and store it, asking before replacing a duplicate.
fn add_meal(session: &mut ComparisonSession) -> Result<()> {
    let (name, items) = prompt_meal(session.calculator().table())?;

    let result = if session.get(&name).is_some() {
        let replace = prompt_yes_no(
            &format!("A meal named '{}' already exists. Replace it?", name),
            false,
        )?;
        if !replace {
            println!("Kept the existing meal '{}'.", name);
            return Ok(());
        }
        session.replace_meal(&name, items)
    } else {
        session.add_meal(&name, items)
    };

    match result {
        Ok(meal) => println!(
            "Added meal: {} with carbon footprint {:.2} kg CO2",
            meal.name,
            meal.total()
        ),
        Err(e) if e.is_recoverable() => println!("{}", e),
        Err(e) => return Err(e),
    }
    Ok(())
}

fn visualize(session: &ComparisonSession) {
    if session.is_empty() {
        println!("No meals to compare. Please add meals first.");
        return;
    }

    print!("{}", meal_comparison_chart(session));
    if session.len() >= 2 {
        println!();
        print!("{}", stacked_comparison_chart(session));
    }
    for meal in session.ranked_meals() {
        println!();
        print!("{}", breakdown_chart(&meal.name, &meal.footprint));
    }
}

/// Export failures are reported; the session is kept.
fn save(session: &ComparisonSession, path: &std::path::Path) {
    if session.is_empty() {
        println!("No meals to save. Please add meals first.");
        return;
    }

    match export(session, path) {
        Ok(()) => println!("Comparison saved to {}", path.display()),
        Err(e) => eprintln!("Error: {}", e),
    }
}
