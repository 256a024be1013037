use dialoguer::{Confirm, Input, Select};

use crate::error::{FootprintError, Result};
use crate::models::MealItem;
use crate::report::render::format_food_list;
use crate::table::EmissionTable;

/// Maximum number of "did you mean" hints shown for an unknown food.
const MAX_HINTS: usize = 5;

/// Call `read` until it succeeds.
///
/// Recoverable errors (unknown food, bad quantity, bad input) are shown
/// and `read` is called again; anything else is returned.
pub fn retry_until_valid<T, F>(mut read: F) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    loop {
        match read() {
            Ok(value) => return Ok(value),
            Err(e) if e.is_recoverable() => println!("{}", e),
            Err(e) => return Err(e),
        }
    }
}

/// Parse a strictly positive number of kilograms.
pub fn parse_quantity(food: &str, input: &str) -> Result<f64> {
    let quantity: f64 = input.trim().parse().map_err(|_| {
        FootprintError::InvalidInput("Please enter a valid quantity (e.g., 0.5)".to_string())
    })?;

    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(FootprintError::InvalidQuantity {
            food: food.to_string(),
            quantity,
        });
    }
    Ok(quantity)
}

/// Parse a strictly positive item count.
pub fn parse_count(input: &str) -> Result<usize> {
    match input.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        Ok(_) => Err(FootprintError::InvalidInput(
            "Please enter a positive number".to_string(),
        )),
        Err(_) => Err(FootprintError::InvalidInput(
            "Please enter a valid number".to_string(),
        )),
    }
}

/// Resolve a typed food name against the table, or explain what is close.
pub fn resolve_food(table: &EmissionTable, input: &str) -> Result<String> {
    match table.lookup(input) {
        Ok(record) => Ok(record.food_name.clone()),
        Err(e) => {
            let hints = table.similar_names(input, MAX_HINTS);
            if !hints.is_empty() {
                println!("Item '{}' not found. Did you mean one of these?", input.trim());
                for hint in hints {
                    println!("  - {}", hint);
                }
            }
            Err(e)
        }
    }
}

/// Prompt for a non-empty meal name.
pub fn prompt_meal_name() -> Result<String> {
    retry_until_valid(|| {
        let input: String = Input::new()
            .with_prompt("Please enter the meal name (e.g., Breakfast/Lunch/Dinner)")
            .interact_text()?;
        let name = input.trim();
        if name.is_empty() {
            return Err(FootprintError::InvalidInput(
                "Meal name must not be empty".to_string(),
            ));
        }
        Ok(name.to_string())
    })
}

fn prompt_item(table: &EmissionTable, index: usize) -> Result<MealItem> {
    println!();
    println!("Item {}:", index + 1);

    let food = retry_until_valid(|| {
        let input: String = Input::new().with_prompt("Food item").interact_text()?;
        resolve_food(table, &input)
    })?;

    let quantity = retry_until_valid(|| {
        let input: String = Input::new().with_prompt("Quantity (kg)").interact_text()?;
        parse_quantity(&food, &input)
    })?;

    Ok(MealItem::new(food, quantity))
}

/// Interactively collect a meal name and its items.
pub fn prompt_meal(table: &EmissionTable) -> Result<(String, Vec<MealItem>)> {
    println!();
    println!("=== Carbon Footprint Meal Calculator ===");
    println!();

    let meal_name = prompt_meal_name()?;

    println!();
    println!("Available food items:");
    print!("{}", format_food_list(&table.sorted_by_factor(), 3));

    let count = retry_until_valid(|| {
        let input: String = Input::new()
            .with_prompt("How many food items will you eat?")
            .interact_text()?;
        parse_count(&input)
    })?;

    println!();
    println!("Enter food items one by one:");

    let items = (0..count)
        .map(|i| prompt_item(table, i))
        .collect::<Result<Vec<_>>>()?;

    Ok((meal_name, items))
}

/// Actions offered by the comparison menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddMeal,
    Compare,
    Visualize,
    Breakdown,
    Save,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::AddMeal,
        MenuChoice::Compare,
        MenuChoice::Visualize,
        MenuChoice::Breakdown,
        MenuChoice::Save,
        MenuChoice::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::AddMeal => "Add a meal",
            MenuChoice::Compare => "Compare meals",
            MenuChoice::Visualize => "Visualize meal comparison",
            MenuChoice::Breakdown => "Show detailed breakdown",
            MenuChoice::Save => "Save comparison",
            MenuChoice::Exit => "Exit",
        }
    }
}

/// Show the comparison menu and return the chosen action.
pub fn prompt_menu() -> Result<MenuChoice> {
    let labels: Vec<&str> = MenuChoice::ALL.iter().map(|c| c.label()).collect();
    let selection = Select::new()
        .with_prompt("Meal Carbon Footprint Comparison Tool")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(MenuChoice::ALL
        .get(selection)
        .copied()
        .unwrap_or(MenuChoice::Exit))
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
