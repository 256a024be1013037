use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::compare::ComparisonSession;
use crate::error::{FootprintError, Result};
use crate::models::Meal;

/// Label used in the item column of a meal's total row.
pub const TOTAL_LABEL: &str = "TOTAL";

/// CSV header, in `ExportRow` field order.
pub const CSV_HEADER: [&str; 6] = [
    "meal",
    "food",
    "quantity_kg",
    "factor_kg_co2e_per_kg",
    "contribution_kg_co2e",
    "percent_of_meal",
];

/// One exported line: an item row or a meal's total row.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRow {
    pub meal: String,
    pub food: String,
    pub quantity_kg: f64,
    pub factor_kg_co2e_per_kg: Option<f64>,
    pub contribution_kg_co2e: f64,
    pub percent_of_meal: f64,
}

#[derive(Serialize)]
struct JsonMeal<'a> {
    name: &'a str,
    total_kg_co2e: f64,
    item_count: usize,
    items_label: String,
    items: Vec<ExportRow>,
}

/// Item rows followed by one total row.
pub fn meal_rows(meal: &Meal) -> Vec<ExportRow> {
    let footprint = &meal.footprint;
    let mut rows: Vec<ExportRow> = footprint
        .breakdown
        .iter()
        .map(|item| ExportRow {
            meal: meal.name.clone(),
            food: item.food_name.clone(),
            quantity_kg: item.quantity_kg,
            factor_kg_co2e_per_kg: Some(item.factor),
            contribution_kg_co2e: item.contribution,
            percent_of_meal: footprint.share(item),
        })
        .collect();

    rows.push(ExportRow {
        meal: meal.name.clone(),
        food: TOTAL_LABEL.to_string(),
        quantity_kg: meal.items.iter().map(|i| i.quantity_kg).sum(),
        factor_kg_co2e_per_kg: None,
        contribution_kg_co2e: footprint.total,
        percent_of_meal: if footprint.total > 0.0 { 100.0 } else { 0.0 },
    });
    rows
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

fn write_csv(meals: &[&Meal], path: &Path) -> Result<()> {
    // Header is written by hand so an empty export still has one
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| FootprintError::export(path, e))?;
    wtr.write_record(CSV_HEADER)
        .map_err(|e| FootprintError::export(path, e))?;

    for meal in meals {
        for row in meal_rows(meal) {
            wtr.serialize(&row).map_err(|e| FootprintError::export(path, e))?;
        }
    }

    wtr.flush().map_err(|e| FootprintError::export(path, e))?;
    Ok(())
}

fn write_json(meals: &[&Meal], path: &Path) -> Result<()> {
    let doc: Vec<JsonMeal> = meals
        .iter()
        .map(|meal| {
            let mut items = meal_rows(meal);
            items.pop();
            JsonMeal {
                name: &meal.name,
                total_kg_co2e: meal.total(),
                item_count: meal.items.len(),
                items_label: meal.items_label(),
                items,
            }
        })
        .collect();

    let json = serde_json::to_string_pretty(&doc).map_err(|e| FootprintError::export(path, e))?;
    let mut file = File::create(path).map_err(|e| FootprintError::export(path, e))?;
    file.write_all(json.as_bytes())
        .map_err(|e| FootprintError::export(path, e))?;
    Ok(())
}

fn write_meals(meals: &[&Meal], path: &Path) -> Result<()> {
    if is_json(path) {
        write_json(meals, path)?;
    } else {
        write_csv(meals, path)?;
    }
    info!("Exported {} meal(s) to {}", meals.len(), path.display());
    Ok(())
}

/// Write every meal of the session, in insertion order.
///
/// `.json` paths get a JSON document; anything else gets CSV.
pub fn export<P: AsRef<Path>>(session: &ComparisonSession, path: P) -> Result<()> {
    let meals: Vec<&Meal> = session.meals().iter().collect();
    write_meals(&meals, path.as_ref())
}

/// Write a single meal.
pub fn export_meal<P: AsRef<Path>>(meal: &Meal, path: P) -> Result<()> {
    write_meals(&[meal], path.as_ref())
}
