//! Horizontal text bar charts.

use std::fmt::Write;

use crate::compare::ComparisonSession;
use crate::models::Footprint;
use crate::table::EmissionTable;

/// Width of the longest bar, in characters.
pub const BAR_WIDTH: usize = 50;

const BAR_CHAR: char = '#';

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    // Anything non-zero stays visible
    BAR_CHAR.to_string().repeat(len.max(1))
}

fn bar_chart(title: &str, rows: &[(String, f64)], decimals: usize, suffix: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out);

    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let max = rows.iter().map(|(_, v)| *v).fold(0.0, f64::max);

    for (label, value) in rows {
        let _ = writeln!(
            out,
            "{:<lw$} | {} {:.prec$}{}",
            label,
            bar(*value, max),
            value,
            suffix,
            lw = label_width,
            prec = decimals
        );
    }
    out
}

/// Baseline chart: every food's emission factor, lowest first.
pub fn food_comparison_chart(table: &EmissionTable) -> String {
    let rows: Vec<(String, f64)> = table
        .sorted_by_factor()
        .into_iter()
        .map(|r| (r.food_name.clone(), r.factor))
        .collect();
    bar_chart(
        "Carbon Footprint by Food Item (kg CO2 per kg of food)",
        &rows,
        1,
        "",
    )
}

/// Meal totals, lowest first.
pub fn meal_comparison_chart(session: &ComparisonSession) -> String {
    let rows: Vec<(String, f64)> = session
        .rank()
        .into_iter()
        .map(|(name, total)| (name.to_string(), total))
        .collect();
    bar_chart("Comparison of Meal Carbon Footprints (kg CO2e)", &rows, 2, "")
}

/// Per-food markers of the stacked chart, cycled when foods outnumber them.
const SEGMENT_MARKERS: [char; 10] = ['#', '=', '*', '+', 'o', '%', '@', '~', 'x', '&'];

/// One meal of the stacked comparison: its foods and their summed
/// contributions, in legend order.
#[derive(Debug, Clone)]
pub struct StackedRow {
    pub meal: String,
    pub total: f64,
    pub segments: Vec<(String, f64)>,
}

/// Every food across all meals, alphabetically; this is the legend order.
fn legend_foods(session: &ComparisonSession) -> Vec<String> {
    let mut foods: Vec<String> = session
        .meals()
        .iter()
        .flat_map(|m| m.footprint.breakdown.iter().map(|c| c.food_name.clone()))
        .collect();
    foods.sort();
    foods.dedup();
    foods
}

/// Stacked rows, highest total first; equal totals keep insertion order.
///
/// A food entered twice in one meal is one segment.
pub fn stacked_rows(session: &ComparisonSession) -> Vec<StackedRow> {
    let foods = legend_foods(session);

    let mut meals: Vec<_> = session.meals().iter().collect();
    // sort_by is stable
    meals.sort_by(|a, b| b.total().total_cmp(&a.total()));

    meals
        .into_iter()
        .map(|meal| {
            let segments = foods
                .iter()
                .filter_map(|food| {
                    let items: Vec<f64> = meal
                        .footprint
                        .breakdown
                        .iter()
                        .filter(|c| &c.food_name == food)
                        .map(|c| c.contribution)
                        .collect();
                    (!items.is_empty()).then(|| (food.clone(), items.iter().sum::<f64>()))
                })
                .collect();
            StackedRow {
                meal: meal.name.clone(),
                total: meal.total(),
                segments,
            }
        })
        .collect()
}

/// One bar per meal split into its foods, highest meal first.
///
/// Segment ends are rounded on the running sum so a bar's length matches
/// its total.
pub fn stacked_comparison_chart(session: &ComparisonSession) -> String {
    if session.len() < 2 {
        return "Need at least two meals to create a stacked comparison.\n".to_string();
    }

    let foods = legend_foods(session);
    let marker = |food: &str| -> char {
        let idx = foods.iter().position(|f| f == food).unwrap_or(0);
        SEGMENT_MARKERS[idx % SEGMENT_MARKERS.len()]
    };

    let rows = stacked_rows(session);
    let max = rows.iter().map(|r| r.total).fold(0.0, f64::max);
    let label_width = rows.iter().map(|r| r.meal.chars().count()).max().unwrap_or(0);
    let scale = |value: f64| -> usize {
        if max > 0.0 {
            ((value / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        }
    };

    let mut out = String::new();
    let _ = writeln!(out, "Breakdown of Carbon Footprint by Food Item (kg CO2e)");
    let _ = writeln!(out);

    for row in &rows {
        let mut bar = String::new();
        let mut running = 0.0;
        for (food, value) in &row.segments {
            let start = scale(running);
            running += value;
            let end = scale(running);
            bar.extend(std::iter::repeat_n(marker(food), end.saturating_sub(start)));
        }
        let _ = writeln!(
            out,
            "{:<lw$} | {} {:.2}",
            row.meal,
            bar,
            row.total,
            lw = label_width
        );
    }

    let _ = writeln!(out);
    let legend: Vec<String> = foods
        .iter()
        .map(|f| format!("{} {}", marker(f), f))
        .collect();
    let _ = writeln!(out, "Legend: {}", legend.join(", "));
    out
}

/// Share of each item in one meal's total.
pub fn breakdown_chart(meal_name: &str, footprint: &Footprint) -> String {
    let rows: Vec<(String, f64)> = footprint
        .breakdown
        .iter()
        .map(|item| (item.food_name.clone(), footprint.share(item)))
        .collect();
    let title = format!(
        "Carbon Footprint Breakdown: {} (Total: {:.2} kg CO2)",
        meal_name, footprint.total
    );
    bar_chart(&title, &rows, 1, "%")
}
