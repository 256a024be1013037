use std::fmt::Write;

use crate::compare::ComparisonSession;
use crate::error::Result;
use crate::footprint::{FootprintCalculator, reduction_percent};
use crate::models::{EmissionRecord, Footprint, ItemContribution};

const RULE_WIDTH: usize = 80;

/// Render `rows` as a grid table under `headers`.
fn grid(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let border: String = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");
    let border = format!("+{}+\n", border);

    let line = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!(" {:<width$} ", c, width = *w))
            .collect();
        format!("|{}|\n", padded.join("|"))
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut out = String::new();
    out.push_str(&border);
    out.push_str(&line(&header_cells));
    out.push_str(&border.replace('-', "="));
    for row in rows {
        out.push_str(&line(row));
        out.push_str(&border);
    }
    out
}

fn breakdown_row(footprint: &Footprint, item: &ItemContribution) -> Vec<String> {
    vec![
        item.food_name.clone(),
        format!("{:.2} kg", item.quantity_kg),
        format!("{:.2} kg CO2e/kg", item.factor),
        format!("{:.2} kg CO2e", item.contribution),
        format!("{:.1}%", footprint.share(item)),
    ]
}

/// Result table for one meal: total plus a row per item.
pub fn format_result(meal_name: &str, footprint: &Footprint) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Results ===");
    let _ = writeln!(out);
    let _ = writeln!(out, "Meal: {}", meal_name);
    let _ = writeln!(
        out,
        "Total Carbon Footprint: {:.2} kg CO2 equivalents",
        footprint.total
    );
    let _ = writeln!(out);

    if footprint.is_empty() {
        let _ = writeln!(out, "(no items)");
        return out;
    }

    let rows: Vec<Vec<String>> = footprint
        .breakdown
        .iter()
        .map(|item| breakdown_row(footprint, item))
        .collect();
    out.push_str(&grid(
        &["Food Item", "Quantity", "CO2/kg", "Total CO2", "% of Meal"],
        &rows,
    ));
    out
}

/// Lower-emission alternatives for `item`, with the saving per kg.
pub fn format_suggestions(item: &ItemContribution, alternatives: &[&EmissionRecord]) -> String {
    if alternatives.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "To reduce your carbon footprint, consider these alternatives to {}:",
        item.food_name
    );
    for alt in alternatives {
        let _ = writeln!(
            out,
            "  - {}: {:.2} kg CO2e/kg ({:.1}% less impact)",
            alt.food_name,
            alt.factor,
            reduction_percent(item.factor, alt.factor)
        );
    }
    out
}

/// Result table plus alternatives for the meal's biggest contributor.
pub fn format_meal_details(
    calculator: &FootprintCalculator,
    meal_name: &str,
    footprint: &Footprint,
    max_suggestions: usize,
) -> Result<String> {
    let mut out = format_result(meal_name, footprint);

    if let Some(highest) = footprint.highest_contributor() {
        let alternatives = calculator.suggest_alternatives(&highest.food_name, max_suggestions)?;
        let text = format_suggestions(highest, &alternatives);
        if !text.is_empty() {
            out.push('\n');
            out.push_str(&text);
        }
    }
    Ok(out)
}

/// Ranked comparison of every meal in the session.
pub fn format_comparison(session: &ComparisonSession) -> String {
    let Some(summary) = session.summary() else {
        return "No meals to compare. Please add meals first.\n".to_string();
    };

    let mut out = String::new();
    let _ = writeln!(out, "=== Meal Comparison ===");
    let _ = writeln!(out);
    let _ = writeln!(out, "{:<20} {:<25} Items", "Meal", "Carbon Footprint (kg CO2)");
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

    for meal in session.ranked_meals() {
        let _ = writeln!(
            out,
            "{:<20} {:<25.2} {}",
            meal.name,
            meal.total(),
            meal.items_label()
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "The meal with the lowest carbon footprint is: {}", summary.lowest);
    let _ = writeln!(out, "The meal with the highest carbon footprint is: {}", summary.highest);

    if session.len() > 1 {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Switching from {} to {} would reduce your carbon footprint",
            summary.highest, summary.lowest
        );
        let _ = writeln!(
            out,
            "by {:.2} kg CO2 ({:.1}% reduction).",
            summary.difference(),
            summary.reduction_percent()
        );
    }
    out
}

/// Available foods laid out in `columns` columns.
pub fn format_food_list(records: &[&EmissionRecord], columns: usize) -> String {
    let columns = columns.max(1);
    let mut out = String::new();
    for chunk in records.chunks(columns) {
        let line: Vec<String> = chunk
            .iter()
            .map(|r| format!("{:<30}", r.food_name))
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }
    out
}
