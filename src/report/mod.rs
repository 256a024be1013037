pub mod charts;
pub mod export;
pub mod prompts;
pub mod render;

pub use charts::{
    StackedRow, breakdown_chart, food_comparison_chart, meal_comparison_chart,
    stacked_comparison_chart, stacked_rows,
};
pub use export::{ExportRow, export, export_meal, meal_rows};
pub use prompts::{
    MenuChoice, parse_count, parse_quantity, prompt_meal, prompt_meal_name, prompt_menu,
    prompt_yes_no, resolve_food, retry_until_valid,
};
pub use render::{
    format_comparison, format_food_list, format_meal_details, format_result, format_suggestions,
};
