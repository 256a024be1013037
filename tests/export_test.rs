use std::fs;
use std::io::Write;

use tempfile::{NamedTempFile, tempdir};

use meal_footprint_rs::compare::ComparisonSession;
use meal_footprint_rs::error::FootprintError;
use meal_footprint_rs::footprint::FootprintCalculator;
use meal_footprint_rs::models::MealItem;
use meal_footprint_rs::report::{export, export_meal};
use meal_footprint_rs::table::{TableConfig, load_table};

const FOOD_CSV: &str = "\
Food product,Land use change,Animal Feed,Farm,Processing,Transport,Packging,Retail,Total_emissions
Eggs,0.7,2.2,1.3,0,0.1,0.2,0,4.5
Pig Meat,1.5,3.8,1.7,0.3,0.3,0.3,0.2,12.3
Milk,0.5,0.2,1.5,0.1,0.1,0.1,0.3,3.2
Oatmeal,0,0,0.9,0,0.1,0.1,0,1.1
";

fn write_foods() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(FOOD_CSV.as_bytes()).unwrap();
    file
}

#[test]
fn test_csv_export_rows_and_totals() {
    let foods = write_foods();
    let table = load_table(foods.path(), &TableConfig::default()).unwrap();
    let mut session = ComparisonSession::new(FootprintCalculator::new(&table));
    session
        .add_meal(
            "Breakfast",
            vec![MealItem::new("eggs", 0.1), MealItem::new("milk", 0.2)],
        )
        .unwrap();
    session.add_meal("Porridge", vec![MealItem::new("oatmeal", 1.0)]).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("comparison.csv");
    export(&session, &path).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(&headers[0], "meal");
    assert_eq!(&headers[1], "food");
    assert_eq!(&headers[4], "contribution_kg_co2e");

    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 5);
    assert_eq!(&rows[0][1], "Eggs");
    assert_eq!(&rows[2][1], "TOTAL");
    assert_eq!(&rows[2][3], "");
    assert_eq!(&rows[4][0], "Porridge");

    let total: f64 = rows[2][4].parse().unwrap();
    assert!((total - 1.09).abs() < 1e-9);
}

#[test]
fn test_json_export_single_meal() {
    let foods = write_foods();
    let table = load_table(foods.path(), &TableConfig::default()).unwrap();
    let mut session = ComparisonSession::new(FootprintCalculator::new(&table));
    let meal = session
        .add_meal("Dinner", vec![MealItem::new("Pig Meat", 0.1)])
        .unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("dinner.json");
    export_meal(meal, &path).unwrap();

    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(doc[0]["name"], "Dinner");
    assert_eq!(doc[0]["items"].as_array().unwrap().len(), 1);
    let total = doc[0]["total_kg_co2e"].as_f64().unwrap();
    assert!((total - 1.23).abs() < 1e-9);
    assert_eq!(doc[0]["item_count"], 1);
    assert_eq!(doc[0]["items_label"], "Pig Meat (0.1kg)");
}

#[test]
fn test_empty_csv_export_has_header() {
    let foods = write_foods();
    let table = load_table(foods.path(), &TableConfig::default()).unwrap();
    let session = ComparisonSession::new(FootprintCalculator::new(&table));

    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    export(&session, &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content.lines().collect::<Vec<_>>(),
        vec!["meal,food,quantity_kg,factor_kg_co2e_per_kg,contribution_kg_co2e,percent_of_meal"]
    );
}

#[test]
fn test_export_failure_keeps_session() {
    let foods = write_foods();
    let table = load_table(foods.path(), &TableConfig::default()).unwrap();
    let mut session = ComparisonSession::new(FootprintCalculator::new(&table));
    session.add_meal("Lunch", vec![MealItem::new("milk", 0.3)]).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("out.csv");
    let err = export(&session, &path).unwrap_err();

    assert!(matches!(err, FootprintError::Export { .. }));
    assert_eq!(session.len(), 1);
    assert!(session.get("Lunch").is_some());
}
