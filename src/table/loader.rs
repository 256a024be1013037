use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{FootprintError, Result};
use crate::models::EmissionRecord;
use crate::table::EmissionTable;

/// Which columns of the source file hold the fields we need.
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub name_column: String,
    pub factor_column: String,
    /// Optional in the file; ignored when absent.
    pub category_column: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            name_column: "Food product".to_string(),
            factor_column: "Total_emissions".to_string(),
            category_column: "Category".to_string(),
        }
    }
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name.trim()))
}

/// Load emission factors from a CSV file.
///
/// Columns other than the configured ones (land use, water use...) are
/// ignored. Duplicate food names keep the last row.
pub fn load_table<P: AsRef<Path>>(path: P, config: &TableConfig) -> Result<EmissionTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| FootprintError::data_load(path, e))?;
    let table = read_table(file, path, config)?;
    info!("Loaded {} emission records from {}", table.len(), path.display());
    Ok(table)
}

/// Parse emission records from any CSV reader. `origin` is only used in
/// error messages.
pub fn read_table<R: std::io::Read>(
    reader: R,
    origin: &Path,
    config: &TableConfig,
) -> Result<EmissionTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| FootprintError::data_load(origin, e))?
        .clone();

    let name_idx = find_column(&headers, &config.name_column).ok_or_else(|| {
        FootprintError::data_load(origin, format!("missing column '{}'", config.name_column))
    })?;
    let factor_idx = find_column(&headers, &config.factor_column).ok_or_else(|| {
        FootprintError::data_load(
            origin,
            format!("missing footprint column '{}'", config.factor_column),
        )
    })?;
    let category_idx = find_column(&headers, &config.category_column);
    debug!(name_idx, factor_idx, ?category_idx, "Resolved emission table columns");

    // Deduplicate by normalized name, keeping last occurrence
    let mut seen: HashMap<String, EmissionRecord> = HashMap::new();

    for (row, result) in rdr.records().enumerate() {
        // Header is line 1
        let line = row + 2;
        let record = result.map_err(|e| FootprintError::data_load(origin, e))?;

        let name = record.get(name_idx).unwrap_or("");
        if name.is_empty() {
            warn!(line, "Skipping row without a food name");
            continue;
        }

        let raw_factor = record.get(factor_idx).unwrap_or("");
        let factor: f64 = raw_factor.parse().map_err(|_| {
            FootprintError::data_load(
                origin,
                format!("line {}: invalid factor '{}' for {}", line, raw_factor, name),
            )
        })?;
        if !factor.is_finite() || factor < 0.0 {
            return Err(FootprintError::data_load(
                origin,
                format!("line {}: factor for {} must be non-negative, got {}", line, name, factor),
            ));
        }

        let mut emission = EmissionRecord::new(name, factor);
        if let Some(category) = category_idx
            .and_then(|idx| record.get(idx))
            .filter(|c| !c.is_empty())
        {
            emission = emission.with_category(category);
        }

        if let Some(previous) = seen.insert(emission.key(), emission) {
            warn!(line, food = %previous.food_name, "Duplicate food name, keeping the later row");
        }
    }

    if seen.is_empty() {
        return Err(FootprintError::data_load(origin, "no usable rows"));
    }

    Ok(EmissionTable::from_records(seen.into_values().collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
Food product,Land use change,Farm,Transport,Total_emissions,Land use per kg
Eggs,0.7,2.2,0.1,4.5,5.7
Pig Meat,1.5,1.7,0.3,12.3,17.4
Milk,0.5,1.5,0.1,3.2,8.9
";

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_ignores_extra_columns() {
        let file = write_temp(SAMPLE);
        let table = load_table(file.path(), &TableConfig::default()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.factor("eggs").unwrap(), 4.5);
        assert_eq!(table.factor("pig meat").unwrap(), 12.3);
        assert!(table.lookup("milk").unwrap().category.is_none());
    }

    #[test]
    fn test_missing_file_is_data_load_error() {
        let err = load_table("does/not/exist.csv", &TableConfig::default()).unwrap_err();
        assert!(matches!(err, FootprintError::DataLoad { .. }));
    }

    #[test]
    fn test_missing_factor_column() {
        let file = write_temp("Food product,Farm\nEggs,2.2\n");
        let err = load_table(file.path(), &TableConfig::default()).unwrap_err();
        match err {
            FootprintError::DataLoad { reason, .. } => assert!(reason.contains("Total_emissions")),
            other => panic!("expected DataLoad, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_factor() {
        let file = write_temp("Food product,Total_emissions\nEggs,lots\n");
        let err = load_table(file.path(), &TableConfig::default()).unwrap_err();
        assert!(matches!(err, FootprintError::DataLoad { .. }));
    }

    #[test]
    fn test_negative_factor_rejected() {
        let file = write_temp("Food product,Total_emissions\nEggs,-1.0\n");
        assert!(load_table(file.path(), &TableConfig::default()).is_err());
    }

    #[test]
    fn test_empty_table_rejected() {
        let file = write_temp("Food product,Total_emissions\n");
        assert!(load_table(file.path(), &TableConfig::default()).is_err());
    }

    #[test]
    fn test_categories_and_custom_columns() {
        let csv = "item,kg_co2e,Group\nBeef,99.5,Meat\nTofu,3.0,Plant protein\nPeas,0.9,\n";
        let config = TableConfig {
            name_column: "Item".to_string(),
            factor_column: "KG_CO2E".to_string(),
            category_column: "group".to_string(),
        };
        let table = read_table(csv.as_bytes(), Path::new("inline"), &config).unwrap();

        assert_eq!(table.lookup("beef").unwrap().category.as_deref(), Some("Meat"));
        assert!(table.lookup("peas").unwrap().category.is_none());
    }

    #[test]
    fn test_blank_names_skipped_and_duplicates_deduped() {
        let csv = "Food product,Total_emissions\n,5.0\nMilk,3.2\nmilk,2.8\n";
        let table = read_table(csv.as_bytes(), Path::new("inline"), &TableConfig::default()).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.factor("Milk").unwrap(), 2.8);
    }
}
