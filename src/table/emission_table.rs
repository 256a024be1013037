use std::collections::HashMap;

use strsim::jaro_winkler;

use crate::error::{FootprintError, Result};
use crate::models::{EmissionRecord, normalize_name};

/// Minimum Jaro-Winkler similarity for a name hint.
const SIMILARITY_THRESHOLD: f64 = 0.7;

/// Read-only emission factors, keyed by normalized food name.
///
/// Lookups are case-insensitive exact matches on the trimmed name.
#[derive(Debug, Clone, Default)]
pub struct EmissionTable {
    records: HashMap<String, EmissionRecord>,
}

impl EmissionTable {
    /// Build a table from records. Later duplicates replace earlier ones.
    pub fn from_records(records: Vec<EmissionRecord>) -> Self {
        let mut map = HashMap::new();
        for record in records {
            map.insert(record.key(), record);
        }
        Self { records: map }
    }

    /// Get a record by food name (case-insensitive).
    pub fn lookup(&self, food_name: &str) -> Result<&EmissionRecord> {
        self.records
            .get(&normalize_name(food_name))
            .ok_or_else(|| FootprintError::UnknownFood(food_name.trim().to_string()))
    }

    /// Emission factor for a food name.
    pub fn factor(&self, food_name: &str) -> Result<f64> {
        self.lookup(food_name).map(|r| r.factor)
    }

    /// All records ascending by factor, ties broken by name.
    pub fn sorted_by_factor(&self) -> Vec<&EmissionRecord> {
        let mut records: Vec<&EmissionRecord> = self.records.values().collect();
        records.sort_by(|a, b| a.factor.total_cmp(&b.factor).then_with(|| a.key().cmp(&b.key())));
        records
    }

    pub fn records(&self) -> impl Iterator<Item = &EmissionRecord> {
        self.records.values()
    }

    /// Names resembling `query`, for "did you mean" hints.
    ///
    /// Substring matches come first (alphabetical), then close spellings
    /// by descending similarity. This never resolves a lookup.
    pub fn similar_names(&self, query: &str, limit: usize) -> Vec<&str> {
        let query = normalize_name(query);
        if query.is_empty() {
            return Vec::new();
        }

        let mut substring: Vec<&EmissionRecord> = self
            .records
            .iter()
            .filter(|(key, _)| key.contains(&query))
            .map(|(_, r)| r)
            .collect();
        substring.sort_by_key(|r| r.key());

        let mut fuzzy: Vec<(&EmissionRecord, f64)> = self
            .records
            .iter()
            .filter(|(key, _)| !key.contains(&query))
            .map(|(key, r)| (r, jaro_winkler(key, &query)))
            .filter(|(_, score)| *score > SIMILARITY_THRESHOLD)
            .collect();
        fuzzy.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.key().cmp(&b.0.key())));

        substring
            .into_iter()
            .chain(fuzzy.into_iter().map(|(r, _)| r))
            .take(limit)
            .map(|r| r.food_name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> EmissionTable {
        EmissionTable::from_records(vec![
            EmissionRecord::new("Eggs", 4.5),
            EmissionRecord::new("Pig Meat", 12.3),
            EmissionRecord::new("Milk", 3.2),
            EmissionRecord::new("Soymilk", 1.0),
            EmissionRecord::new("Oatmeal", 1.6),
        ])
    }

    #[test]
    fn test_lookup_case_insensitive() {
        let table = sample_table();
        assert!(table.lookup("eggs").is_ok());
        assert!(table.lookup("EGGS").is_ok());
        assert!(table.lookup("  pig meat ").is_ok());
        assert_eq!(table.factor("milk").unwrap(), 3.2);
    }

    #[test]
    fn test_lookup_unknown_is_error_not_zero() {
        let table = sample_table();
        match table.factor("tofu") {
            Err(FootprintError::UnknownFood(name)) => assert_eq!(name, "tofu"),
            other => panic!("expected UnknownFood, got {:?}", other),
        }
    }

    #[test]
    fn test_no_partial_matching_in_lookup() {
        let table = sample_table();
        assert!(table.lookup("pig").is_err());
        assert!(table.lookup("egg").is_err());
    }

    #[test]
    fn test_sorted_by_factor() {
        let table = sample_table();
        let names: Vec<&str> = table
            .sorted_by_factor()
            .iter()
            .map(|r| r.food_name.as_str())
            .collect();
        assert_eq!(names, vec!["Soymilk", "Oatmeal", "Milk", "Eggs", "Pig Meat"]);
    }

    #[test]
    fn test_duplicate_records_last_wins() {
        let table = EmissionTable::from_records(vec![
            EmissionRecord::new("Milk", 3.2),
            EmissionRecord::new("milk", 2.8),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.factor("Milk").unwrap(), 2.8);
    }

    #[test]
    fn test_similar_names() {
        let table = sample_table();
        assert_eq!(table.similar_names("milk", 5), vec!["Milk", "Soymilk"]);
        assert_eq!(table.similar_names("eggz", 5), vec!["Eggs"]);
        assert!(table.similar_names("", 5).is_empty());
        assert_eq!(table.similar_names("milk", 1).len(), 1);
    }
}
