/// A food product and its emission factor.
///
/// The factor is kg CO2-equivalent per kg of product, summed across the
/// whole production chain. It is never negative.
#[derive(Debug, Clone)]
pub struct EmissionRecord {
    pub food_name: String,
    pub factor: f64,
    pub category: Option<String>,
}

impl EmissionRecord {
    pub fn new(food_name: impl Into<String>, factor: f64) -> Self {
        Self {
            food_name: food_name.into(),
            factor,
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Canonical key for lookups (trimmed, lowercase name).
    pub fn key(&self) -> String {
        normalize_name(&self.food_name)
    }

    /// Whether both records share a category (case-insensitive).
    pub fn same_category(&self, other: &EmissionRecord) -> bool {
        match (&self.category, &other.category) {
            (Some(a), Some(b)) => a.trim().eq_ignore_ascii_case(b.trim()),
            _ => false,
        }
    }
}

/// Normalize a food name the way the emission table keys it.
pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

impl PartialEq for EmissionRecord {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}
