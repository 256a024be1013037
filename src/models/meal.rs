/// One ingredient of a meal, as entered by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct MealItem {
    pub food_name: String,
    pub quantity_kg: f64,
}

impl MealItem {
    pub fn new(food_name: impl Into<String>, quantity_kg: f64) -> Self {
        Self {
            food_name: food_name.into(),
            quantity_kg,
        }
    }
}

/// Footprint of a single meal item.
#[derive(Debug, Clone)]
pub struct ItemContribution {
    /// Food name as spelled in the emission table.
    pub food_name: String,

    pub quantity_kg: f64,

    /// Emission factor (kg CO2e per kg).
    pub factor: f64,

    /// `quantity_kg * factor` (kg CO2e).
    pub contribution: f64,
}

/// Total footprint plus the per-item breakdown, in input order.
#[derive(Debug, Clone, Default)]
pub struct Footprint {
    pub total: f64,
    pub breakdown: Vec<ItemContribution>,
}

impl Footprint {
    /// Build from contributions; the total is their plain sum.
    pub fn from_breakdown(breakdown: Vec<ItemContribution>) -> Self {
        let total = breakdown.iter().map(|c| c.contribution).sum();
        Self { total, breakdown }
    }

    /// Percentage of the meal total coming from `item`.
    pub fn share(&self, item: &ItemContribution) -> f64 {
        if self.total > 0.0 {
            item.contribution / self.total * 100.0
        } else {
            0.0
        }
    }

    /// The item with the largest contribution (first one on ties).
    pub fn highest_contributor(&self) -> Option<&ItemContribution> {
        self.breakdown.iter().fold(None, |best, item| match best {
            Some(b) if b.contribution >= item.contribution => Some(b),
            _ => Some(item),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.breakdown.is_empty()
    }
}

/// A named meal with its computed footprint.
#[derive(Debug, Clone)]
pub struct Meal {
    pub name: String,
    pub items: Vec<MealItem>,
    pub footprint: Footprint,
}

impl Meal {
    pub fn total(&self) -> f64 {
        self.footprint.total
    }

    /// Items rendered as `food (0.1kg), ...` for summary tables.
    pub fn items_label(&self) -> String {
        self.items
            .iter()
            .map(|i| format!("{} ({}kg)", i.food_name, i.quantity_kg))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
