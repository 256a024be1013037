use tracing::debug;

use crate::error::{FootprintError, Result};
use crate::models::{Footprint, ItemContribution, MealItem};
use crate::table::EmissionTable;

/// Contribution of `quantity_kg` of a food with the given factor.
#[inline]
pub fn contribution(quantity_kg: f64, factor: f64) -> f64 {
    quantity_kg * factor
}

/// Percentage saved by switching from one emission factor to another.
pub fn reduction_percent(from_factor: f64, to_factor: f64) -> f64 {
    if from_factor > 0.0 {
        (from_factor - to_factor) / from_factor * 100.0
    } else {
        0.0
    }
}

/// Computes meal footprints against a borrowed emission table.
#[derive(Debug, Clone, Copy)]
pub struct FootprintCalculator<'a> {
    table: &'a EmissionTable,
}

impl<'a> FootprintCalculator<'a> {
    pub fn new(table: &'a EmissionTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a EmissionTable {
        self.table
    }

    /// Resolve a single item into its contribution.
    pub fn contribution_of(&self, item: &MealItem) -> Result<ItemContribution> {
        let record = self.table.lookup(&item.food_name)?;

        if !item.quantity_kg.is_finite() || item.quantity_kg <= 0.0 {
            return Err(FootprintError::InvalidQuantity {
                food: record.food_name.clone(),
                quantity: item.quantity_kg,
            });
        }

        Ok(ItemContribution {
            food_name: record.food_name.clone(),
            quantity_kg: item.quantity_kg,
            factor: record.factor,
            contribution: contribution(item.quantity_kg, record.factor),
        })
    }

    /// Compute the total footprint and per-item breakdown.
    ///
    /// The breakdown keeps the input order; the same food entered twice
    /// stays as two rows. Fails on the first unresolvable item.
    pub fn compute(&self, items: &[MealItem]) -> Result<Footprint> {
        let breakdown = items
            .iter()
            .map(|item| self.contribution_of(item))
            .collect::<Result<Vec<_>>>()?;

        let footprint = Footprint::from_breakdown(breakdown);
        debug!(
            items = footprint.breakdown.len(),
            total = footprint.total,
            "Computed meal footprint"
        );
        Ok(footprint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmissionRecord;

    fn sample_table() -> EmissionTable {
        EmissionTable::from_records(vec![
            EmissionRecord::new("eggs", 4.5),
            EmissionRecord::new("pig meat", 12.3),
            EmissionRecord::new("milk", 3.2),
        ])
    }

    #[test]
    fn test_contribution_is_quantity_times_factor() {
        let table = sample_table();
        let calc = FootprintCalculator::new(&table);
        let c = calc.contribution_of(&MealItem::new("Eggs", 0.25)).unwrap();

        assert_eq!(c.food_name, "eggs");
        assert!((c.contribution - 0.25 * 4.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let table = sample_table();
        let calc = FootprintCalculator::new(&table);

        for quantity in [0.0, -0.5, f64::NAN] {
            let err = calc.compute(&[MealItem::new("milk", quantity)]).unwrap_err();
            assert!(matches!(err, FootprintError::InvalidQuantity { .. }));
        }
    }

    #[test]
    fn test_unknown_food_checked_before_quantity() {
        let table = sample_table();
        let calc = FootprintCalculator::new(&table);
        let err = calc.compute(&[MealItem::new("tofu", 0.0)]).unwrap_err();
        assert!(matches!(err, FootprintError::UnknownFood(_)));
    }

    #[test]
    fn test_repeated_food_kept_separate() {
        let table = sample_table();
        let calc = FootprintCalculator::new(&table);
        let fp = calc
            .compute(&[MealItem::new("milk", 0.1), MealItem::new("milk", 0.2)])
            .unwrap();

        assert_eq!(fp.breakdown.len(), 2);
        assert!((fp.total - 0.3 * 3.2).abs() < 1e-9);
    }

    #[test]
    fn test_empty_meal_has_zero_total() {
        let table = sample_table();
        let fp = FootprintCalculator::new(&table).compute(&[]).unwrap();
        assert_eq!(fp.total, 0.0);
        assert!(fp.is_empty());
    }

    #[test]
    fn test_reduction_percent() {
        assert!((reduction_percent(10.0, 2.5) - 75.0).abs() < 1e-9);
        assert_eq!(reduction_percent(0.0, 0.0), 0.0);
    }
}
