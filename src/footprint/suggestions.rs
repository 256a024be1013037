use crate::error::Result;
use crate::footprint::FootprintCalculator;
use crate::models::EmissionRecord;

impl<'a> FootprintCalculator<'a> {
    /// Up to `max` foods with a strictly lower factor than `food_name`.
    ///
    /// When the food has a category and that category holds lower-factor
    /// foods, only those are offered; otherwise any lower-factor food is.
    /// Results are ascending by factor, ties by name.
    pub fn suggest_alternatives(&self, food_name: &str, max: usize) -> Result<Vec<&'a EmissionRecord>> {
        let table = self.table();
        let target = table.lookup(food_name)?;

        // sorted_by_factor is already ascending with name tie-break
        let lower: Vec<&'a EmissionRecord> = table
            .sorted_by_factor()
            .into_iter()
            .filter(|r| r.factor < target.factor)
            .collect();

        let same_category: Vec<&'a EmissionRecord> = lower
            .iter()
            .copied()
            .filter(|r| r.same_category(target))
            .collect();

        let pool = if same_category.is_empty() {
            lower
        } else {
            same_category
        };

        Ok(pool.into_iter().take(max).collect())
    }
}
