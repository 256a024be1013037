use tracing::info;

use crate::error::{FootprintError, Result};
use crate::footprint::FootprintCalculator;
use crate::models::{ItemContribution, Meal, MealItem, normalize_name};

/// Lowest vs highest meal of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSummary {
    pub lowest: String,
    pub lowest_total: f64,
    pub highest: String,
    pub highest_total: f64,
}

impl ComparisonSummary {
    /// kg CO2e saved by switching from the highest to the lowest meal.
    pub fn difference(&self) -> f64 {
        self.highest_total - self.lowest_total
    }

    /// Saving as a percentage of the highest meal.
    pub fn reduction_percent(&self) -> f64 {
        if self.highest_total > 0.0 {
            self.difference() / self.highest_total * 100.0
        } else {
            0.0
        }
    }
}

/// Named meals kept in insertion order.
///
/// Names are unique (case-insensitive). `add_meal` rejects a duplicate;
/// `replace_meal` overwrites it in place.
pub struct ComparisonSession<'a> {
    calculator: FootprintCalculator<'a>,
    meals: Vec<Meal>,
}

impl<'a> ComparisonSession<'a> {
    pub fn new(calculator: FootprintCalculator<'a>) -> Self {
        Self {
            calculator,
            meals: Vec::new(),
        }
    }

    pub fn calculator(&self) -> &FootprintCalculator<'a> {
        &self.calculator
    }

    fn position(&self, name: &str) -> Option<usize> {
        let key = normalize_name(name);
        self.meals.iter().position(|m| normalize_name(&m.name) == key)
    }

    fn build_meal(&self, name: &str, items: Vec<MealItem>) -> Result<Meal> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FootprintError::InvalidInput(
                "Meal name must not be empty".to_string(),
            ));
        }
        let footprint = self.calculator.compute(&items)?;
        Ok(Meal {
            name: name.to_string(),
            items,
            footprint,
        })
    }

    /// Compute and store a new meal.
    ///
    /// On any error the session is left unchanged.
    pub fn add_meal(&mut self, name: &str, items: Vec<MealItem>) -> Result<&Meal> {
        if self.position(name).is_some() {
            return Err(FootprintError::DuplicateMeal(name.trim().to_string()));
        }
        let meal = self.build_meal(name, items)?;
        info!("Added meal: {} with carbon footprint {:.2} kg CO2e", meal.name, meal.total());
        self.meals.push(meal);
        Ok(&self.meals[self.meals.len() - 1])
    }

    /// Store a meal, overwriting an existing one with the same name.
    ///
    /// A replaced meal keeps its original insertion slot.
    pub fn replace_meal(&mut self, name: &str, items: Vec<MealItem>) -> Result<&Meal> {
        let meal = self.build_meal(name, items)?;
        let idx = match self.position(name) {
            Some(idx) => {
                info!("Replaced meal: {} with carbon footprint {:.2} kg CO2e", meal.name, meal.total());
                self.meals[idx] = meal;
                idx
            }
            None => {
                info!("Added meal: {} with carbon footprint {:.2} kg CO2e", meal.name, meal.total());
                self.meals.push(meal);
                self.meals.len() - 1
            }
        };
        Ok(&self.meals[idx])
    }

    pub fn get(&self, name: &str) -> Option<&Meal> {
        self.position(name).map(|idx| &self.meals[idx])
    }

    /// Meals in insertion order.
    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    /// Meals ascending by total footprint; equal totals keep insertion order.
    pub fn ranked_meals(&self) -> Vec<&Meal> {
        let mut ranked: Vec<&Meal> = self.meals.iter().collect();
        // sort_by is stable
        ranked.sort_by(|a, b| a.total().total_cmp(&b.total()));
        ranked
    }

    /// `(name, total)` pairs ascending by total footprint.
    pub fn rank(&self) -> Vec<(&str, f64)> {
        self.ranked_meals()
            .into_iter()
            .map(|m| (m.name.as_str(), m.total()))
            .collect()
    }

    /// The `k` largest contributions of a meal, ties broken by food name.
    pub fn top_contributors(&self, meal_name: &str, k: usize) -> Result<Vec<&ItemContribution>> {
        let meal = self
            .get(meal_name)
            .ok_or_else(|| FootprintError::UnknownMeal(meal_name.trim().to_string()))?;

        let mut items: Vec<&ItemContribution> = meal.footprint.breakdown.iter().collect();
        items.sort_by(|a, b| {
            b.contribution
                .total_cmp(&a.contribution)
                .then_with(|| a.food_name.cmp(&b.food_name))
        });
        items.truncate(k);
        Ok(items)
    }

    /// Lowest and highest meals, or `None` for an empty session.
    pub fn summary(&self) -> Option<ComparisonSummary> {
        let ranked = self.ranked_meals();
        let lowest = ranked.first()?;
        let highest = ranked.last()?;
        Some(ComparisonSummary {
            lowest: lowest.name.clone(),
            lowest_total: lowest.total(),
            highest: highest.name.clone(),
            highest_total: highest.total(),
        })
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }
}
