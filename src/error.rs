use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FootprintError {
    #[error("Failed to load emission data from {}: {reason}", .path.display())]
    DataLoad { path: PathBuf, reason: String },

    #[error("Food not found: {0}")]
    UnknownFood(String),

    #[error("Invalid quantity for {food}: {quantity} (must be greater than zero)")]
    InvalidQuantity { food: String, quantity: f64 },

    #[error("A meal named '{0}' already exists")]
    DuplicateMeal(String),

    #[error("Meal not found: {0}")]
    UnknownMeal(String),

    #[error("Failed to export results to {}: {reason}", .path.display())]
    Export { path: PathBuf, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl FootprintError {
    /// Errors that interactive entry handles by asking again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FootprintError::UnknownFood(_)
                | FootprintError::InvalidQuantity { .. }
                | FootprintError::DuplicateMeal(_)
                | FootprintError::InvalidInput(_)
        )
    }

    pub(crate) fn data_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        FootprintError::DataLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn export(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        FootprintError::Export {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FootprintError>;
