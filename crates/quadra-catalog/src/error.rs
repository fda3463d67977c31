//! Errors raised while computing catalogue entries.

use quadra_calc::IntegrationError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error(transparent)]
    Integration(#[from] IntegrationError),

    #[error("no integral with index {index}, the catalogue has {count} entries")]
    UnknownIntegral { index: usize, count: usize },

    #[error("goal of {0} bits is too large for domain truncation")]
    GoalTooLarge(u32),
}
