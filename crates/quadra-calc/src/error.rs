//! Error types for integration calls.

use thiserror::Error;

use crate::integrand::ContractViolation;

/// Errors that abort an integration call.
///
/// Numerical difficulties never appear here: they degrade the enclosure and
/// are reported through [`crate::Status`]. Only invalid input and integrand
/// contract violations stop a computation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IntegrationError {
    #[error(transparent)]
    ContractViolation(#[from] ContractViolation),

    #[error("segment endpoints must be finite and distinct, got {a} and {b}")]
    InvalidSegment { a: String, b: String },

    #[error("absolute tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),

    #[error("contour needs at least two distinct consecutive vertices")]
    InvalidContour,
}
