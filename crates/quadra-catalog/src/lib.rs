//! # quadra-catalog
//!
//! Example integrals for the Quadra quadrature engine, and holomorphic
//! extensions of the piecewise real functions they use.
//!
//! - [`holomorphic`]: `abs`, `floor`, `sqrt`, `log` and `lambertw` that
//!   answer analyticity probes with an indeterminate ball near their
//!   non-analytic locus
//! - [`catalog`]: indexed integrals with descriptions, computed under
//!   shared [`Settings`]

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod error;
pub mod holomorphic;

pub use catalog::{entries, lookup, tolerance_for, Entry, Settings, MAX_TRUNCATION_GOAL};
pub use error::CatalogError;
