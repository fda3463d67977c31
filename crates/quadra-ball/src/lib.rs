//! # quadra-ball
//!
//! Rigorous ball arithmetic on `f64` midpoints for the Quadra quadrature
//! engine.
//!
//! This crate provides:
//! - Real balls (`Arb`) and complex rectangular balls (`Acb`)
//! - Elementary functions with guaranteed enclosures
//! - The Riemann zeta function and the principal Lambert W branch
//! - The [`Enclosure`] trait shared by both ball types
//!
//! ## Precision
//!
//! Midpoints are IEEE doubles, so requested working precisions above 53 bits
//! are clamped by callers. Radii are upper bounds maintained with directed
//! rounding; an overflowing or undefined result becomes the indeterminate
//! ball, which contains every value.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod acb;
pub mod arb;
pub mod consts;
pub mod elementary;
pub mod lambertw;
pub mod mag;
pub mod traits;
pub mod zeta;

#[cfg(test)]
mod proptests;

pub use acb::Acb;
pub use arb::Arb;
pub use consts::{const_e, const_log2, const_pi, const_two_pi_i};
pub use traits::Enclosure;

/// Largest working precision representable by an `f64` midpoint.
pub const MAX_PREC: u32 = 53;

/// Clamps a requested working precision to what the midpoint can carry.
pub fn effective_prec(prec: u32) -> u32 {
    prec.clamp(2, MAX_PREC)
}
