//! The enclosure abstraction consumed by the quadrature engine.
//!
//! An enclosure is a set-valued number: a midpoint and a radius such that the
//! true value is guaranteed to lie in the ball. Arithmetic on enclosures is
//! conservative, so the output ball contains every result the inputs admit.

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_traits::{One, Zero};

/// A ball that conservatively encloses a real or complex value.
///
/// # Laws
///
/// - If `x ∈ a` and `y ∈ b` then `x ∘ y ∈ a ∘ b` for every arithmetic operator.
/// - A non-finite enclosure (see [`Enclosure::indeterminate`]) contains
///   everything and absorbs every operation it takes part in.
/// - `a.union(&b)` contains both `a` and `b`.
pub trait Enclosure:
    Copy
    + Debug
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// The enclosure of "any value": infinite radius.
    fn indeterminate() -> Self;

    /// Returns true if the midpoint and radius are both finite.
    fn is_finite(&self) -> bool;

    /// Upper bound on the radius. `f64::INFINITY` when not finite.
    fn radius(&self) -> f64;

    /// Widens the radius by `err`.
    fn add_error(&self, err: f64) -> Self;

    /// Smallest representable ball containing both operands.
    fn union(&self, other: &Self) -> Self;

    /// Returns true if the two balls may share a point.
    fn overlaps(&self, other: &Self) -> bool;

    /// Returns true if zero may lie in the ball.
    fn contains_zero(&self) -> bool;

    /// Computes self^n by binary powering.
    fn pow(&self, n: u32) -> Self {
        if n == 0 {
            return Self::one();
        }

        let mut result = Self::one();
        let mut base = *self;
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result * base;
            }
            exp >>= 1;
            if exp > 0 {
                base = base * base;
            }
        }

        result
    }
}
