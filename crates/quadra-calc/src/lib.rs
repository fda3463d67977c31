//! # quadra-calc
//!
//! Rigorous adaptive quadrature in ball arithmetic.
//!
//! Integrals of complex functions along straight segments and polygonal
//! contours are returned as enclosures that are guaranteed to contain the
//! exact value:
//!
//! - [`integrate`]: one segment, adaptive Gauss–Legendre with bisection
//! - [`Contour`]: polylines and closed contours
//! - [`Integrand`]: the value/analyticity-probe contract for integrands
//!
//! ## Algorithm
//!
//! Each segment is first enclosed trivially by `(b - a) f(hull)`. If that
//! is too wide, the integrand is probed for holomorphy on a box around a
//! Bernstein ellipse, which both certifies analyticity and bounds `|f|`
//! there; the closed-form Gauss–Legendre remainder bound then picks the
//! lowest sufficient degree. Segments that fail are bisected, with the
//! remaining error budget shared evenly among pending segments.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contour;
pub mod controller;
pub mod error;
pub mod evaluator;
pub mod gauss_legendre;
pub mod integrand;
pub mod integrate;
pub mod options;
pub mod queue;
pub mod scheduler;
pub mod segment;
pub mod stats;

#[cfg(test)]
mod proptests;

pub use contour::Contour;
pub use controller::AccuracyController;
pub use error::IntegrationError;
pub use evaluator::{QuadratureEvaluator, SegmentEstimate, SegmentStatus};
pub use gauss_legendre::{GaussLegendreRule, RuleCache};
pub use integrand::{ContractViolation, Holomorphic, Integrand, Request, ValueOnly};
pub use integrate::{default_goal, integrate, Integral};
pub use options::{Exhaustion, IntegrationOptions, Limits, Status, Verbosity};
pub use queue::{HeapQueue, SegmentQueue, StackQueue};
pub use scheduler::{Outcome, Scheduler};
pub use segment::Segment;
pub use stats::IntegrationStats;
