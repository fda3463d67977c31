//! Rigorous enclosure of the integral over one segment.
//!
//! For `f` holomorphic with `|f| ≤ M` inside the Bernstein ellipse `E_ρ`
//! mapped onto the segment, the `n`-point Gauss–Legendre rule satisfies
//!
//! ```text
//! |∫ f - GL_n(f)| ≤ |δ| · 64 M / (15 (ρ² - 1) ρ^{2n}),   δ = (b - a)/2
//! ```
//!
//! `M` comes from an analyticity probe over a box containing the ellipse, so
//! a probe that cannot certify holomorphy rules out that `ρ` entirely.

use num_traits::Zero;
use quadra_ball::{Acb, Arb};

use crate::gauss_legendre::RuleCache;
use crate::integrand::{ContractViolation, Integrand, Request};
use crate::segment::Segment;

/// Ellipse parameters tried from the widest down.
pub const RHO_CANDIDATES: [f64; 7] = [10.0, 5.0, 3.0, 2.0, 1.5, 1.25, 1.1];

/// Degree used for the magnitude pilot of a relative-accuracy call.
const PILOT_DEGREE: usize = 16;

/// Outcome of evaluating one segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentStatus {
    /// The enclosure meets the local tolerance.
    Converged,
    /// Analyticity was certified but no degree under the cap is enough.
    ToleranceNotMet,
    /// A node value or every probe was indeterminate.
    Indeterminate,
}

/// Enclosure of a segment integral with its bookkeeping.
#[derive(Clone, Copy, Debug)]
pub struct SegmentEstimate {
    /// Enclosure of the integral, truncation error included in the radius.
    pub value: Acb,
    /// Radius of `value`.
    pub error: f64,
    /// Gauss–Legendre degree used; 0 for the trivial hull enclosure.
    pub degree: usize,
    /// Integrand calls spent.
    pub evaluations: u64,
    pub status: SegmentStatus,
}

impl SegmentEstimate {
    fn new(value: Acb, degree: usize, evaluations: u64, status: SegmentStatus) -> Self {
        Self {
            value,
            error: value.radius(),
            degree,
            evaluations,
            status,
        }
    }
}

/// Upper bound on the Gauss–Legendre truncation error.
pub fn truncation_bound(delta_abs: f64, magnitude: f64, rho: f64, n: usize) -> f64 {
    let rho = Arb::exact(rho);
    let numerator = Arb::exact(delta_abs) * Arb::exact(magnitude) * Arb::from(64);
    let denominator = Arb::from(15) * (rho.sqr() - Arb::exact(1.0));
    let decay = (-(rho.ln() * Arb::exact((2 * n) as f64))).exp();
    let bound = numerator / denominator * decay;
    if bound.is_finite() {
        bound.upper().max(0.0)
    } else {
        f64::INFINITY
    }
}

/// Smallest degree in `2, 4, 8, …, cap` whose bound reaches `target`.
fn pick_degree(delta_abs: f64, magnitude: f64, rho: f64, target: f64, cap: usize) -> Option<(usize, f64)> {
    let mut n = cap.min(2);
    loop {
        let bound = truncation_bound(delta_abs, magnitude, rho, n);
        if bound <= target {
            return Some((n, bound));
        }
        if n >= cap {
            return None;
        }
        n = (2 * n).min(cap);
    }
}

/// Largest degree up to `cap` whose rule fits in `budget` integrand calls.
fn affordable_degree(cap: usize, budget: u64) -> usize {
    usize::try_from(budget).map_or(cap, |b| cap.min(b))
}

/// Evaluates segments for one integration call.
///
/// Holds the integrand, its auxiliary parameter and the per-call rule cache.
pub struct QuadratureEvaluator<'a, P: ?Sized, F: ?Sized> {
    integrand: &'a F,
    param: &'a P,
    prec: u32,
    deg_limit: usize,
    rules: RuleCache,
}

impl<'a, P, F> QuadratureEvaluator<'a, P, F>
where
    P: ?Sized,
    F: Integrand<P> + ?Sized,
{
    pub fn new(integrand: &'a F, param: &'a P, prec: u32, deg_limit: usize) -> Self {
        Self {
            integrand,
            param,
            prec,
            deg_limit: deg_limit.max(1),
            rules: RuleCache::new(),
        }
    }

    pub fn deg_limit(&self) -> usize {
        self.deg_limit
    }

    fn call(&self, z: &Acb, request: Request) -> Result<Acb, ContractViolation> {
        self.integrand.evaluate(z, request, self.param, self.prec)
    }

    /// `(b - a) · f(hull)`: one evaluation, always sound.
    pub fn enclose_trivially(&self, segment: &Segment) -> Result<Acb, ContractViolation> {
        let v = self.call(&segment.hull(), Request::Value)?;
        Ok(segment.length() * v)
    }

    /// Applies the `n`-point rule. Returns the evaluations spent and the
    /// enclosure, or `None` if the rule or a node value is unavailable.
    fn gauss_sum(
        &mut self,
        segment: &Segment,
        n: usize,
    ) -> Result<(Option<Acb>, u64), ContractViolation> {
        let Some(rule) = self.rules.get(n) else {
            return Ok((None, 0));
        };
        let centre = segment.centre();
        let delta = segment.half_length();

        let mut sum = Acb::zero();
        let mut used = 0;
        for (x, w) in rule.iter() {
            let z = centre + delta.scale(x);
            let v = self
                .integrand
                .evaluate(&z, Request::Value, self.param, self.prec)?;
            used += 1;
            if !v.is_finite() {
                return Ok((None, used));
            }
            sum = sum + v.scale(w);
        }
        Ok((Some(sum * delta), used))
    }

    /// Encloses the integral over `segment`, aiming for radius `tol` with at
    /// most `budget` integrand calls.
    ///
    /// The trivial enclosure is computed first and returned whenever no
    /// certified rule does better. A zero budget yields the indeterminate
    /// enclosure without calling the integrand.
    pub fn estimate(
        &mut self,
        segment: &Segment,
        tol: f64,
        budget: u64,
    ) -> Result<SegmentEstimate, ContractViolation> {
        if budget == 0 {
            return Ok(SegmentEstimate::new(
                Acb::indeterminate(),
                0,
                0,
                SegmentStatus::Indeterminate,
            ));
        }
        let trivial = self.enclose_trivially(segment)?;
        let mut evaluations = 1;
        if trivial.is_finite() && trivial.radius() <= tol {
            return Ok(SegmentEstimate::new(
                trivial,
                0,
                evaluations,
                SegmentStatus::Converged,
            ));
        }

        let delta_abs = segment.half_length().abs_upper();
        let target = tol * 0.5;
        let mut status = SegmentStatus::Indeterminate;

        for &rho in &RHO_CANDIDATES {
            if evaluations >= budget {
                break;
            }
            let probe = self.call(&segment.bernstein_box(rho), Request::AnalyticityProbe)?;
            evaluations += 1;
            if !probe.is_finite() {
                continue;
            }
            status = SegmentStatus::ToleranceNotMet;
            let cap = affordable_degree(self.deg_limit, budget - evaluations);
            if cap == 0 {
                break;
            }
            let magnitude = probe.abs_upper();
            let Some((n, bound)) = pick_degree(delta_abs, magnitude, rho, target, cap) else {
                continue;
            };

            let (sum, used) = self.gauss_sum(segment, n)?;
            evaluations += used;
            let Some(sum) = sum else {
                status = SegmentStatus::Indeterminate;
                break;
            };
            let value = sum.add_error(bound);
            if !(value.radius() < trivial.radius()) {
                break;
            }
            let status = if value.radius() <= tol {
                SegmentStatus::Converged
            } else {
                SegmentStatus::ToleranceNotMet
            };
            return Ok(SegmentEstimate::new(value, n, evaluations, status));
        }

        Ok(SegmentEstimate::new(trivial, 0, evaluations, status))
    }

    /// Lower bound on `|∫|` over `segment` from a fixed-degree rule, used to
    /// turn a relative goal into an absolute tolerance. Zero if nothing can
    /// be certified within `budget` integrand calls.
    pub fn pilot_magnitude(
        &mut self,
        segment: &Segment,
        budget: u64,
    ) -> Result<(f64, u64), ContractViolation> {
        let delta_abs = segment.half_length().abs_upper();
        let mut evaluations = 0;
        for &rho in &RHO_CANDIDATES {
            if evaluations >= budget {
                break;
            }
            let probe = self.call(&segment.bernstein_box(rho), Request::AnalyticityProbe)?;
            evaluations += 1;
            if !probe.is_finite() {
                continue;
            }
            let n = affordable_degree(PILOT_DEGREE.min(self.deg_limit), budget - evaluations);
            if n == 0 {
                break;
            }
            let bound = truncation_bound(delta_abs, probe.abs_upper(), rho, n);
            let (sum, used) = self.gauss_sum(segment, n)?;
            evaluations += used;
            return Ok(match sum {
                Some(sum) => (sum.add_error(bound).abs_lower(), evaluations),
                None => (0.0, evaluations),
            });
        }
        Ok((0.0, evaluations))
    }
}
