//! The integration entry point and its result type.

use std::time::Instant;

use num_complex::Complex64;
use num_traits::Zero;
use quadra_ball::mag::mul_down;
use quadra_ball::{const_two_pi_i, effective_prec, Acb, Arb};
use tracing::info;

use crate::controller::AccuracyController;
use crate::error::IntegrationError;
use crate::evaluator::QuadratureEvaluator;
use crate::integrand::Integrand;
use crate::options::{IntegrationOptions, Status, Verbosity};
use crate::queue::{HeapQueue, StackQueue};
use crate::scheduler::Scheduler;
use crate::segment::Segment;
use crate::stats::IntegrationStats;

/// Goals beyond this are treated as this many bits.
const MAX_GOAL: u32 = 1000;

/// Bits kept in reserve below the working precision when no goal is given.
pub const GUARD_BITS: u32 = 13;

/// A goal the `f64` backend can usually reach at precision `prec`.
pub fn default_goal(prec: u32) -> u32 {
    effective_prec(prec).saturating_sub(GUARD_BITS)
}

/// An enclosure of an integral together with how it was obtained.
#[derive(Clone, Copy, Debug)]
pub struct Integral {
    /// Enclosure of the integral. Always sound.
    pub value: Acb,
    /// Whether the requested accuracy was reached.
    pub status: Status,
    pub stats: IntegrationStats,
}

impl Integral {
    /// The exact zero integral.
    pub fn zero() -> Self {
        Self {
            value: Acb::zero(),
            status: Status::Converged,
            stats: IntegrationStats::default(),
        }
    }

    pub fn is_converged(&self) -> bool {
        self.status.is_converged()
    }

    /// Returns true if the radius is at most `tol`.
    pub fn meets(&self, tol: f64) -> bool {
        self.value.radius() <= tol
    }

    /// Sum of two independently computed integrals.
    pub fn combine(&self, other: &Integral) -> Integral {
        Integral {
            value: self.value + other.value,
            status: self.status.merge(other.status),
            stats: self.stats.merge(&other.stats),
        }
    }

    /// Sum of any number of integrals.
    pub fn sum<I: IntoIterator<Item = Integral>>(parts: I) -> Integral {
        parts
            .into_iter()
            .fold(Integral::zero(), |acc, part| acc.combine(&part))
    }

    /// Multiplies the value by a real factor, e.g. a symmetry multiplier.
    pub fn scale(&self, factor: Arb) -> Integral {
        Integral {
            value: self.value.scale(factor),
            ..*self
        }
    }

    /// Divides the value by `2πi`, turning a closed contour integral into a
    /// residue sum.
    pub fn div_2pi_i(&self) -> Integral {
        Integral {
            value: self.value / const_two_pi_i(),
            ..*self
        }
    }

    /// Widens both parts by a proven bound on a truncated tail.
    pub fn with_tail_bound(&self, bound: f64) -> Integral {
        Integral {
            value: self.value.add_error(bound),
            ..*self
        }
    }

    /// Widens the real part only, for integrands known to be real.
    pub fn with_real_tail_bound(&self, bound: f64) -> Integral {
        Integral {
            value: self.value.add_error_re(bound),
            ..*self
        }
    }
}

fn check_endpoints(a: Complex64, b: Complex64) -> Result<(), IntegrationError> {
    if !a.is_finite() || !b.is_finite() || a == b {
        return Err(IntegrationError::InvalidSegment {
            a: a.to_string(),
            b: b.to_string(),
        });
    }
    Ok(())
}

/// Integrates `f` along the straight line from `a` to `b`.
///
/// The target accuracy is `abs_tol` when positive, and `goal` then only
/// shapes the default degree limit: a converged result always has radius at
/// most `abs_tol`, however loose `2^-goal` relative to the integral would be.
/// With `abs_tol = 0` the target is `2^-goal` times a certified lower bound
/// on `|∫ f|` from a pilot evaluation, falling back to `2^-goal` absolute
/// when that bound is zero.
///
/// The integrand is called at most `eval_limit` times, pilot included.
///
/// The returned enclosure always contains the integral. Its
/// [`Status`] says whether the target was met; numerical trouble never
/// produces an error. Only invalid input or an integrand that rejects an
/// analyticity probe does.
///
/// # Example
///
/// ```
/// use num_complex::Complex64;
/// use quadra_ball::Acb;
/// use quadra_calc::{integrate, Holomorphic, IntegrationOptions};
///
/// let f = Holomorphic(|z: &Acb| z.exp());
/// let r = integrate(
///     &f,
///     &(),
///     Complex64::new(0.0, 0.0),
///     Complex64::new(1.0, 0.0),
///     40,
///     1e-12,
///     &IntegrationOptions::default(),
///     53,
/// )
/// .unwrap();
/// assert!(r.value.re().contains_f64(std::f64::consts::E - 1.0));
/// ```
#[allow(clippy::too_many_arguments)]
pub fn integrate<P, F>(
    f: &F,
    param: &P,
    a: Complex64,
    b: Complex64,
    goal: u32,
    abs_tol: f64,
    options: &IntegrationOptions,
    prec: u32,
) -> Result<Integral, IntegrationError>
where
    P: ?Sized,
    F: Integrand<P> + ?Sized,
{
    check_endpoints(a, b)?;
    if !(abs_tol >= 0.0) || !abs_tol.is_finite() {
        return Err(IntegrationError::InvalidTolerance(abs_tol));
    }

    let started = Instant::now();
    let prec = effective_prec(prec);
    let limits = options.limits(prec, goal);
    let mut evaluator = QuadratureEvaluator::new(f, param, prec, limits.degree);
    let root = Segment::root(a, b);

    let mut pilot_evaluations = 0;
    let tolerance = if abs_tol > 0.0 {
        abs_tol
    } else {
        // the root keeps one call in reserve for its trivial enclosure
        let budget = limits.evaluations.saturating_sub(1);
        let (magnitude, used) = evaluator.pilot_magnitude(&root, budget)?;
        pilot_evaluations = used;
        let scale = 2f64.powi(-(goal.min(MAX_GOAL) as i32));
        let relative = mul_down(magnitude, scale);
        if relative > 0.0 {
            relative
        } else {
            scale
        }
    };

    let mut controller = AccuracyController::new(tolerance, limits);
    controller.record_evaluations(pilot_evaluations);

    let outcome = if options.use_heap {
        Scheduler::new(HeapQueue::new(), controller, options.verbosity).run(root, &mut evaluator)?
    } else {
        Scheduler::new(StackQueue::new(), controller, options.verbosity).run(root, &mut evaluator)?
    };

    if options.verbosity >= Verbosity::Summary {
        info!(
            a = %a,
            b = %b,
            tolerance,
            evaluations = outcome.stats.evaluations,
            segments = outcome.stats.accepted,
            max_depth = outcome.stats.max_depth,
            max_degree = outcome.stats.max_degree,
            status = %outcome.status,
            elapsed_ms = started.elapsed().as_secs_f64() * 1e3,
            "integration finished"
        );
    }

    Ok(Integral {
        value: outcome.value,
        status: outcome.status,
        stats: outcome.stats,
    })
}
