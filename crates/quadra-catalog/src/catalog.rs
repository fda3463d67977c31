//! Catalogue of example integrals.
//!
//! Every entry is a fixed integral with a description and a routine that
//! computes it under caller [`Settings`]. Integrals over infinite ranges are
//! truncated and widened by a proven bound on the discarded tail.

use std::f64::consts::LN_2;
use std::time::Instant;

use num_complex::Complex64;
use quadra_ball::mag::{div_up, mul_up};
use quadra_ball::{Acb, Arb};
use quadra_calc::{
    default_goal, integrate, Contour, ContractViolation, Holomorphic, Integral, Integrand,
    IntegrationOptions, Request,
};
use tracing::debug;

use crate::error::CatalogError;
use crate::holomorphic;

/// Largest goal for which truncation points like `2^goal` stay representable.
pub const MAX_TRUNCATION_GOAL: u32 = 1000;

/// Order of the Taylor coefficient extracted by the Laurent contour entry.
const LAURENT_ORDER: i32 = 10;

/// Half-width of the rectangle in which the zeros of `cos` are counted.
const ZERO_COUNT_HALF_WIDTH: f64 = 10.0;

/// Accuracy and resource settings shared by every catalogue entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Working precision in bits.
    pub prec: u32,
    /// Relative accuracy goal in bits, used when `tol` is zero.
    pub goal: u32,
    /// Absolute tolerance.
    pub tol: f64,
    pub options: IntegrationOptions,
}

impl Settings {
    /// Settings for precision `prec` with the default goal and `tol = 2^-goal`.
    pub fn new(prec: u32) -> Self {
        let goal = default_goal(prec);
        Self {
            prec,
            goal,
            tol: tolerance_for(goal),
            options: IntegrationOptions::default(),
        }
    }

    pub fn with_goal(mut self, goal: u32) -> Self {
        self.goal = goal;
        self
    }

    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    pub fn with_options(mut self, options: IntegrationOptions) -> Self {
        self.options = options;
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(64)
    }
}

/// `2^-goal`, with the goal capped at [`MAX_TRUNCATION_GOAL`].
pub fn tolerance_for(goal: u32) -> f64 {
    2f64.powi(-(goal.min(MAX_TRUNCATION_GOAL) as i32))
}

type Compute = fn(&Settings) -> Result<Integral, CatalogError>;

/// One catalogue integral.
#[derive(Clone, Copy, Debug)]
pub struct Entry {
    pub index: usize,
    pub description: &'static str,
    compute: Compute,
}

impl Entry {
    /// Computes the integral. Elapsed time is reported at debug level.
    pub fn compute(&self, settings: &Settings) -> Result<Integral, CatalogError> {
        let started = Instant::now();
        let result = (self.compute)(settings);
        debug!(
            index = self.index,
            ok = result.is_ok(),
            elapsed_ms = started.elapsed().as_secs_f64() * 1e3,
            "catalogue entry computed"
        );
        result
    }
}

/// All entries, in index order.
pub fn entries() -> &'static [Entry] {
    &ENTRIES
}

/// The entry with the given index.
pub fn lookup(index: usize) -> Result<&'static Entry, CatalogError> {
    ENTRIES.get(index).ok_or(CatalogError::UnknownIntegral {
        index,
        count: ENTRIES.len(),
    })
}

static ENTRIES: [Entry; 21] = [
    Entry {
        index: 0,
        description: "int_0^100 sin(x) dx",
        compute: sin_0_100,
    },
    Entry {
        index: 1,
        description: "4 int_0^1 1/(1+x^2) dx",
        compute: atan_0_1,
    },
    Entry {
        index: 2,
        description: "2 int_0^{inf} 1/(1+x^2) dx   (using domain truncation)",
        compute: atan_0_inf,
    },
    Entry {
        index: 3,
        description: "4 int_0^1 sqrt(1-x^2) dx",
        compute: quarter_circle,
    },
    Entry {
        index: 4,
        description: "int_0^8 sin(x+exp(x)) dx",
        compute: rump_0_8,
    },
    Entry {
        index: 5,
        description: "int_1^101 floor(x) dx",
        compute: floor_1_101,
    },
    Entry {
        index: 6,
        description: "int_0^1 |x^4+10x^3+19x^2-6x-6| exp(x) dx",
        compute: helfgott_0_1,
    },
    Entry {
        index: 7,
        description: "1/(2 pi i) int zeta(s) ds  (closed path around s = 1)",
        compute: zeta_residue,
    },
    Entry {
        index: 8,
        description: "int_0^1 sin(1/x) dx  (slow convergence, use --heap and/or --tol)",
        compute: sin_inv_0_1,
    },
    Entry {
        index: 9,
        description: "int_0^1 x sin(1/x) dx  (slow convergence, use --heap and/or --tol)",
        compute: x_sin_inv_0_1,
    },
    Entry {
        index: 10,
        description: "int_{-10}^{10} sin(x) + exp(-200-x^2) dx",
        compute: sin_plus_small,
    },
    Entry {
        index: 11,
        description: "int_0^{inf} exp(-x^2) dx   (using domain truncation)",
        compute: gaussian_0_inf,
    },
    Entry {
        index: 12,
        description: "int_0^1 sech(10(x-0.2))^2 + sech(100(x-0.4))^4 + sech(1000(x-0.6))^6 dx",
        compute: wolfram_0_1,
    },
    Entry {
        index: 13,
        description: "int_0^8 (exp(x)-floor(exp(x))) sin(x+exp(x)) dx  (use higher --eval)",
        compute: monster_0_8,
    },
    Entry {
        index: 14,
        description: "int_0^{inf} sech(x) dx   (using domain truncation)",
        compute: sech_0_inf,
    },
    Entry {
        index: 15,
        description: "int_0^{inf} sech^3(x) dx   (using domain truncation)",
        compute: sech3_0_inf,
    },
    Entry {
        index: 16,
        description: "int_0^1 -log(x)/(1+x) dx   (using domain truncation)",
        compute: log_div1p_0_1,
    },
    Entry {
        index: 17,
        description: "int_0^{inf} x exp(-x)/(1+exp(-x)) dx   (using domain truncation)",
        compute: log_div1p_transformed,
    },
    Entry {
        index: 18,
        description: "1/(2 pi i) int_C exp(z)/z^11 dz  (contour for the 10th Taylor coefficient of exp)",
        compute: exp_taylor_coefficient,
    },
    Entry {
        index: 19,
        description: "int_0^{1000} W_0(x) dx",
        compute: lambertw_0_1000,
    },
    Entry {
        index: 20,
        description: "N = count zeros of cos(z) with |Re z| < 10, |Im z| < 1 using argument principle",
        compute: cos_zero_count,
    },
];

// Integrands.

fn one() -> Acb {
    Acb::from(1.0)
}

fn atan_derivative(z: &Acb) -> Acb {
    (z.sqr() + one()).inv()
}

fn circle(z: &Acb, request: Request) -> Acb {
    let w = holomorphic::sqrt(&(one() - z.sqr()), request);
    match request {
        // Rounding can push |z| past 1 at the ends of [0, 1].
        Request::Value => Acb::from_real(w.re()),
        Request::AnalyticityProbe => w,
    }
}

fn rump(z: &Acb) -> Acb {
    (z.exp() + *z).sin()
}

fn helfgott(z: &Acb, request: Request) -> Acb {
    let p = (((*z + Acb::from(10.0)) * *z + Acb::from(19.0)) * *z - Acb::from(6.0)) * *z
        - Acb::from(6.0);
    let m = holomorphic::abs(&p, request);
    if m.is_finite() {
        m * z.exp()
    } else {
        m
    }
}

/// `sin(1/z)`, bounded by `[0 ± 1]` on real regions containing 0.
fn sin_inv(z: &Acb, request: Request) -> Acb {
    if request == Request::Value && z.is_real() && z.re().contains_zero() {
        Acb::from_real(Arb::new(0.0, 1.0))
    } else {
        z.inv().sin()
    }
}

fn x_sin_inv(z: &Acb, request: Request) -> Acb {
    sin_inv(z, request) * *z
}

fn sin_plus_exp(z: &Acb) -> Acb {
    z.sin() + (-(z.sqr() + Acb::from(200.0))).exp()
}

fn gaussian(z: &Acb) -> Acb {
    (-z.sqr()).exp()
}

fn wolfram(z: &Acb) -> Acb {
    let peak = |scale: f64, shift: f64, power: i32| {
        (z.scale(Arb::exact(scale)) - Acb::from(shift))
            .sech()
            .pow_si(power)
    };
    peak(10.0, 2.0, 2) + peak(100.0, 40.0, 4) + peak(1000.0, 600.0, 6)
}

fn monster(z: &Acb, request: Request) -> Acb {
    let t = z.exp();
    let whole = holomorphic::floor(&t, request);
    if !whole.is_finite() {
        return whole;
    }
    (t - whole) * (t + *z).sin()
}

fn sech(z: &Acb) -> Acb {
    z.sech()
}

fn sech3(z: &Acb) -> Acb {
    z.sech().pow_si(3)
}

fn log_div1p(z: &Acb, request: Request) -> Acb {
    -(holomorphic::log(z, request) / (*z + one()))
}

fn log_div1p_substituted(z: &Acb) -> Acb {
    let t = (-*z).exp();
    t / (t + one()) * *z
}

fn laurent(z: &Acb, _request: Request, n: &i32, _prec: u32) -> Result<Acb, ContractViolation> {
    Ok(z.exp() * z.pow_si(-n.saturating_add(1)))
}

/// `cos'(z)/cos(z) = -tan(z)`.
fn cos_logarithmic_derivative(z: &Acb) -> Acb {
    -(z.sin() / z.cos())
}

/// Adapts a request-aware integrand that ignores precision and parameter.
fn piecewise(
    f: fn(&Acb, Request) -> Acb,
) -> impl Fn(&Acb, Request, &(), u32) -> Result<Acb, ContractViolation> {
    move |z: &Acb, request: Request, _: &(), _: u32| Ok(f(z, request))
}

// Drivers.

fn along<F>(f: &F, a: f64, b: f64, s: &Settings) -> Result<Integral, CatalogError>
where
    F: Integrand<()> + ?Sized,
{
    let result = integrate(
        f,
        &(),
        Complex64::new(a, 0.0),
        Complex64::new(b, 0.0),
        s.goal,
        s.tol,
        &s.options,
        s.prec,
    )?;
    Ok(result)
}

fn checked_goal(goal: u32) -> Result<u32, CatalogError> {
    if goal > MAX_TRUNCATION_GOAL {
        return Err(CatalogError::GoalTooLarge(goal));
    }
    Ok(goal)
}

/// Upper bound for `e^x`.
fn exp_upper(x: f64) -> f64 {
    Arb::exact(x).exp().upper()
}

/// `goal + bitlength(goal)`, the truncation exponent for the log integrals.
///
/// At least 1, so the truncated range never collapses to a point.
fn log_truncation(goal: u32) -> u32 {
    (goal + (u32::BITS - goal.leading_zeros())).max(1)
}

fn sin_0_100(s: &Settings) -> Result<Integral, CatalogError> {
    along(&Holomorphic(|z: &Acb| z.sin()), 0.0, 100.0, s)
}

fn atan_0_1(s: &Settings) -> Result<Integral, CatalogError> {
    Ok(along(&Holomorphic(atan_derivative), 0.0, 1.0, s)?.scale(Arb::exact(4.0)))
}

fn atan_0_inf(s: &Settings) -> Result<Integral, CatalogError> {
    let goal = checked_goal(s.goal)?;
    let end = 2f64.powi(goal as i32);
    // ∫_X^∞ 1/(1+x²) dx ≤ 1/X
    let tail = tolerance_for(goal);
    let head = along(&Holomorphic(atan_derivative), 0.0, end, s)?;
    Ok(head.with_real_tail_bound(tail).scale(Arb::exact(2.0)))
}

fn quarter_circle(s: &Settings) -> Result<Integral, CatalogError> {
    Ok(along(&piecewise(circle), 0.0, 1.0, s)?.scale(Arb::exact(4.0)))
}

fn rump_0_8(s: &Settings) -> Result<Integral, CatalogError> {
    along(&Holomorphic(rump), 0.0, 8.0, s)
}

fn floor_1_101(s: &Settings) -> Result<Integral, CatalogError> {
    along(&piecewise(holomorphic::floor), 1.0, 101.0, s)
}

fn helfgott_0_1(s: &Settings) -> Result<Integral, CatalogError> {
    along(&piecewise(helfgott), 0.0, 1.0, s)
}

fn zeta_residue(s: &Settings) -> Result<Integral, CatalogError> {
    let contour = Contour::rectangle(Complex64::new(-1.0, -1.0), Complex64::new(2.0, 1.0))?;
    let f = Holomorphic(|z: &Acb| z.zeta());
    let total = contour.integrate(&f, &(), s.goal, s.tol, &s.options, s.prec)?;
    Ok(total.div_2pi_i())
}

fn sin_inv_0_1(s: &Settings) -> Result<Integral, CatalogError> {
    along(&piecewise(sin_inv), 0.0, 1.0, s)
}

fn x_sin_inv_0_1(s: &Settings) -> Result<Integral, CatalogError> {
    along(&piecewise(x_sin_inv), 0.0, 1.0, s)
}

fn sin_plus_small(s: &Settings) -> Result<Integral, CatalogError> {
    along(&Holomorphic(sin_plus_exp), -10.0, 10.0, s)
}

fn gaussian_0_inf(s: &Settings) -> Result<Integral, CatalogError> {
    let end = ((f64::from(s.goal) * LN_2).sqrt() + 1.0).ceil();
    // ∫_N^∞ e^{-x²} dx ≤ e^{-N²}
    let tail = exp_upper(-end * end);
    Ok(along(&Holomorphic(gaussian), 0.0, end, s)?.with_real_tail_bound(tail))
}

fn wolfram_0_1(s: &Settings) -> Result<Integral, CatalogError> {
    along(&Holomorphic(wolfram), 0.0, 1.0, s)
}

fn monster_0_8(s: &Settings) -> Result<Integral, CatalogError> {
    along(&piecewise(monster), 0.0, 8.0, s)
}

fn sech_0_inf(s: &Settings) -> Result<Integral, CatalogError> {
    let end = (f64::from(s.goal) * LN_2 + 1.0).ceil();
    // sech x ≤ 2e^{-x}
    let tail = mul_up(exp_upper(-end), 2.0);
    Ok(along(&Holomorphic(sech), 0.0, end, s)?.with_real_tail_bound(tail))
}

fn sech3_0_inf(s: &Settings) -> Result<Integral, CatalogError> {
    let end = (f64::from(s.goal) * LN_2 / 3.0 + 2.0).ceil();
    // sech³ x ≤ 8e^{-3x}
    let tail = div_up(mul_up(exp_upper(-3.0 * end), 8.0), 3.0);
    Ok(along(&Holomorphic(sech3), 0.0, end, s)?.with_real_tail_bound(tail))
}

fn log_div1p_0_1(s: &Settings) -> Result<Integral, CatalogError> {
    let n = log_truncation(checked_goal(s.goal)?);
    let start = 2f64.powi(-(n as i32));
    // ∫_0^ε -log x dx = ε(1 - log ε) ≤ (N + 1) 2^-N
    let tail = mul_up(f64::from(n + 1), start);
    Ok(along(&piecewise(log_div1p), start, 1.0, s)?.with_real_tail_bound(tail))
}

fn log_div1p_transformed(s: &Settings) -> Result<Integral, CatalogError> {
    let n = log_truncation(checked_goal(s.goal)?);
    let end = f64::from(n);
    // ∫_N^∞ x e^{-x} dx = (N + 1) e^{-N}
    let tail = mul_up(f64::from(n + 1), exp_upper(-end));
    Ok(along(&Holomorphic(log_div1p_substituted), 0.0, end, s)?.with_real_tail_bound(tail))
}

fn exp_taylor_coefficient(s: &Settings) -> Result<Integral, CatalogError> {
    let contour = Contour::rectangle(Complex64::new(-0.5, -0.5), Complex64::new(0.5, 0.5))?;
    let total = contour.integrate(&laurent, &LAURENT_ORDER, s.goal, s.tol, &s.options, s.prec)?;
    Ok(total.div_2pi_i())
}

fn lambertw_0_1000(s: &Settings) -> Result<Integral, CatalogError> {
    along(&piecewise(holomorphic::lambertw), 0.0, 1000.0, s)
}

fn cos_zero_count(s: &Settings) -> Result<Integral, CatalogError> {
    let w = ZERO_COUNT_HALF_WIDTH;
    let contour = Contour::rectangle(Complex64::new(-w, -1.0), Complex64::new(w, 1.0))?;
    let f = Holomorphic(cos_logarithmic_derivative);
    let total = contour.integrate(&f, &(), s.goal, s.tol, &s.options, s.prec)?;
    Ok(total.div_2pi_i())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn settings() -> Settings {
        Settings::new(53).with_goal(30).with_tol(1e-8)
    }

    /// True if `exact`, a rounded `f64` constant, lies in the real part up
    /// to its own rounding.
    fn encloses(r: &Integral, exact: f64) -> bool {
        r.value
            .re()
            .add_error(f64::EPSILON * exact.abs())
            .contains_f64(exact)
    }

    #[test]
    fn test_indices_match_positions() {
        for (i, entry) in entries().iter().enumerate() {
            assert_eq!(entry.index, i);
            assert!(!entry.description.is_empty());
        }
    }

    #[test]
    fn test_lookup_out_of_range() {
        let count = entries().len();
        assert!(lookup(count - 1).is_ok());
        assert_eq!(
            lookup(count).err(),
            Some(CatalogError::UnknownIntegral {
                index: count,
                count
            })
        );
    }

    #[test]
    fn test_default_settings() {
        let s = Settings::default();
        assert_eq!(s.prec, 64);
        assert_eq!(s.goal, default_goal(64));
        assert_eq!(s.tol, tolerance_for(s.goal));
        assert_eq!(tolerance_for(10), 1.0 / 1024.0);
    }

    #[test]
    fn test_goal_too_large_for_truncation() {
        let s = settings().with_goal(MAX_TRUNCATION_GOAL + 1);
        assert_eq!(
            lookup(2).and_then(|e| e.compute(&s)).err(),
            Some(CatalogError::GoalTooLarge(MAX_TRUNCATION_GOAL + 1))
        );
    }

    #[test]
    fn test_log_truncation() {
        assert_eq!(log_truncation(0), 1);
        assert_eq!(log_truncation(1), 2);
        assert_eq!(log_truncation(30), 35);
        assert_eq!(log_truncation(64), 71);
    }

    #[test]
    fn test_sin() {
        let r = lookup(0).unwrap().compute(&settings()).unwrap();
        assert!(r.is_converged());
        assert!(r.meets(1e-8));
        assert!(encloses(&r, 1.0 - 100f64.cos()));
    }

    #[test]
    fn test_four_arctan() {
        let r = lookup(1).unwrap().compute(&settings()).unwrap();
        assert!(r.is_converged());
        assert!(encloses(&r, PI));
    }

    #[test]
    fn test_floor_sum() {
        let r = lookup(5).unwrap().compute(&settings()).unwrap();
        assert!(r.value.is_finite());
        assert!(encloses(&r, 5050.0));
    }

    #[test]
    fn test_zeta_residue() {
        let s = settings().with_tol(1e-6);
        let r = lookup(7).unwrap().compute(&s).unwrap();
        assert!(r.value.is_finite());
        assert!(encloses(&r, 1.0));
        assert!(r.value.im().contains_f64(0.0));
    }

    #[test]
    fn test_gaussian_with_tail() {
        let r = lookup(11).unwrap().compute(&settings()).unwrap();
        assert!(r.is_converged());
        assert!(encloses(&r, PI.sqrt() / 2.0));
    }

    #[test]
    fn test_sech_with_tail() {
        let r = lookup(14).unwrap().compute(&settings()).unwrap();
        assert!(r.value.is_finite());
        assert!(encloses(&r, PI / 2.0));
    }

    #[test]
    fn test_log_integrals_at_goal_zero() {
        let s = settings().with_goal(0);
        let exact = PI * PI / 12.0;
        for index in [16, 17] {
            let r = lookup(index).unwrap().compute(&s).unwrap();
            assert!(r.value.is_finite());
            assert!(encloses(&r, exact), "I{index}");
        }
    }

    #[test]
    fn test_log_integrals() {
        let exact = PI * PI / 12.0;
        for index in [16, 17] {
            let r = lookup(index).unwrap().compute(&settings()).unwrap();
            assert!(r.value.is_finite());
            assert!(encloses(&r, exact), "I{index}");
            assert!(r.value.radius() < 1e-6);
        }
    }

    #[test]
    fn test_quarter_circle() {
        let r = lookup(3).unwrap().compute(&settings()).unwrap();
        assert!(r.is_converged());
        assert!(r.value.im().contains_f64(0.0));
        assert!(encloses(&r, PI));
    }

    #[test]
    fn test_oscillating_near_zero_stays_sound() {
        // ∫_0^1 sin(1/x) dx = sin(1) - Ci(1)
        let exact = 0.504_067_061_906_928_4;
        let options = IntegrationOptions::default()
            .with_heap(true)
            .with_eval_limit(20_000);
        let s = settings().with_tol(1e-3).with_options(options);
        let r = lookup(8).unwrap().compute(&s).unwrap();
        assert!(r.stats.evaluations <= 20_000);
        assert!(r.value.re().add_error(f64::EPSILON * exact).contains_f64(exact));
        assert!(r.value.radius() < 0.1);
    }

    #[test]
    fn test_sech_peaks() {
        // antiderivatives of sech^2, sech^4 and sech^6 in terms of tanh
        let exact = (8f64.tanh() + 2f64.tanh()) / 10.0 + 4.0 / 300.0 + 16.0 / 15000.0;
        let r = lookup(12).unwrap().compute(&settings().with_tol(1e-6)).unwrap();
        assert!(r.is_converged());
        assert!(r.meets(1e-6));
        assert!(r.value.re().add_error(4.0 * f64::EPSILON * exact).contains_f64(exact));
    }

    #[test]
    fn test_floor_of_exp_under_eval_limit() {
        let options = IntegrationOptions::default().with_eval_limit(5_000);
        let r = lookup(13)
            .unwrap()
            .compute(&settings().with_options(options))
            .unwrap();
        assert!(r.stats.evaluations <= 5_000);
        assert!(r.value.is_finite());
        // the integrand lies in [-1, 1]
        assert!(r.value.re().overlaps(&Arb::new(0.0, 8.0)));
    }

    #[test]
    fn test_lambertw_integral() {
        // ∫ W(x) dx = x (W - 1 + 1/W), which tends to 1 at x = 0
        let w = Acb::from(1000.0).lambertw().re();
        let one = Arb::exact(1.0);
        let exact = (w - one + w.inv()) * Arb::exact(1000.0) - one;
        let r = lookup(19).unwrap().compute(&settings().with_tol(1e-6)).unwrap();
        assert!(r.is_converged());
        assert!(r.value.re().overlaps(&exact));
        assert!(r.meets(1e-6));
    }

    #[test]
    fn test_argument_principle_counts_zeros() {
        // ±π/2, ±3π/2, ±5π/2
        let r = lookup(20).unwrap().compute(&settings()).unwrap();
        assert!(r.is_converged());
        assert!(encloses(&r, 6.0));
        assert!(r.value.im().contains_f64(0.0));
        assert!(r.value.radius() < 0.5);
    }

    #[test]
    fn test_taylor_coefficient_of_exp() {
        let r = lookup(18).unwrap().compute(&settings()).unwrap();
        assert!(r.value.is_finite());
        assert!(encloses(&r, 1.0 / 3_628_800.0));
    }
}
