//! Certified Gauss–Legendre rules.
//!
//! Nodes are located in the angle variable `x = cos θ`, where
//!
//! ```text
//! P_n(cos θ) = Σ_{k=0}^{n} a_k a_{n-k} cos((n - 2k) θ),   a_k = C(2k, k) / 4^k
//! ```
//!
//! Every coefficient is positive and they sum to one, so a ball evaluation of
//! this sum stays tight where the three-term recurrence would not. Each root
//! estimate from Newton's method is certified by a sign change of `P_n` at
//! `θ ± ε`; disjoint certified intervals in `(0, π/2)` account for every
//! positive root, and the rest follow by symmetry.
//!
//! Weights use `w = 2 (1 - x²) / (n² P_{n-1}(x)²)`, with `P_{n-1}` enclosed
//! over the node interval through a mean-value bound.

use std::f64::consts::{FRAC_PI_2, PI};

use quadra_ball::mag::{libm_error, mul_up, sub_up};
use quadra_ball::Arb;
use rustc_hash::FxHashMap;

const NEWTON_STEPS: usize = 50;
const WIDENINGS: usize = 6;

/// A Gauss–Legendre rule on `[-1, 1]` with ball nodes and weights.
#[derive(Clone, Debug)]
pub struct GaussLegendreRule {
    degree: usize,
    /// Nodes in decreasing order.
    nodes: Vec<Arb>,
    weights: Vec<Arb>,
}

/// `a_k = C(2k, k) / 4^k` for `k = 0..=n`.
fn coefficients(n: usize) -> Vec<Arb> {
    let mut a = Vec::with_capacity(n + 1);
    let mut current = Arb::exact(1.0);
    a.push(current);
    for k in 1..=n {
        let k = k as f64;
        current = current * Arb::exact(2.0 * k - 1.0) / Arb::exact(2.0 * k);
        a.push(current);
    }
    a
}

/// Encloses `cos(m θ)` for exact `m` and `θ`.
///
/// The product is split as `m θ = p + e` exactly, and
/// `cos(p + e) = cos p - e sin p + r` with `|r| ≤ e²/2`.
fn cos_of_product(m: f64, theta: f64) -> Arb {
    let p = m * theta;
    let e = m.mul_add(theta, -p);
    let c = p.cos();
    let s = p.sin();
    let first = Arb::new(c, libm_error(c)) - Arb::new(s, libm_error(s)) * Arb::exact(e);
    first.add_error(mul_up(mul_up(e, e), 0.5))
}

/// Encloses `P_deg(cos θ)` at an exact angle.
fn legendre_at(a: &[Arb], deg: usize, theta: f64) -> Arb {
    let mut sum = Arb::exact(0.0);
    for k in 0..=deg / 2 {
        let m = deg - 2 * k;
        let c = a[k] * a[deg - k];
        let term = if m == 0 {
            c
        } else {
            (c * cos_of_product(m as f64, theta)).mul_2exp(1)
        };
        sum = sum + term;
    }
    sum
}

/// Encloses `d/dθ P_deg(cos θ)` over a ball of angles.
fn legendre_slope(a: &[Arb], deg: usize, theta: Arb) -> Arb {
    let mut sum = Arb::exact(0.0);
    for k in 0..deg.div_ceil(2) {
        let m = Arb::from((deg - 2 * k) as u32);
        let c = a[k] * a[deg - k];
        sum = sum - (c * m * (m * theta).sin()).mul_2exp(1);
    }
    sum
}

/// Floating-point `P_deg(cos θ)` and its θ-derivative for Newton steps.
///
/// Uses the same exact split of `m θ` as [`cos_of_product`].
fn legendre_f64(a: &[f64], deg: usize, theta: f64) -> (f64, f64) {
    let mut value = 0.0;
    let mut slope = 0.0;
    for k in 0..=deg / 2 {
        let m = (deg - 2 * k) as f64;
        let c = a[k] * a[deg - k];
        if m == 0.0 {
            value += c;
        } else {
            let p = m * theta;
            let e = m.mul_add(theta, -p);
            let (sin, cos) = p.sin_cos();
            value += 2.0 * c * (cos - e * sin);
            slope -= 2.0 * c * m * (sin + e * cos);
        }
    }
    (value, slope)
}

/// Refines the `k`-th smallest root angle of `P_n(cos θ)`.
fn newton_angle(a: &[f64], n: usize, k: usize) -> f64 {
    let mut theta = PI * (k as f64 + 0.75) / (n as f64 + 0.5);
    for _ in 0..NEWTON_STEPS {
        let (value, slope) = legendre_f64(a, n, theta);
        if slope == 0.0 {
            break;
        }
        let step = value / slope;
        theta -= step;
        if step.abs() <= 2.0 * f64::EPSILON * theta.abs() {
            break;
        }
    }
    theta
}

/// Certifies a root of `P_n(cos θ)` near `theta`, returning its interval.
///
/// The first interval half-width is twice the Newton correction that the
/// enclosure of `P_n(θ)` still allows.
fn certify(a: &[Arb], a_mid: &[f64], n: usize, theta: f64) -> Option<(f64, f64)> {
    let residual = legendre_at(a, n, theta);
    let (_, slope) = legendre_f64(a_mid, n, theta);
    let mut eps = 2.0 * f64::EPSILON * theta.abs();
    if slope != 0.0 {
        eps = eps.max(2.0 * residual.abs_upper() / slope.abs());
    }
    for _ in 0..=WIDENINGS {
        let lo = theta - eps;
        let hi = theta + eps;
        let p_lo = legendre_at(a, n, lo);
        let p_hi = legendre_at(a, n, hi);
        let changes = (p_lo.is_positive() && p_hi.is_negative())
            || (p_lo.is_negative() && p_hi.is_positive());
        if changes {
            return Some((lo, hi));
        }
        eps *= 4.0;
    }
    None
}

impl GaussLegendreRule {
    /// Builds the `n`-point rule, or `None` if a node cannot be certified.
    pub fn new(n: usize) -> Option<Self> {
        if n == 0 {
            return None;
        }
        let a = coefficients(n);
        let a_mid: Vec<f64> = a.iter().map(Arb::mid).collect();
        let half = n / 2;
        let n_sq = Arb::exact((n * n) as f64);

        let mut positive = Vec::with_capacity(half);
        let mut previous_hi = 0.0;
        for k in 0..half {
            let theta = newton_angle(&a_mid, n, k);
            let (lo, hi) = certify(&a, &a_mid, n, theta)?;
            if lo <= previous_hi || hi >= FRAC_PI_2 {
                return None;
            }
            previous_hi = hi;

            let angle = Arb::from_bounds(lo, hi);
            let node = angle.cos();
            let offset = sub_up(hi, theta).max(sub_up(theta, lo));
            let spread = mul_up(legendre_slope(&a, n - 1, angle).abs_upper(), offset);
            let p_prev = legendre_at(&a, n - 1, theta).add_error(spread);
            let sin_sq = angle.sin().sqr();
            let weight = sin_sq.mul_2exp(1) / (n_sq * p_prev.sqr());
            if !weight.is_finite() {
                return None;
            }
            positive.push((node, weight));
        }

        let mut nodes = Vec::with_capacity(n);
        let mut weights = Vec::with_capacity(n);
        for &(x, w) in &positive {
            nodes.push(x);
            weights.push(w);
        }
        if n % 2 == 1 {
            // P_{n-1}(0) = ±a_{(n-1)/2}
            let centre = a[half];
            nodes.push(Arb::exact(0.0));
            weights.push(Arb::exact(2.0) / (n_sq * centre.sqr()));
        }
        for &(x, w) in positive.iter().rev() {
            nodes.push(-x);
            weights.push(w);
        }

        Some(Self {
            degree: n,
            nodes,
            weights,
        })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn nodes(&self) -> &[Arb] {
        &self.nodes
    }

    pub fn weights(&self) -> &[Arb] {
        &self.weights
    }

    /// Node/weight pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Arb, Arb)> + '_ {
        self.nodes.iter().copied().zip(self.weights.iter().copied())
    }
}

/// Rules built during one integration call, keyed by degree.
#[derive(Debug, Default)]
pub struct RuleCache {
    rules: FxHashMap<usize, Option<GaussLegendreRule>>,
}

impl RuleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the `n`-point rule, building it on first use.
    pub fn get(&mut self, n: usize) -> Option<&GaussLegendreRule> {
        self.rules
            .entry(n)
            .or_insert_with(|| GaussLegendreRule::new(n))
            .as_ref()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
