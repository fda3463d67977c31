//! Complex balls: rectangular enclosures built from two real balls.
//!
//! An [`Acb`] encloses the set `re + i·im` for `re ∈ self.re()`,
//! `im ∈ self.im()`. Wide complex balls double as evaluation regions: the
//! quadrature engine passes whole boxes to integrands to bound a function
//! over an ellipse or to certify analyticity there.

use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_complex::Complex64;
use num_traits::{One, Zero};

use crate::arb::Arb;
use crate::consts::const_log2;
use crate::mag::{add_up, hypot_down, hypot_up, libm_error, next_up, sqrt_up, sub_down};
use crate::traits::Enclosure;

/// A complex ball `re + i·im`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Acb {
    re: Arb,
    im: Arb,
}

impl Acb {
    pub fn new(re: Arb, im: Arb) -> Self {
        if re.is_finite() && im.is_finite() {
            Self { re, im }
        } else {
            Self::indeterminate()
        }
    }

    /// Creates a ball with zero imaginary part.
    pub fn from_real(re: Arb) -> Self {
        Self::new(re, Arb::zero())
    }

    /// Creates an exact complex point.
    pub fn from_f64(re: f64, im: f64) -> Self {
        Self::new(Arb::exact(re), Arb::exact(im))
    }

    pub fn from_complex(z: Complex64) -> Self {
        Self::from_f64(z.re, z.im)
    }

    /// The smallest box containing the straight segment from `a` to `b`.
    pub fn hull(a: Complex64, b: Complex64) -> Self {
        Self::new(Arb::from_bounds(a.re, b.re), Arb::from_bounds(a.im, b.im))
    }

    pub fn indeterminate() -> Self {
        Self {
            re: Arb::indeterminate(),
            im: Arb::indeterminate(),
        }
    }

    /// The imaginary unit.
    pub fn onei() -> Self {
        Self::from_f64(0.0, 1.0)
    }

    pub fn re(&self) -> Arb {
        self.re
    }

    pub fn im(&self) -> Arb {
        self.im
    }

    /// Midpoint as a plain complex number.
    pub fn mid(&self) -> Complex64 {
        Complex64::new(self.re.mid(), self.im.mid())
    }

    pub fn is_finite(&self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }

    /// Returns true if the imaginary part is exactly zero.
    pub fn is_real(&self) -> bool {
        self.im.is_exact() && self.im.mid() == 0.0
    }

    /// Largest of the two part radii.
    pub fn radius(&self) -> f64 {
        if self.is_finite() {
            self.re.rad().max(self.im.rad())
        } else {
            f64::INFINITY
        }
    }

    pub fn contains_zero(&self) -> bool {
        self.re.contains_zero() && self.im.contains_zero()
    }

    pub fn contains(&self, other: &Acb) -> bool {
        self.re.contains(&other.re) && self.im.contains(&other.im)
    }

    pub fn contains_point(&self, z: Complex64) -> bool {
        self.re.contains_f64(z.re) && self.im.contains_f64(z.im)
    }

    pub fn overlaps(&self, other: &Acb) -> bool {
        self.re.overlaps(&other.re) && self.im.overlaps(&other.im)
    }

    pub fn union(&self, other: &Acb) -> Acb {
        Self::new(self.re.union(&other.re), self.im.union(&other.im))
    }

    /// Upper bound on `|z|` over the ball.
    pub fn abs_upper(&self) -> f64 {
        if !self.is_finite() {
            return f64::INFINITY;
        }
        hypot_up(self.re.abs_upper(), self.im.abs_upper())
    }

    /// Lower bound on `|z|` over the ball.
    pub fn abs_lower(&self) -> f64 {
        if !self.is_finite() {
            return 0.0;
        }
        hypot_down(self.re.abs_lower(), self.im.abs_lower())
    }

    /// Widens both parts by `err`.
    pub fn add_error(&self, err: f64) -> Acb {
        Self::new(self.re.add_error(err), self.im.add_error(err))
    }

    /// Widens the real part only.
    pub fn add_error_re(&self, err: f64) -> Acb {
        Self::new(self.re.add_error(err), self.im)
    }

    pub fn conj(&self) -> Acb {
        Self::new(self.re, -self.im)
    }

    /// Multiplies by `i`.
    pub fn mul_i(&self) -> Acb {
        Self::new(-self.im, self.re)
    }

    /// Divides by `i`.
    pub fn div_i(&self) -> Acb {
        Self::new(self.im, -self.re)
    }

    pub fn mul_2exp(&self, k: i32) -> Acb {
        Self::new(self.re.mul_2exp(k), self.im.mul_2exp(k))
    }

    /// Multiplies by a real ball.
    pub fn scale(&self, x: Arb) -> Acb {
        if self.is_real() {
            return Self::from_real(self.re * x);
        }
        Self::new(self.re * x, self.im * x)
    }

    /// `|z|²` as a real ball.
    pub fn norm_sqr(&self) -> Arb {
        self.re.sqr() + self.im.sqr()
    }

    /// Even exponent `k` such that `|z·2^k|` lies between 1 and 4.
    ///
    /// Squaring the rescaled ball neither overflows nor underflows.
    fn balancing_exponent(&self) -> i32 {
        let m = self.re.abs_upper().max(self.im.abs_upper());
        if !(m > 0.0) || !m.is_finite() {
            return 0;
        }
        let e = m.log2().floor() as i32;
        -2 * e.div_euclid(2)
    }

    pub fn sqr(&self) -> Acb {
        if self.is_real() {
            return Self::from_real(self.re.sqr());
        }
        *self * *self
    }

    /// Reciprocal. Indeterminate if the ball may contain zero.
    pub fn inv(&self) -> Acb {
        if self.is_real() {
            return Self::from_real(self.re.inv());
        }
        // 1/z = 2^k conj(w) / |w|² with w = z·2^k
        let k = self.balancing_exponent();
        let w = self.mul_2exp(k);
        let d = w.norm_sqr();
        if !d.is_positive() {
            return Self::indeterminate();
        }
        Self::new((w.re / d).mul_2exp(k), (-w.im / d).mul_2exp(k))
    }

    /// Integer power; negative exponents go through the reciprocal.
    pub fn pow_si(&self, n: i32) -> Acb {
        if n >= 0 {
            Enclosure::pow(self, n.unsigned_abs())
        } else {
            Enclosure::pow(&self.inv(), n.unsigned_abs())
        }
    }

    /// Returns true if the region may meet the non-positive real axis.
    pub fn touches_negative_axis(&self) -> bool {
        self.im.contains_zero() && self.re.contains_nonpositive()
    }

    /// Argument on the principal branch `(-π, π]`.
    ///
    /// When the region crosses the branch cut the result is the full
    /// range `[-π, π]`.
    pub fn arg(&self) -> Arb {
        if !self.is_finite() || self.contains_zero() {
            return Arb::indeterminate();
        }
        if self.is_real() && self.re.is_positive() {
            return Arb::zero();
        }
        if self.touches_negative_axis() {
            let pi_up = next_up(PI);
            return Arb::from_bounds(-pi_up, pi_up);
        }
        // The box avoids zero and the cut, so arg is monotone along each
        // coordinate and attains its extremes at the corners.
        let xs = [self.re.lower(), self.re.upper()];
        let ys = [self.im.lower(), self.im.upper()];
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &x in &xs {
            for &y in &ys {
                let t = y.atan2(x);
                lo = lo.min(sub_down(t, libm_error(t)));
                hi = hi.max(add_up(t, libm_error(t)));
            }
        }
        Arb::from_bounds(lo, hi)
    }

    pub fn exp(&self) -> Acb {
        if self.is_real() {
            return Self::from_real(self.re.exp());
        }
        let m = self.re.exp();
        Self::new(m * self.im.cos(), m * self.im.sin())
    }

    /// Principal logarithm. Indeterminate if the region may contain zero;
    /// across the branch cut the imaginary part covers `[-π, π]`.
    pub fn ln(&self) -> Acb {
        if !self.is_finite() || !(self.abs_lower() > 0.0) {
            return Self::indeterminate();
        }
        if self.is_real() && self.re.is_positive() {
            return Self::from_real(self.re.ln());
        }
        let k = self.balancing_exponent();
        let half_log = self.mul_2exp(k).norm_sqr().ln().mul_2exp(-1);
        let modulus = half_log - const_log2() * Arb::from(k);
        Self::new(modulus, self.arg())
    }

    /// Principal square root.
    pub fn sqrt(&self) -> Acb {
        if !self.is_finite() {
            return Self::indeterminate();
        }
        if self.is_real() && self.re.is_nonnegative() {
            return Self::from_real(self.re.sqrt());
        }
        if self.touches_negative_axis() {
            // Discontinuous across the cut: bound by the modulus only.
            let s = sqrt_up(self.abs_upper());
            return Self::new(Arb::from_bounds(0.0, s), Arb::from_bounds(-s, s));
        }
        let k = self.balancing_exponent();
        let r = self.mul_2exp(k).norm_sqr().sqrt().sqrt().mul_2exp(-k / 2);
        let half = self.arg().mul_2exp(-1);
        Self::new(r * half.cos(), r * half.sin())
    }

    pub fn sin(&self) -> Acb {
        if self.is_real() {
            return Self::from_real(self.re.sin());
        }
        Self::new(
            self.re.sin() * self.im.cosh(),
            self.re.cos() * self.im.sinh(),
        )
    }

    pub fn cos(&self) -> Acb {
        if self.is_real() {
            return Self::from_real(self.re.cos());
        }
        Self::new(
            self.re.cos() * self.im.cosh(),
            -(self.re.sin() * self.im.sinh()),
        )
    }

    pub fn cosh(&self) -> Acb {
        if self.is_real() {
            return Self::from_real(self.re.cosh());
        }
        Self::new(
            self.re.cosh() * self.im.cos(),
            self.re.sinh() * self.im.sin(),
        )
    }

    /// Hyperbolic secant `1/cosh(z)`.
    pub fn sech(&self) -> Acb {
        self.cosh().inv()
    }
}

impl Add for Acb {
    type Output = Acb;

    fn add(self, rhs: Acb) -> Acb {
        if self.is_real() && rhs.is_real() {
            return Acb::from_real(self.re + rhs.re);
        }
        Acb::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Acb {
    type Output = Acb;

    fn sub(self, rhs: Acb) -> Acb {
        if self.is_real() && rhs.is_real() {
            return Acb::from_real(self.re - rhs.re);
        }
        Acb::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Acb {
    type Output = Acb;

    fn mul(self, rhs: Acb) -> Acb {
        if rhs.is_real() {
            return self.scale(rhs.re);
        }
        if self.is_real() {
            return rhs.scale(self.re);
        }
        Acb::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Div for Acb {
    type Output = Acb;

    fn div(self, rhs: Acb) -> Acb {
        if rhs.is_real() {
            return Acb::new(self.re / rhs.re, self.im / rhs.re);
        }
        self * rhs.inv()
    }
}

impl Neg for Acb {
    type Output = Acb;

    fn neg(self) -> Acb {
        Acb::new(-self.re, -self.im)
    }
}

impl Zero for Acb {
    fn zero() -> Self {
        Self::from_f64(0.0, 0.0)
    }

    fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }
}

impl One for Acb {
    fn one() -> Self {
        Self::from_f64(1.0, 0.0)
    }
}

impl From<Arb> for Acb {
    fn from(x: Arb) -> Self {
        Self::from_real(x)
    }
}

impl From<Complex64> for Acb {
    fn from(z: Complex64) -> Self {
        Self::from_complex(z)
    }
}

impl From<f64> for Acb {
    fn from(x: f64) -> Self {
        Self::from_f64(x, 0.0)
    }
}

impl Enclosure for Acb {
    fn indeterminate() -> Self {
        Acb::indeterminate()
    }

    fn is_finite(&self) -> bool {
        Acb::is_finite(self)
    }

    fn radius(&self) -> f64 {
        Acb::radius(self)
    }

    fn add_error(&self, err: f64) -> Self {
        Acb::add_error(self, err)
    }

    fn union(&self, other: &Self) -> Self {
        Acb::union(self, other)
    }

    fn overlaps(&self, other: &Self) -> bool {
        Acb::overlaps(self, other)
    }

    fn contains_zero(&self) -> bool {
        Acb::contains_zero(self)
    }
}

impl fmt::Display for Acb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = f.precision().unwrap_or(15);
        if !self.is_finite() {
            return write!(f, "[+/- inf] + [+/- inf]*I");
        }
        if self.is_real() {
            write!(f, "{:.*}", digits, self.re)
        } else {
            write!(f, "{:.*} + {:.*}*I", digits, self.re, digits, self.im)
        }
    }
}
