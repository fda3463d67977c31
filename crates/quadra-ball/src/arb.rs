//! Real balls with `f64` midpoint and radius.
//!
//! An [`Arb`] represents the closed interval `[mid - rad, mid + rad]`. Every
//! operation computes the midpoint in round-to-nearest and then adds both the
//! propagated input radii and a bound for its own rounding error to the radius,
//! with all radius arithmetic rounded upward. Overflow, or dividing by a ball
//! that contains zero, produces the indeterminate ball instead of panicking.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_traits::{One, Zero};

use crate::mag::{add_up, div_up, mul_down, mul_up, next_up, rounding_error, sub_down, sub_up};
use crate::traits::Enclosure;

/// A real ball `[mid ± rad]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arb {
    mid: f64,
    rad: f64,
}

/// Builds a ball, collapsing to indeterminate on overflow or NaN.
#[inline]
pub(crate) fn finish(mid: f64, rad: f64) -> Arb {
    if mid.is_finite() && rad.is_finite() && rad >= 0.0 {
        Arb { mid, rad }
    } else {
        Arb::indeterminate()
    }
}

impl Arb {
    /// Creates a ball from a midpoint and radius.
    pub fn new(mid: f64, rad: f64) -> Self {
        finish(mid, rad)
    }

    /// Creates an exact ball (radius zero).
    pub fn exact(x: f64) -> Self {
        finish(x, 0.0)
    }

    /// Creates the smallest ball enclosing `[lo, hi]`.
    ///
    /// The bounds may be given in either order.
    pub fn from_bounds(lo: f64, hi: f64) -> Self {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        if !lo.is_finite() || !hi.is_finite() {
            return Self::indeterminate();
        }
        if lo == hi {
            return Self::exact(lo);
        }
        let mid = 0.5 * lo + 0.5 * hi;
        let rad = sub_up(hi, mid).max(sub_up(mid, lo));
        finish(mid, rad)
    }

    /// The ball containing every real number.
    pub fn indeterminate() -> Self {
        Self {
            mid: f64::NAN,
            rad: f64::INFINITY,
        }
    }

    /// Midpoint.
    pub fn mid(&self) -> f64 {
        self.mid
    }

    /// Radius. Infinite for an indeterminate ball.
    pub fn rad(&self) -> f64 {
        self.rad
    }

    pub fn is_finite(&self) -> bool {
        self.mid.is_finite() && self.rad.is_finite()
    }

    pub fn is_exact(&self) -> bool {
        self.rad == 0.0 && self.mid.is_finite()
    }

    /// Lower endpoint, rounded down.
    pub fn lower(&self) -> f64 {
        if self.is_finite() {
            sub_down(self.mid, self.rad)
        } else {
            f64::NEG_INFINITY
        }
    }

    /// Upper endpoint, rounded up.
    pub fn upper(&self) -> f64 {
        if self.is_finite() {
            add_up(self.mid, self.rad)
        } else {
            f64::INFINITY
        }
    }

    pub fn contains_zero(&self) -> bool {
        self.lower() <= 0.0 && self.upper() >= 0.0
    }

    pub fn is_positive(&self) -> bool {
        self.lower() > 0.0
    }

    pub fn is_negative(&self) -> bool {
        self.upper() < 0.0
    }

    pub fn is_nonnegative(&self) -> bool {
        self.lower() >= 0.0
    }

    pub fn contains_nonpositive(&self) -> bool {
        self.lower() <= 0.0
    }

    /// Returns true if some integer may lie in the ball.
    pub fn contains_int(&self) -> bool {
        if !self.is_finite() {
            return true;
        }
        self.lower().ceil() <= self.upper()
    }

    /// Returns true if the point `x` lies in the ball.
    pub fn contains_f64(&self, x: f64) -> bool {
        self.lower() <= x && x <= self.upper()
    }

    /// Returns true if every point of `other` lies in `self`.
    pub fn contains(&self, other: &Arb) -> bool {
        if !self.is_finite() {
            return true;
        }
        if !other.is_finite() {
            return false;
        }
        self.lower() <= other.lower() && other.upper() <= self.upper()
    }

    pub fn overlaps(&self, other: &Arb) -> bool {
        self.lower() <= other.upper() && other.lower() <= self.upper()
    }

    pub fn union(&self, other: &Arb) -> Arb {
        if !self.is_finite() || !other.is_finite() {
            return Self::indeterminate();
        }
        Self::from_bounds(
            self.lower().min(other.lower()),
            self.upper().max(other.upper()),
        )
    }

    /// Upper bound on `|x|` over the ball.
    pub fn abs_upper(&self) -> f64 {
        if self.is_finite() {
            add_up(self.mid.abs(), self.rad)
        } else {
            f64::INFINITY
        }
    }

    /// Lower bound on `|x|` over the ball.
    pub fn abs_lower(&self) -> f64 {
        if self.is_finite() {
            sub_down(self.mid.abs(), self.rad).max(0.0)
        } else {
            0.0
        }
    }

    /// Enclosure of `|x|`.
    pub fn abs(&self) -> Arb {
        if self.is_nonnegative() {
            *self
        } else if self.is_negative() {
            -*self
        } else {
            Self::from_bounds(0.0, self.abs_upper())
        }
    }

    /// Widens the radius by `err`.
    pub fn add_error(&self, err: f64) -> Arb {
        finish(self.mid, add_up(self.rad, err))
    }

    /// Multiplies by `2^k`.
    ///
    /// Large shifts are applied in steps so the scale factor itself never
    /// underflows or overflows.
    pub fn mul_2exp(&self, k: i32) -> Arb {
        if !self.is_finite() {
            return Self::indeterminate();
        }
        let (mut mid, mut rad, mut k) = (self.mid, self.rad, k);
        while k != 0 {
            let step = k.clamp(-1000, 1000);
            let scale = 2f64.powi(step);
            let scaled = mid * scale;
            if rad != 0.0 {
                let r = rad * scale;
                rad = if r < f64::MIN_POSITIVE { next_up(r) } else { r };
            }
            if mid != 0.0 && scaled.abs() < f64::MIN_POSITIVE {
                rad = add_up(rad, rounding_error(scaled));
            }
            mid = scaled;
            k -= step;
        }
        finish(mid, rad)
    }

    /// Squares the ball, keeping the result nonnegative.
    pub fn sqr(&self) -> Arb {
        if !self.is_finite() {
            return Self::indeterminate();
        }
        if self.contains_zero() {
            let hi = self.abs_upper();
            return Self::from_bounds(0.0, mul_up(hi, hi));
        }
        *self * *self
    }

    /// Reciprocal. Indeterminate if the ball contains zero.
    pub fn inv(&self) -> Arb {
        Self::one() / *self
    }
}

impl Add for Arb {
    type Output = Arb;

    fn add(self, rhs: Arb) -> Arb {
        let mid = self.mid + rhs.mid;
        let rad = add_up(add_up(self.rad, rhs.rad), rounding_error(mid));
        finish(mid, rad)
    }
}

impl Sub for Arb {
    type Output = Arb;

    fn sub(self, rhs: Arb) -> Arb {
        let mid = self.mid - rhs.mid;
        let rad = add_up(add_up(self.rad, rhs.rad), rounding_error(mid));
        finish(mid, rad)
    }
}

impl Mul for Arb {
    type Output = Arb;

    fn mul(self, rhs: Arb) -> Arb {
        let mid = self.mid * rhs.mid;
        // |xy - ab| <= |a| s + |b| r + r s
        let mut rad = add_up(
            mul_up(self.mid.abs(), rhs.rad),
            mul_up(rhs.mid.abs(), self.rad),
        );
        rad = add_up(rad, mul_up(self.rad, rhs.rad));
        rad = add_up(rad, rounding_error(mid));
        finish(mid, rad)
    }
}

impl Div for Arb {
    type Output = Arb;

    fn div(self, rhs: Arb) -> Arb {
        let denom_low = rhs.abs_lower();
        if !(denom_low > 0.0) || !self.is_finite() {
            return Self::indeterminate();
        }
        let mid = self.mid / rhs.mid;
        // |x/y - a/b| <= (r |b| + |a| s) / (|y|min |b|)
        let num = add_up(
            mul_up(self.rad, rhs.mid.abs()),
            mul_up(self.mid.abs(), rhs.rad),
        );
        let den = mul_down(denom_low, rhs.mid.abs());
        let rad = if num == 0.0 { 0.0 } else { div_up(num, den) };
        finish(mid, add_up(rad, rounding_error(mid)))
    }
}

impl Neg for Arb {
    type Output = Arb;

    fn neg(self) -> Arb {
        Arb {
            mid: -self.mid,
            rad: self.rad,
        }
    }
}

impl Zero for Arb {
    fn zero() -> Self {
        Self::exact(0.0)
    }

    fn is_zero(&self) -> bool {
        self.mid == 0.0 && self.rad == 0.0
    }
}

impl One for Arb {
    fn one() -> Self {
        Self::exact(1.0)
    }
}

impl From<f64> for Arb {
    fn from(x: f64) -> Self {
        Self::exact(x)
    }
}

impl From<i32> for Arb {
    fn from(n: i32) -> Self {
        Self::exact(f64::from(n))
    }
}

impl From<u32> for Arb {
    fn from(n: u32) -> Self {
        Self::exact(f64::from(n))
    }
}

impl Enclosure for Arb {
    fn indeterminate() -> Self {
        Arb::indeterminate()
    }

    fn is_finite(&self) -> bool {
        Arb::is_finite(self)
    }

    fn radius(&self) -> f64 {
        if Arb::is_finite(self) {
            self.rad
        } else {
            f64::INFINITY
        }
    }

    fn add_error(&self, err: f64) -> Self {
        Arb::add_error(self, err)
    }

    fn union(&self, other: &Self) -> Self {
        Arb::union(self, other)
    }

    fn overlaps(&self, other: &Self) -> bool {
        Arb::overlaps(self, other)
    }

    fn contains_zero(&self) -> bool {
        Arb::contains_zero(self)
    }
}

impl fmt::Display for Arb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_finite() {
            return write!(f, "[+/- inf]");
        }
        let digits = f.precision().unwrap_or(15);
        if self.rad == 0.0 {
            write!(f, "{:.*e}", digits, self.mid)
        } else {
            write!(f, "[{:.*e} +/- {:.2e}]", digits, self.mid, self.rad)
        }
    }
}
