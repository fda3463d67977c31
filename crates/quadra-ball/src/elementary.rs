//! Elementary functions of real balls.
//!
//! Monotone functions are enclosed by evaluating at both endpoints and
//! widening each endpoint by the `libm` error allowance. `sin` and `cos` use
//! the Lipschitz bound `|f(x) - f(m)| ≤ min(|x - m|, 2)` around the midpoint.

use crate::arb::Arb;
use crate::mag::{add_up, libm_error, sub_down};

/// Encloses an increasing function on `[lo, hi]`.
fn increasing(lo: f64, hi: f64, f: impl Fn(f64) -> f64) -> Arb {
    let a = f(lo);
    let b = f(hi);
    Arb::from_bounds(sub_down(a, libm_error(a)), add_up(b, libm_error(b)))
}

/// Encloses a decreasing function on `[lo, hi]`.
fn decreasing(lo: f64, hi: f64, f: impl Fn(f64) -> f64) -> Arb {
    let a = f(hi);
    let b = f(lo);
    Arb::from_bounds(sub_down(a, libm_error(a)), add_up(b, libm_error(b)))
}

/// Encloses a function bounded by 1 in magnitude with Lipschitz constant 1.
fn lipschitz_unit(x: &Arb, f: impl Fn(f64) -> f64) -> Arb {
    if !x.is_finite() {
        return Arb::indeterminate();
    }
    let m = f(x.mid());
    let rad = add_up(x.rad().min(2.0), libm_error(m));
    Arb::new(m, rad)
}

impl Arb {
    pub fn exp(&self) -> Arb {
        if !self.is_finite() {
            return Arb::indeterminate();
        }
        increasing(self.lower(), self.upper(), f64::exp)
    }

    /// Natural logarithm. Indeterminate unless the ball is strictly positive.
    pub fn ln(&self) -> Arb {
        if !self.is_positive() {
            return Arb::indeterminate();
        }
        increasing(self.lower(), self.upper(), f64::ln)
    }

    /// Square root. Indeterminate if the ball is entirely negative;
    /// a ball straddling zero is clipped to its nonnegative part.
    pub fn sqrt(&self) -> Arb {
        if !self.is_finite() || self.is_negative() {
            return Arb::indeterminate();
        }
        let lo = self.lower().max(0.0);
        let r = increasing(lo, self.upper(), f64::sqrt);
        if lo == 0.0 {
            Arb::from_bounds(0.0, r.upper())
        } else {
            r
        }
    }

    pub fn sin(&self) -> Arb {
        lipschitz_unit(self, f64::sin)
    }

    pub fn cos(&self) -> Arb {
        lipschitz_unit(self, f64::cos)
    }

    pub fn sinh(&self) -> Arb {
        if !self.is_finite() {
            return Arb::indeterminate();
        }
        increasing(self.lower(), self.upper(), f64::sinh)
    }

    pub fn cosh(&self) -> Arb {
        if !self.is_finite() {
            return Arb::indeterminate();
        }
        let (lo, hi) = (self.lower(), self.upper());
        if self.is_positive() {
            increasing(lo, hi, f64::cosh)
        } else if self.is_negative() {
            decreasing(lo, hi, f64::cosh)
        } else {
            let top = lo.cosh().max(hi.cosh());
            Arb::from_bounds(1.0, add_up(top, libm_error(top)))
        }
    }

    pub fn atan(&self) -> Arb {
        if !self.is_finite() {
            return Arb::indeterminate();
        }
        increasing(self.lower(), self.upper(), f64::atan)
    }

    /// Floor. Exact when the ball lies between two consecutive integers.
    pub fn floor(&self) -> Arb {
        if !self.is_finite() {
            return Arb::indeterminate();
        }
        Arb::from_bounds(self.lower().floor(), self.upper().floor())
    }
}
