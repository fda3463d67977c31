//! Holomorphic extensions of piecewise real functions.
//!
//! Each helper is analytic away from a known locus. On an
//! [`Request::AnalyticityProbe`] whose region meets that locus the result is
//! the indeterminate ball, which makes the evaluator subdivide instead of
//! trusting a high-degree rule. Plain value requests always get a valid
//! enclosure.

use quadra_ball::{const_e, Acb};
use quadra_calc::Request;

/// `|x|` extended as `z` on the right half plane and `-z` on the left.
///
/// Non-analytic on the imaginary axis.
pub fn abs(z: &Acb, request: Request) -> Acb {
    if !z.is_finite() || (request.is_probe() && z.re().contains_zero()) {
        return Acb::indeterminate();
    }
    if z.re().is_nonnegative() {
        *z
    } else if z.re().is_negative() {
        -*z
    } else {
        z.union(&-*z)
    }
}

/// `⌊x⌋` extended to vertical strips: `⌊Re z⌋ + i Im z`.
///
/// Non-analytic on the lines `Re z = n` for integers `n`.
pub fn floor(z: &Acb, request: Request) -> Acb {
    if !z.is_finite() || (request.is_probe() && z.re().contains_int()) {
        return Acb::indeterminate();
    }
    Acb::new(z.re().floor(), z.im())
}

/// Principal square root. Non-analytic on `(-∞, 0]`.
pub fn sqrt(z: &Acb, request: Request) -> Acb {
    if !z.is_finite() || (request.is_probe() && z.touches_negative_axis()) {
        return Acb::indeterminate();
    }
    z.sqrt()
}

/// Principal logarithm. Non-analytic on `(-∞, 0]`.
pub fn log(z: &Acb, request: Request) -> Acb {
    if !z.is_finite() || (request.is_probe() && z.touches_negative_axis()) {
        return Acb::indeterminate();
    }
    z.ln()
}

/// Principal branch `W₀`. Non-analytic on `(-∞, -1/e]`.
pub fn lambertw(z: &Acb, request: Request) -> Acb {
    if !z.is_finite() {
        return Acb::indeterminate();
    }
    if request.is_probe() {
        let shifted = *z + Acb::from_real(const_e().inv());
        if shifted.touches_negative_axis() {
            return Acb::indeterminate();
        }
    }
    z.lambertw()
}
