//! Directed rounding for radius arithmetic.
//!
//! Radii are plain `f64` upper bounds. The hardware rounds to nearest, so
//! every operation on a radius is followed by a step to the next representable
//! value in the required direction; one step always covers the half-ulp
//! round-to-nearest error. Sums and differences recover their exact rounding
//! error and only step when the result was rounded the wrong way.

/// Relative error of a single round-to-nearest operation (2⁻⁵³).
pub const UNIT_ROUNDOFF: f64 = f64::EPSILON / 2.0;

/// Relative error allowed for platform `libm` transcendentals (2⁻⁵⁰).
pub const LIBM_ERROR: f64 = f64::EPSILON * 4.0;

/// Smallest positive subnormal, 2⁻¹⁰⁷⁴.
pub const TINY: f64 = 5e-324;

/// Returns the smallest `f64` strictly greater than `x`.
#[inline]
pub fn next_up(x: f64) -> f64 {
    if x.is_nan() || x == f64::INFINITY {
        return x;
    }
    if x == 0.0 {
        return TINY;
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

/// Returns the largest `f64` strictly less than `x`.
#[inline]
pub fn next_down(x: f64) -> f64 {
    -next_up(-x)
}

/// Exact error `(a + b) - s` of the rounded sum `s = a + b`.
///
/// Valid whenever `s` is finite.
#[inline]
fn two_sum_error(a: f64, b: f64, s: f64) -> f64 {
    let bb = s - a;
    (a - (s - bb)) + (b - bb)
}

#[inline]
pub fn add_up(a: f64, b: f64) -> f64 {
    let s = a + b;
    if s.is_finite() && two_sum_error(a, b, s) <= 0.0 {
        s
    } else {
        next_up(s)
    }
}

#[inline]
pub fn add_down(a: f64, b: f64) -> f64 {
    let s = a + b;
    if s.is_finite() && two_sum_error(a, b, s) >= 0.0 {
        s
    } else {
        next_down(s)
    }
}

#[inline]
pub fn sub_up(a: f64, b: f64) -> f64 {
    add_up(a, -b)
}

#[inline]
pub fn sub_down(a: f64, b: f64) -> f64 {
    add_down(a, -b)
}

#[inline]
pub fn mul_up(a: f64, b: f64) -> f64 {
    next_up(a * b)
}

#[inline]
pub fn mul_down(a: f64, b: f64) -> f64 {
    next_down(a * b)
}

#[inline]
pub fn div_up(a: f64, b: f64) -> f64 {
    next_up(a / b)
}

#[inline]
pub fn div_down(a: f64, b: f64) -> f64 {
    next_down(a / b)
}

/// Upper bound for `sqrt(x)`; `sqrt` is correctly rounded.
#[inline]
pub fn sqrt_up(x: f64) -> f64 {
    next_up(x.sqrt())
}

/// Power of two that keeps the squares of numbers near `m` in range.
fn hypot_scale(m: f64) -> f64 {
    if m > 2f64.powi(500) {
        2f64.powi(-600)
    } else if m > 0.0 && m < 2f64.powi(-500) {
        2f64.powi(600)
    } else {
        1.0
    }
}

/// Upper bound for `sqrt(a² + b²)` with `a, b ≥ 0`.
pub fn hypot_up(a: f64, b: f64) -> f64 {
    let m = a.max(b);
    if m == f64::INFINITY {
        return f64::INFINITY;
    }
    let s = hypot_scale(m);
    if s != 1.0 {
        return div_up(hypot_up(mul_up(a, s), mul_up(b, s)), s);
    }
    sqrt_up(add_up(mul_up(a, a), mul_up(b, b)))
}

/// Lower bound for `sqrt(a² + b²)` with `a, b ≥ 0`.
pub fn hypot_down(a: f64, b: f64) -> f64 {
    let m = a.max(b);
    let s = hypot_scale(m);
    if s != 1.0 && m.is_finite() {
        let r = hypot_down(mul_down(a, s).max(0.0), mul_down(b, s).max(0.0));
        return div_down(r, s).max(0.0);
    }
    let sum = add_down(mul_down(a, a), mul_down(b, b));
    if sum <= 0.0 {
        0.0
    } else {
        next_down(sum.sqrt()).max(0.0)
    }
}

/// Bound on the error of a round-to-nearest result `m` of one basic operation.
///
/// The absolute term covers results that land in the subnormal range.
#[inline]
pub fn rounding_error(m: f64) -> f64 {
    add_up(mul_up(m.abs(), UNIT_ROUNDOFF), TINY)
}

/// Bound on the error of a `libm` transcendental returning `v`.
#[inline]
pub fn libm_error(v: f64) -> f64 {
    add_up(mul_up(v.abs(), LIBM_ERROR), TINY)
}
