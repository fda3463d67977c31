//! The Riemann zeta function by Euler–Maclaurin summation.
//!
//! For `σ = Re s`:
//!
//! ```text
//! ζ(s) = Σ_{k=1}^{N} k^{-s} + N^{1-s}/(s-1) - N^{-s}/2
//!      + Σ_{j=1}^{M} B_{2j}/(2j)! · (s)_{2j-1} · N^{1-s-2j} + R
//! |R| ≤ |(s)_{2M+1}| · 4/(2π)^{2M+1} · N^{-σ-2M} / (σ + 2M)
//! ```
//!
//! The remainder uses `|B̃_n(x)| ≤ 2·n!·ζ(n)/(2π)^n` on the periodic Bernoulli
//! function, valid for `σ + 2M > 0`.

use num_traits::{One, Zero};

use crate::acb::Acb;
use crate::arb::Arb;
use crate::consts::const_pi;
use crate::traits::Enclosure;

/// Number of terms summed directly.
const DIRECT_TERMS: u32 = 16;

/// Number of Euler–Maclaurin correction terms.
const CORRECTIONS: u32 = 10;

/// B_{2j} for j = 1..=10 as exact (numerator, denominator) pairs.
const BERNOULLI: [(f64, f64); 10] = [
    (1.0, 6.0),
    (-1.0, 30.0),
    (1.0, 42.0),
    (-1.0, 30.0),
    (5.0, 66.0),
    (-691.0, 2730.0),
    (7.0, 6.0),
    (-3617.0, 510.0),
    (43867.0, 798.0),
    (-174611.0, 330.0),
];

impl Acb {
    /// Riemann zeta function.
    ///
    /// Indeterminate when the region may contain the pole at `s = 1` or
    /// reaches far enough left that the remainder bound is unavailable.
    pub fn zeta(&self) -> Acb {
        if !self.is_finite() {
            return Acb::indeterminate();
        }
        let s = *self;
        let one = Acb::one();
        let s_minus_one = s - one;
        if s_minus_one.contains_zero() {
            return Acb::indeterminate();
        }

        let depth = Arb::from(2 * CORRECTIONS);
        let sigma_shift = Arb::exact(s.re().lower()) + depth;
        if !sigma_shift.is_positive() {
            return Acb::indeterminate();
        }

        let n = Arb::from(DIRECT_TERMS);
        let ln_n = n.ln();
        let neg_s = -s;

        let mut sum = Acb::zero();
        for k in 1..=DIRECT_TERMS {
            sum = sum + neg_s.scale(Arb::from(k).ln()).exp();
        }

        let n_pow = neg_s.scale(ln_n).exp();
        sum = sum + n_pow.scale(n) / s_minus_one;
        sum = sum - n_pow.mul_2exp(-1);

        let inv_n2 = (n * n).inv();
        let mut poch = s;
        let mut power = n_pow.scale(n.inv());
        let mut factorial = Arb::from(2);
        for (j, &(num, den)) in (1..=CORRECTIONS).zip(BERNOULLI.iter()) {
            let coeff = Arb::exact(num) / (Arb::exact(den) * factorial);
            sum = sum + (poch * power).scale(coeff);

            let two_j = f64::from(2 * j);
            poch = poch * (s + Acb::from(two_j - 1.0)) * (s + Acb::from(two_j));
            power = power.scale(inv_n2);
            factorial = factorial * Arb::exact((two_j + 1.0) * (two_j + 2.0));
        }

        // poch is now (s)_{2M+1}
        let two_pi = const_pi().mul_2exp(1);
        let tail = Arb::exact(poch.abs_upper()) * Arb::from(4)
            / Enclosure::pow(&two_pi, 2 * CORRECTIONS + 1)
            * (-(sigma_shift * ln_n)).exp()
            / sigma_shift;
        if !tail.is_finite() {
            return Acb::indeterminate();
        }

        sum.add_error(tail.upper())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use std::f64::consts::PI;

    #[test]
    fn test_zeta_two() {
        let z = Acb::from(2.0).zeta();
        assert!(z.re().contains_f64(PI * PI / 6.0));
        assert!(z.radius() < 1e-12);
    }

    #[test]
    fn test_zeta_zero_and_negative() {
        let z0 = Acb::from(0.0).zeta();
        assert!(z0.re().contains_f64(-0.5));
        let zm1 = Acb::from(-1.0).zeta();
        assert!(zm1.re().contains_f64(-1.0 / 12.0));
        assert!(zm1.radius() < 1e-10);
    }

    #[test]
    fn test_zeta_first_zero() {
        // The first nontrivial zero lies near 1/2 + 14.134725i.
        let rho = Acb::from_f64(0.5, 14.134_725_141_734_693);
        let z = rho.zeta();
        assert!(z.is_finite());
        assert!(z.abs_upper() < 1e-6);
    }

    #[test]
    fn test_zeta_pole_is_indeterminate() {
        let around_one = Acb::hull(Complex64::new(0.5, 0.0), Complex64::new(1.5, 0.0));
        assert!(!around_one.zeta().is_finite());
    }

    #[test]
    fn test_zeta_region_contains_points() {
        let region = Acb::hull(Complex64::new(2.0, -0.1), Complex64::new(2.2, 0.1));
        let z = region.zeta();
        assert!(z.is_finite());
        assert!(z.re().contains_f64(PI * PI / 6.0));
    }
}
