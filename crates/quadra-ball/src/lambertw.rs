//! Principal branch of the Lambert W function.
//!
//! A floating-point estimate from Halley's iteration is verified with the
//! Krawczyk operator for `g(w) = w e^w - z`:
//!
//! ```text
//! K(W) = w* - y (w* e^{w*} - Z) + (1 - y e^W (1 + W)) (W - w*)
//! ```
//!
//! where `y ≈ 1 / g'(w*)`. If `K(W) ⊆ W` then every `z ∈ Z` has exactly one
//! root in `W`, and `K(W)` encloses it. A separate check confirms that `W`
//! lies inside the image of the principal branch.

use std::f64::consts::{E, FRAC_PI_2};

use num_complex::Complex64;
use num_traits::One;

use crate::acb::Acb;
use crate::arb::Arb;
use crate::mag::next_up;

/// `-1/e`, the branch point, rounded toward zero.
const BRANCH_POINT: f64 = -0.367_879_441_171_442_3;

const HALLEY_STEPS: usize = 64;
const KRAWCZYK_ATTEMPTS: usize = 8;

/// Floating-point estimate of `W₀(z)`.
fn estimate(z: Complex64) -> Complex64 {
    let mut w = initial_guess(z);
    for _ in 0..HALLEY_STEPS {
        let ew = w.exp();
        let f = w * ew - z;
        let wp1 = w + 1.0;
        let denom = ew * wp1 - (w + 2.0) * f / (2.0 * wp1);
        let step = f / denom;
        if !step.is_finite() {
            break;
        }
        w -= step;
        if step.norm() <= 1e-16 * (1.0 + w.norm()) {
            break;
        }
    }
    w
}

fn initial_guess(z: Complex64) -> Complex64 {
    let near_branch = z + 1.0 / E;
    if near_branch.norm() < 0.3 {
        let p = (2.0 * (E * z + 1.0)).sqrt();
        return -1.0 + p - p * p / 3.0 + 11.0 / 72.0 * p * p * p;
    }
    let r = z.norm();
    if r < 0.5 {
        z * (1.0 - z)
    } else if r > 3.0 {
        let l1 = z.ln();
        l1 - l1.ln()
    } else {
        (1.0 + z).ln()
    }
}

/// Returns true if every point of `w` is a value of the principal branch.
///
/// The boundary of the principal range is `x = -η cot η`, `|η| < π`. Over
/// `|η| ≤ 1` it stays at or left of `-1 + η²/2`, and over `|η| ≤ π/2` at or
/// left of the imaginary axis.
fn in_principal_range(w: &Acb) -> bool {
    let re_lo = w.re().lower();
    let im_hi = w.im().abs_upper();
    if re_lo > 0.0 && im_hi < FRAC_PI_2 {
        return true;
    }
    if re_lo > -0.6 && im_hi < 1.0 {
        return true;
    }
    im_hi < 1.0 && re_lo > -1.0 && re_lo + 1.0 > 0.5 * im_hi * im_hi
}

/// Runs the Krawczyk test around `w` for every `z` in `region`.
///
/// For a real region the candidate ball is kept on the real axis, where the
/// principal branch is real.
fn krawczyk(region: &Acb, w: Complex64, real: bool) -> Option<Acb> {
    let ew = w.exp();
    let y = (ew * (w + 1.0)).inv();
    if !y.is_finite() {
        return None;
    }

    let wc = Acb::from_complex(w);
    let yc = Acb::from_complex(y);
    let residual = wc * wc.exp() - *region;
    if !residual.is_finite() {
        return None;
    }
    let head = wc - yc * residual;

    let spread = residual.abs_upper() * y.norm();
    let mut r = (2.0 * spread).max(1e-14 * (1.0 + w.norm()));
    for _ in 0..KRAWCZYK_ATTEMPTS {
        let im = if real { Arb::exact(w.im) } else { Arb::new(w.im, r) };
        let ball = Acb::new(Arb::new(w.re, r), im);
        let slope = Acb::one() - yc * ball.exp() * (ball + Acb::one());
        let k = head + slope * (ball - wc);
        if k.is_finite() && ball.contains(&k) {
            return Some(k);
        }
        r = next_up(r * 4.0);
    }
    None
}

impl Acb {
    /// Principal branch `W₀` of the Lambert W function.
    ///
    /// Indeterminate if the region may touch the branch cut `(-∞, -1/e]` or
    /// if verification fails.
    pub fn lambertw(&self) -> Acb {
        if !self.is_finite() {
            return Acb::indeterminate();
        }
        if self.im().contains_zero() && self.re().lower() <= BRANCH_POINT {
            return Acb::indeterminate();
        }

        let real = self.is_real();
        let mut w = estimate(self.mid());
        if !w.is_finite() {
            return Acb::indeterminate();
        }
        if real {
            w.im = 0.0;
        }

        match krawczyk(self, w, real) {
            Some(k) if in_principal_range(&k) => {
                if real {
                    Acb::from_real(k.re())
                } else {
                    k
                }
            }
            _ => Acb::indeterminate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OMEGA: f64 = 0.567_143_290_409_783_8;

    #[test]
    fn test_lambertw_known_values() {
        let w1 = Acb::from(1.0).lambertw();
        assert!(w1.is_real());
        assert!(w1.re().contains_f64(OMEGA));
        assert!(w1.radius() < 1e-13);

        let we = Acb::from(E).lambertw();
        assert!(we.re().contains_f64(1.0));

        let w0 = Acb::from(0.0).lambertw();
        assert!(w0.re().contains_f64(0.0));
    }

    #[test]
    fn test_lambertw_large_argument() {
        let w = Acb::from(1000.0).lambertw();
        assert!(w.re().contains_f64(5.249_602_852_401_596));
    }

    #[test]
    fn test_lambertw_negative_real() {
        // W(-1/4) = -0.3574029561813889
        let w = Acb::from(-0.25).lambertw();
        assert!(w.is_finite());
        assert!(w.re().contains_f64(-0.357_402_956_181_388_9));
    }

    #[test]
    fn test_lambertw_complex() {
        let w = Acb::onei().lambertw();
        assert!(w.is_finite());
        let expected = Complex64::new(0.374_699_020_737_117_5, 0.576_412_723_031_435_3);
        assert!((w.mid() - expected).norm() < 1e-9);
        // w e^w = i
        let back = w * w.exp();
        assert!(back.contains_point(Complex64::new(0.0, 1.0)));
    }

    #[test]
    fn test_lambertw_on_cut_is_indeterminate() {
        assert!(!Acb::from(-1.0).lambertw().is_finite());
        let straddle = Acb::new(Arb::exact(-2.0), Arb::new(0.0, 0.1));
        assert!(!straddle.lambertw().is_finite());
    }

    #[test]
    fn test_lambertw_of_region() {
        let region = Acb::hull(Complex64::new(1.0, 0.0), Complex64::new(1.1, 0.0));
        let w = region.lambertw();
        assert!(w.is_finite());
        assert!(w.re().contains_f64(OMEGA));
        assert!(w.radius() < 0.05);

        let boxed = Acb::new(Arb::new(1.0, 0.01), Arb::new(0.5, 0.01));
        let wb = boxed.lambertw();
        assert!(wb.is_finite());
        assert!((wb * wb.exp()).contains(&Acb::from_f64(1.0, 0.5)));
    }
}
