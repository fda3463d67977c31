//! Mathematical constants as one-ulp enclosures.

use std::f64::consts::{E, LN_2, PI};

use crate::acb::Acb;
use crate::arb::Arb;
use crate::mag::rounding_error;

/// Encloses a constant from its correctly rounded `f64` value.
fn nearest(x: f64) -> Arb {
    Arb::new(x, rounding_error(x))
}

/// π
pub fn const_pi() -> Arb {
    nearest(PI)
}

/// Euler's number e.
pub fn const_e() -> Arb {
    nearest(E)
}

/// log 2
pub fn const_log2() -> Arb {
    nearest(LN_2)
}

/// 2πi, the factor that turns a closed contour integral into a residue sum.
pub fn const_two_pi_i() -> Acb {
    Acb::new(Arb::exact(0.0), const_pi().mul_2exp(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_are_tight() {
        assert!(const_pi().contains_f64(PI));
        assert!(const_pi().rad() < 1e-15);
        assert!(const_e().contains_f64(E));
        assert!(const_log2().contains_f64(LN_2));
        assert!(const_two_pi_i().im().contains_f64(2.0 * PI));
    }
}
