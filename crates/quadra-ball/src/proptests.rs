//! Property-based containment tests for ball arithmetic.

#[cfg(test)]
mod tests {
    use num_complex::Complex64;
    use proptest::prelude::*;

    use crate::{Acb, Arb};

    // A ball together with a point strictly inside it
    fn ball_and_point() -> impl Strategy<Value = (Arb, f64)> {
        (-50.0f64..50.0, 1e-6f64..1.0, -0.99f64..0.99)
            .prop_map(|(mid, rad, t)| (Arb::new(mid, rad), mid + t * rad))
    }

    fn positive_ball_and_point() -> impl Strategy<Value = (Arb, f64)> {
        (2.0f64..50.0, 1e-6f64..1.0, -0.99f64..0.99)
            .prop_map(|(mid, rad, t)| (Arb::new(mid, rad), mid + t * rad))
    }

    fn small_ball_and_point() -> impl Strategy<Value = (Arb, f64)> {
        (-5.0f64..5.0, 1e-6f64..0.5, -0.99f64..0.99)
            .prop_map(|(mid, rad, t)| (Arb::new(mid, rad), mid + t * rad))
    }

    fn complex_ball_and_point() -> impl Strategy<Value = (Acb, Complex64)> {
        (small_ball_and_point(), small_ball_and_point())
            .prop_map(|((re, x), (im, y))| (Acb::new(re, im), Complex64::new(x, y)))
    }

    proptest! {
        #[test]
        fn add_mul_contain_pointwise((a, x) in ball_and_point(), (b, y) in ball_and_point()) {
            prop_assert!((a + b).contains_f64(x + y));
            prop_assert!((a - b).contains_f64(x - y));
            prop_assert!((a * b).contains_f64(x * y));
        }

        #[test]
        fn div_contains_pointwise((a, x) in ball_and_point(), (b, y) in positive_ball_and_point()) {
            prop_assert!((a / b).contains_f64(x / y));
        }

        #[test]
        fn ln_contains_pointwise((a, x) in positive_ball_and_point()) {
            prop_assert!(a.ln().contains_f64(x.ln()));
            prop_assert!(a.sqrt().contains_f64(x.sqrt()));
        }

        #[test]
        fn exp_contains_pointwise((a, x) in small_ball_and_point()) {
            prop_assert!(a.exp().contains_f64(x.exp()));
            prop_assert!(a.cosh().contains_f64(x.cosh()));
        }

        #[test]
        fn trig_contains_pointwise((a, x) in ball_and_point()) {
            prop_assert!(a.sin().contains_f64(x.sin()));
            prop_assert!(a.cos().contains_f64(x.cos()));
            prop_assert!(a.atan().contains_f64(x.atan()));
        }

        #[test]
        fn union_contains_both((a, x) in ball_and_point(), (b, y) in ball_and_point()) {
            let u = a.union(&b);
            prop_assert!(u.contains_f64(x));
            prop_assert!(u.contains_f64(y));
        }

        #[test]
        fn complex_mul_contains_pointwise((a, z) in complex_ball_and_point(), (b, w) in complex_ball_and_point()) {
            prop_assert!((a * b).contains_point(z * w));
            prop_assert!((a + b).contains_point(z + w));
        }

        #[test]
        fn complex_exp_sin_contain_pointwise((a, z) in complex_ball_and_point()) {
            prop_assert!(a.exp().contains_point(z.exp()));
            prop_assert!(a.sin().contains_point(z.sin()));
        }
    }
}
