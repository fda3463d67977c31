//! Property-based tests for the quadrature engine.

#[cfg(test)]
mod tests {
    use num_complex::Complex64;
    use proptest::prelude::*;
    use quadra_ball::{Acb, Arb};

    use crate::{integrate, GaussLegendreRule, Holomorphic, IntegrationOptions};

    fn endpoint() -> impl Strategy<Value = f64> {
        -4.0f64..4.0
    }

    fn coefficient() -> impl Strategy<Value = f64> {
        -10.0f64..10.0
    }

    // `x` is a closed form evaluated in f64 from terms of total size `scale`;
    // widen by a bound on its rounding before testing containment
    fn near(value: Arb, x: f64, scale: f64) -> bool {
        value.add_error(32.0 * f64::EPSILON * scale).contains_f64(x)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn quadratic_integrals_are_enclosed(
            a in endpoint(),
            len in 0.1f64..4.0,
            c0 in coefficient(),
            c1 in coefficient(),
            c2 in coefficient(),
        ) {
            let b = a + len;
            let f = Holomorphic(move |z: &Acb| {
                Acb::from(c0) + z.scale(Arb::exact(c1)) + z.sqr().scale(Arb::exact(c2))
            });
            let r = integrate(
                &f,
                &(),
                Complex64::new(a, 0.0),
                Complex64::new(b, 0.0),
                40,
                1e-9,
                &IntegrationOptions::default(),
                53,
            )
            .unwrap();
            let antiderivative = |x: f64| c0 * x + c1 * x * x / 2.0 + c2 * x * x * x / 3.0;
            let size = |x: f64| {
                c0.abs() * x.abs() + c1.abs() * x * x / 2.0 + c2.abs() * (x * x * x).abs() / 3.0
            };
            prop_assert!(r.is_converged());
            prop_assert!(r.value.radius() <= 1e-9);
            prop_assert!(near(
                r.value.re(),
                antiderivative(b) - antiderivative(a),
                size(a) + size(b),
            ));
        }

        #[test]
        fn exponential_integrals_are_enclosed(
            a in endpoint(),
            len in 0.1f64..3.0,
            lambda in -2.0f64..2.0,
        ) {
            prop_assume!(lambda.abs() > 0.05);
            let b = a + len;
            let f = Holomorphic(move |z: &Acb| z.scale(Arb::exact(lambda)).exp());
            let r = integrate(
                &f,
                &(),
                Complex64::new(a, 0.0),
                Complex64::new(b, 0.0),
                30,
                0.0,
                &IntegrationOptions::default().with_heap(true),
                53,
            )
            .unwrap();
            let exact = ((lambda * b).exp() - (lambda * a).exp()) / lambda;
            let size = ((lambda * b).exp() + (lambda * a).exp()) / lambda.abs();
            prop_assert!(r.is_converged());
            prop_assert!(r.value.radius() <= exact.abs() * 1e-9);
            prop_assert!(near(r.value.re(), exact, size));
        }

        #[test]
        fn rule_weights_sum_to_two(n in 1usize..48) {
            let rule = GaussLegendreRule::new(n).unwrap();
            let total = rule.weights().iter().fold(Arb::exact(0.0), |acc, w| acc + *w);
            prop_assert!(near(total, 2.0, 2.0));
        }
    }
}
