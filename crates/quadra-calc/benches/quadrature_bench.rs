//! Benchmarks for the quadrature engine.
//!
//! Includes:
//! - Certified Gauss–Legendre rule construction
//! - Adaptive integration of smooth and piecewise integrands

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use num_complex::Complex64;

use quadra_ball::{Acb, Arb};
use quadra_calc::{
    integrate, ContractViolation, GaussLegendreRule, Holomorphic, IntegrationOptions, Request,
};

fn real(x: f64) -> Complex64 {
    Complex64::new(x, 0.0)
}

/// Benchmark rule construction by degree.
fn bench_rule_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("gauss_legendre_rule");

    for n in [8, 32, 86] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(GaussLegendreRule::new(n)))
        });
    }

    group.finish();
}

/// Benchmark adaptive integration.
fn bench_integrate(c: &mut Criterion) {
    let mut group = c.benchmark_group("integrate");
    let opts = IntegrationOptions::default();

    let arctan = Holomorphic(|z: &Acb| (Acb::from(1.0) + z.sqr()).inv().scale(Arb::from(4)));
    group.bench_function("four_over_one_plus_x2", |b| {
        b.iter(|| black_box(integrate(&arctan, &(), real(0.0), real(1.0), 40, 0.0, &opts, 53)))
    });

    let oscillating = Holomorphic(|z: &Acb| z.sin());
    group.bench_function("sin_0_100", |b| {
        b.iter(|| {
            black_box(integrate(&oscillating, &(), real(0.0), real(100.0), 40, 0.0, &opts, 53))
        })
    });

    let floor = |z: &Acb, r: Request, _: &(), _: u32| -> Result<Acb, ContractViolation> {
        if r.is_probe() && z.re().contains_int() {
            return Ok(Acb::indeterminate());
        }
        Ok(Acb::from_real(z.re().floor()))
    };
    for heap in [false, true] {
        let opts = IntegrationOptions::default().with_heap(heap);
        group.bench_with_input(BenchmarkId::new("floor_1_11", heap), &heap, |b, _| {
            b.iter(|| black_box(integrate(&floor, &(), real(1.0), real(11.0), 30, 0.0, &opts, 53)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rule_construction, bench_integrate);
criterion_main!(benches);
