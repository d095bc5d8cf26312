// Copyright 2025 the Tangent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `tangent_calculus`.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use tangent_calculus::{
    FunctionId, Integrator, RiemannSum, RuleEngine, SamplingPolicy, TheoremConfig, TheoremForm,
    TheoremSolver,
};
use tangent_view::Interval;

fn bench_integrate(c: &mut Criterion) {
    let interval = Interval::new(-2.0, 3.0).unwrap();
    let mut group = c.benchmark_group("calculus/integrate");
    for n in [100_usize, 1_000, 10_000] {
        let integrator = Integrator::new(n).unwrap();
        group.bench_function(BenchmarkId::new("gaussian", n), |b| {
            b.iter(|| black_box(integrator.integrate(&FunctionId::Gaussian, black_box(interval))))
        });
    }
    let integrator = Integrator::default();
    group.bench_function("checked/sine", |b| {
        b.iter(|| black_box(integrator.integrate_checked(&FunctionId::Sine, black_box(interval))))
    });
    group.finish();
}

fn bench_theorem(c: &mut Criterion) {
    let interval = Interval::new(0.0, 2.0).unwrap();
    let solver = TheoremSolver::new(Integrator::default(), TheoremConfig::default()).unwrap();
    let mut group = c.benchmark_group("calculus/theorem");
    for form in [TheoremForm::Integral, TheoremForm::Derivative] {
        group.bench_function(BenchmarkId::new("cube", format!("{form:?}")), |b| {
            b.iter(|| black_box(solver.solve(&FunctionId::Cube, black_box(interval), form)))
        });
    }
    group.finish();
}

fn bench_riemann(c: &mut Criterion) {
    let interval = Interval::new(0.0, 4.0).unwrap();
    let mut group = c.benchmark_group("calculus/riemann");
    for n in [8_usize, 64, 512] {
        group.bench_function(BenchmarkId::new("midpoint", n), |b| {
            b.iter(|| {
                black_box(
                    RiemannSum::new(&FunctionId::SquareRoot, interval, n, SamplingPolicy::Midpoint)
                        .map(|sum| sum.area()),
                )
            })
        });
    }
    group.finish();
}

fn bench_antiderivative(c: &mut Criterion) {
    let engine = RuleEngine::default();
    let mut group = c.benchmark_group("calculus/antiderivative");
    group.bench_function("rule/cosine", |b| {
        b.iter(|| black_box(engine.calculate(black_box(FunctionId::Cosine))))
    });
    group.bench_function("numeric/gaussian", |b| {
        b.iter(|| black_box(engine.calculate(black_box(FunctionId::Gaussian))))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_integrate,
    bench_theorem,
    bench_riemann,
    bench_antiderivative
);
criterion_main!(benches);
