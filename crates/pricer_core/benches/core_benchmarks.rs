//! Criterion benchmarks for pricer_core root finders.
//!
//! Measures Newton-Raphson against bisection on smooth and kinked targets,
//! and the cost of geometric bracket expansion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::math::solvers::{
    BisectionSolver, BracketConfig, NewtonRaphsonSolver, SolverConfig,
};

/// Benchmark Newton-Raphson on a cubic for several starting points.
fn bench_newton(c: &mut Criterion) {
    let mut group = c.benchmark_group("newton_raphson");
    let solver = NewtonRaphsonSolver::new(SolverConfig::new(1e-12, 50));

    for x0 in [1.0_f64, 3.0, 10.0] {
        group.bench_with_input(BenchmarkId::new("cubic", x0), &x0, |b, &x0| {
            b.iter(|| {
                solver
                    .find_root(|x: f64| x.powi(3) - 8.0, |x| 3.0 * x * x, black_box(x0))
                    .unwrap()
            });
        });
    }

    group.bench_function("bounded_sqrt2", |b| {
        b.iter(|| {
            solver
                .find_root_bounded(
                    |x: f64| x * x - 2.0,
                    |x| 2.0 * x,
                    black_box(4.0),
                    1e-6,
                    5.0,
                )
                .unwrap()
        });
    });

    group.finish();
}

/// Benchmark bisection at several tolerances on a piecewise-linear target.
fn bench_bisection(c: &mut Criterion) {
    let mut group = c.benchmark_group("bisection");
    let kinked = |x: f64| (x - 95.0).max(0.0) - 2.0 * (x - 105.0).max(0.0) - 3.0;

    for tol in [1e-6_f64, 1e-10, 1e-14] {
        let solver = BisectionSolver::new(SolverConfig::new(tol, 200));
        group.bench_with_input(BenchmarkId::new("kinked", tol), &solver, |b, solver| {
            b.iter(|| solver.find_root(kinked, black_box(90.0), black_box(105.0)).unwrap());
        });
    }

    let solver = BisectionSolver::<f64>::with_defaults();
    group.bench_function("expand_upper", |b| {
        b.iter(|| {
            solver
                .expand_upper(
                    |x: f64| x - 3.7,
                    0.0,
                    black_box(0.01),
                    BracketConfig::default(),
                )
                .unwrap()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_newton, bench_bisection);
criterion_main!(benches);
