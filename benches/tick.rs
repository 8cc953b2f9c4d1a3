//! Tick and derivative benchmarks

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use connor_stevens_sim::config::ModelParameters;
use connor_stevens_sim::driver::{HostModel, TickDriver};
use connor_stevens_sim::kinetics::{StabilityReport, VoltageWindow};
use connor_stevens_sim::model::{ConnorStevensModel, IntegrationMethod};

fn bench_tick(c: &mut Criterion) {
    // 1 ms period at 40 kHz: 40 sub-steps per tick
    let mut driver = TickDriver::new(ModelParameters::default(), Duration::from_millis(1));

    c.bench_function("tick_1ms_euler", |b| {
        b.iter(|| driver.on_tick(black_box(0.0)))
    });
}

fn bench_tick_rk4(c: &mut Criterion) {
    let mut driver = TickDriver::new(ModelParameters::default(), Duration::from_millis(1))
        .with_method(IntegrationMethod::RungeKutta4);

    c.bench_function("tick_1ms_rk4", |b| {
        b.iter(|| driver.on_tick(black_box(0.0)))
    });
}

fn bench_derivatives(c: &mut Criterion) {
    let model = ConnorStevensModel::new(ModelParameters::default());
    let state = model.resting_state();

    c.bench_function("derivatives", |b| {
        b.iter(|| model.derivatives(black_box(&state), black_box(0.0)))
    });
}

fn bench_stability_scan(c: &mut Criterion) {
    let window = VoltageWindow::default();

    c.bench_function("stability_scan", |b| {
        b.iter(|| StabilityReport::scan(black_box(&window)))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_tick_rk4,
    bench_derivatives,
    bench_stability_scan
);
criterion_main!(benches);
