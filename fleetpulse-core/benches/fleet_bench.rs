//! Criterion benchmarks for FleetPulse hot paths.
//!
//! Benchmarks:
//! 1. Fleet tick (default roster and a scaled-up roster)
//! 2. Market history generation
//! 3. Opportunity model training and single-scenario prediction

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use fleetpulse_core::domain::{TruckId, TruckStatus};
use fleetpulse_core::fleet::{default_roster, FleetSimulator, FleetState, SimulationConfig};
use fleetpulse_core::market::generate;
use fleetpulse_core::model::{ModelConfig, OpportunityModel, OpportunityQuery};
use fleetpulse_core::rng::SeededRandom;

// ── Helpers ──────────────────────────────────────────────────────────

/// `n` active trucks cloned from the first roster entry.
fn large_fleet(n: usize) -> FleetState {
    let template = default_roster()[0].clone();
    let trucks = (0..n)
        .map(|i| {
            let mut t = template.clone();
            t.id = TruckId::new(format!("BENCH-{i:05}"));
            t.status = TruckStatus::Active;
            t
        })
        .collect();
    FleetState::new(trucks)
}

// ── 1. Fleet tick ────────────────────────────────────────────────────

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("fleet_tick");

    group.bench_function("default_roster", |b| {
        let mut fleet = FleetState::seeded();
        let mut sim = FleetSimulator::new(SimulationConfig::default(), SeededRandom::new(42));
        b.iter(|| sim.tick(black_box(&mut fleet)));
    });

    for &size in &[100, 1_000] {
        group.bench_with_input(BenchmarkId::new("active_trucks", size), &size, |b, &size| {
            let mut fleet = large_fleet(size);
            let mut sim = FleetSimulator::new(SimulationConfig::default(), SeededRandom::new(42));
            b.iter(|| sim.tick(black_box(&mut fleet)));
        });
    }

    group.finish();
}

// ── 2. Market generation ─────────────────────────────────────────────

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("market_generate");
    for &n in &[1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| generate(black_box(n), 42));
        });
    }
    group.finish();
}

// ── 3. Opportunity model ─────────────────────────────────────────────

fn bench_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("opportunity_model");
    group.sample_size(10);

    let data = generate(1000, 42);
    group.bench_function("train_1000_records", |b| {
        b.iter(|| OpportunityModel::trained(ModelConfig::default(), black_box(&data)));
    });

    let model = OpportunityModel::trained(ModelConfig::default(), &data).unwrap();
    let query = OpportunityQuery::default();
    group.bench_function("predict_dashboard_scenario", |b| {
        b.iter(|| model.predict_query(black_box(&query)));
    });

    group.finish();
}

criterion_group!(benches, bench_tick, bench_generate, bench_model);
criterion_main!(benches);
