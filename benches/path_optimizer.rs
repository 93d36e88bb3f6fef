//! Criterion benchmarks for the aggregation hot paths.
//!
//! Benchmarks:
//! 1. Fill forest construction
//! 2. Baseline selection
//! 3. Bounded path search at increasing run limits
//! 4. Full `improve_sell` call against an in-memory sampler

#![allow(clippy::unwrap_used, clippy::expect_used, missing_docs)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ethers::types::Address;
use liquidity_aggregator::application::services::baseline::select_baseline;
use liquidity_aggregator::application::services::path_optimizer::PathOptimizer;
use liquidity_aggregator::domain::services::FillForestBuilder;
use liquidity_aggregator::domain::value_objects::{
    OrderId, Sample, Timestamp, TradeSide, VenueId, VenueSamples,
};
use liquidity_aggregator::infrastructure::sampler::StaticSampler;
use liquidity_aggregator::{
    ImproveOptions, LiquidityAggregator, NativeOrder, VenueCatalog, VenueConfig,
};
use rust_decimal::Decimal;
use std::hint::black_box;
use std::sync::Arc;

// ── Helpers ──────────────────────────────────────────────────────────

fn make_orders(n: i64) -> Vec<NativeOrder> {
    (0..n)
        .map(|i| {
            NativeOrder::new(
                OrderId::new_v4(),
                Address::zero(),
                Address::from_low_u64_be(1),
                Address::from_low_u64_be(2),
                Decimal::new(1_000 + (i * 37) % 200, 0),
                Decimal::new(1_000, 0),
                Timestamp::from_secs(1_900_000_000).unwrap(),
            )
            .unwrap()
        })
        .collect()
}

/// Concave curves: each venue's marginal rate decays per sample.
fn make_curves(venues: usize, samples: i64) -> Vec<(VenueId, Vec<Sample>)> {
    (0..venues)
        .map(|v| {
            let mut output = 0;
            let curve = (1..=samples)
                .map(|k| {
                    output += 1_150 - k * 20 - v as i64 * 7;
                    Sample::new(Decimal::new(k * 1_000, 0), Decimal::new(output, 0))
                })
                .collect();
            (VenueId::new(format!("venue-{v}")), curve)
        })
        .collect()
}

fn venue_samples(curves: &[(VenueId, Vec<Sample>)]) -> Vec<VenueSamples> {
    curves
        .iter()
        .map(|(id, curve)| VenueSamples::new(id.clone(), curve.clone()))
        .collect()
}

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_forest(c: &mut Criterion) {
    let orders = make_orders(16);
    let fillable: Vec<Decimal> = orders.iter().map(NativeOrder::taker_amount).collect();
    let venues = venue_samples(&make_curves(4, 8));

    c.bench_function("fill_forest_build", |b| {
        b.iter(|| {
            FillForestBuilder::new(TradeSide::Sell)
                .build(black_box(&orders), &fillable, &venues)
                .unwrap()
        });
    });
}

fn bench_baseline(c: &mut Criterion) {
    let orders = make_orders(16);
    let fillable: Vec<Decimal> = orders.iter().map(NativeOrder::taker_amount).collect();
    let venues = venue_samples(&make_curves(4, 8));
    let forest = FillForestBuilder::new(TradeSide::Sell)
        .build(&orders, &fillable, &venues)
        .unwrap();
    let target = Decimal::new(8_000, 0);

    c.bench_function("baseline_select", |b| {
        b.iter(|| select_baseline(black_box(&forest), target).unwrap());
    });
}

fn bench_search(c: &mut Criterion) {
    let orders = make_orders(8);
    let fillable: Vec<Decimal> = orders.iter().map(NativeOrder::taker_amount).collect();
    let venues = venue_samples(&make_curves(3, 6));
    let forest = FillForestBuilder::new(TradeSide::Sell)
        .build(&orders, &fillable, &venues)
        .unwrap();
    let target = Decimal::new(12_000, 0);
    let baseline = select_baseline(&forest, target).unwrap();

    let mut group = c.benchmark_group("path_search");
    for run_limit in [256_u64, 4_096, 32_768] {
        group.bench_with_input(BenchmarkId::from_parameter(run_limit), &run_limit, |b, &limit| {
            b.iter(|| {
                PathOptimizer::new(limit)
                    .optimize(&forest, target, baseline.clone())
                    .unwrap()
            });
        });
    }
    group.finish();
}

fn bench_improve_sell(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("runtime");
    let orders = make_orders(8);
    let curves = make_curves(3, 6);

    let catalog = curves
        .iter()
        .enumerate()
        .fold(VenueCatalog::new(), |catalog, (i, (id, _))| {
            catalog.with_venue(VenueConfig::new(id.clone(), Address::from_low_u64_be(100 + i as u64)))
        });
    let sampler = curves
        .into_iter()
        .fold(StaticSampler::new(), |sampler, (id, curve)| {
            sampler.with_curve(TradeSide::Sell, id, curve)
        });
    let aggregator = LiquidityAggregator::new(catalog);
    let options = ImproveOptions::new(Arc::new(sampler)).with_run_limit(4_096);
    let amount = Decimal::new(12_000, 0);

    c.bench_function("improve_sell", |b| {
        b.to_async(&runtime).iter(|| async {
            aggregator
                .improve_sell(black_box(&orders), amount, &options)
                .await
                .unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_forest,
    bench_baseline,
    bench_search,
    bench_improve_sell,
);
criterion_main!(benches);
