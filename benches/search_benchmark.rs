//! Performance benchmarks for search and alternatives over large catalogs.
//!
//! Run with: cargo bench --bench search_benchmark

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use medmatch::{Catalog, MatcherConfig, MedicineMatcher, RawMedicineRow};
use std::hint::black_box;

const INDICATIONS: &[&str] = &["pain", "fever", "hypertension", "diabetes", "asthma", "infection"];

/// Generate a catalog with the specified number of records.
fn generate_catalog(count: usize) -> Catalog {
    let rows = (0..count).map(|i| RawMedicineRow {
        brand_name: Some(format!("Brand{i:05}ex")),
        generic_name: Some(format!("generic-{}-{}", i % 97, i)),
        indications: Some(vec![
            INDICATIONS[i % INDICATIONS.len()].to_string(),
            INDICATIONS[(i / 7) % INDICATIONS.len()].to_string(),
        ]),
        average_brand_price: Some(50.0 + (i % 40) as f64),
        average_generic_price: Some((i % 13) as f64),
        ..Default::default()
    });
    Catalog::build(rows.collect::<Vec<_>>()).expect("generated rows are valid")
}

fn matcher(count: usize, parallel_threshold: usize) -> MedicineMatcher {
    MedicineMatcher::with_config(
        generate_catalog(count),
        MatcherConfig {
            parallel_threshold,
            ..MatcherConfig::default()
        },
    )
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in [100, 1_000, 10_000] {
        let sequential = matcher(size, usize::MAX);
        let parallel = matcher(size, 0);

        group.bench_with_input(BenchmarkId::new("sequential", size), &size, |b, _| {
            b.iter(|| black_box(sequential.search(black_box("brand0042"), 10)))
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &size, |b, _| {
            b.iter(|| black_box(parallel.search(black_box("brand0042"), 10)))
        });
    }

    group.finish();
}

fn bench_fuzzy_query(c: &mut Criterion) {
    let engine = matcher(1_000, MatcherConfig::default().parallel_threshold);

    c.bench_function("search_typo_1000_records", |b| {
        b.iter(|| black_box(engine.search(black_box("genric1x"), 10)))
    });
}

fn bench_alternatives(c: &mut Criterion) {
    let mut group = c.benchmark_group("alternatives");

    for size in [1_000, 10_000] {
        let engine = matcher(size, usize::MAX);
        let base = engine.all_records()[size / 2].clone();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(engine.get_alternatives(black_box(&base), 5)))
        });
    }

    group.finish();
}

fn bench_find_exact(c: &mut Criterion) {
    let engine = matcher(10_000, usize::MAX);

    c.bench_function("find_exact_10000_records", |b| {
        b.iter(|| black_box(engine.find_exact(black_box("Brand09999ex"))))
    });
}

criterion_group!(
    benches,
    bench_search,
    bench_fuzzy_query,
    bench_alternatives,
    bench_find_exact
);
criterion_main!(benches);
