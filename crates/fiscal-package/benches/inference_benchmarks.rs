//! Inference performance benchmarks.
//!
//! Measures parsing, schema inference and type resolution across table sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fiscal_package::input::Parser;
use fiscal_package::naming::to_slug;
use fiscal_package::{CompatibilityResolver, ConceptCatalog, SchemaInference, TypeRegistry};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generate a synthetic budget table with the given number of rows.
fn generate_budget_csv(rows: usize) -> String {
    let mut rng = StdRng::seed_from_u64(42);
    let mut data = String::from("id,year,date,admin,approved,amount\n");

    for row in 0..rows {
        data.push_str(&format!(
            "{},{},2023-{:02}-{:02},Ministry {},{},{:.2}\n",
            row,
            2015 + row % 10,
            (row % 12) + 1,
            (row % 28) + 1,
            rng.gen_range(0..40),
            if rng.gen_bool(0.5) { "yes" } else { "no" },
            rng.gen_range(0.0..1_000_000.0f64),
        ));
    }

    data
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_csv");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_budget_csv(*rows);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            let parser = Parser::new();
            b.iter(|| black_box(parser.parse_bytes(data.as_bytes()).unwrap()))
        });
    }

    group.finish();
}

fn bench_infer(c: &mut Criterion) {
    let mut group = c.benchmark_group("infer_schema");
    let inference = SchemaInference::new();

    for rows in [100, 1_000].iter() {
        let data = generate_budget_csv(*rows);
        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter(|| black_box(inference.infer_str("budget.csv", data).unwrap()))
        });
    }

    group.finish();
}

fn bench_resolve_column(c: &mut Criterion) {
    let registry = TypeRegistry::new();
    let catalog = ConceptCatalog::fiscal(&registry);
    let resolver = CompatibilityResolver::new(&registry, &catalog);

    let mut rng = StdRng::seed_from_u64(7);
    let numbers: Vec<String> = (0..1_000)
        .map(|_| format!("{:.2}", rng.gen_range(-1e6..1e6f64)))
        .collect();

    c.bench_function("compatible_types_1000_numbers", |b| {
        b.iter(|| black_box(resolver.compatible_types(numbers.as_slice())))
    });

    let types = resolver.compatible_types(numbers.as_slice());
    c.bench_function("compatible_concepts", |b| {
        b.iter(|| black_box(resolver.compatible_concepts(&types)))
    });
}

fn bench_slug(c: &mut Criterion) {
    c.bench_function("to_slug_mixed", |b| {
        b.iter(|| black_box(to_slug("Бюджет Міністерства 2024 – Dépenses publiques (final).csv")))
    });
}

criterion_group!(benches, bench_parse, bench_infer, bench_resolve_column, bench_slug);
criterion_main!(benches);
