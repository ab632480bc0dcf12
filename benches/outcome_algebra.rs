//! Outcome algebra benchmark suite.
//!
//! Benchmarks the hot paths of the algebra:
//! - Table-driven `and`/`or` composition across every variant pair
//! - Finite concatenation and shortest-wins at growing lengths
//! - Resolver folding throughput
//! - Union and difference over finite and cyclical inputs
//!
//! Run:
//!   cargo bench --bench outcome_algebra

#![allow(missing_docs)]
#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use outcomes::{
    Combinator, Difference, Elemental, MinOutput, Outcome, Resolver, Unbounded, Union, Violation,
    ViolationKind,
};

// =============================================================================
// HELPERS
// =============================================================================

fn sample_outcomes() -> Vec<Outcome<u64>> {
    vec![
        Outcome::error(Violation::new(ViolationKind::Custom, "bench")),
        Outcome::timeout(Violation::expired("bench")),
        Outcome::blocking(Combinator::Or, 2).expect("awaits two"),
        Outcome::warning(Violation::new(ViolationKind::Advisory, "bench")),
        Outcome::partial(Violation::new(ViolationKind::Incomplete, "bench")),
        Outcome::one(7),
        Outcome::from_vec((0..8).collect()),
        Outcome::cyclical(vec![1, 2, 3]).expect("non-empty"),
        Outcome::acyclical(Unbounded::from_index(|i| i as u64)),
        Outcome::no(),
    ]
}

fn sequence(len: u64) -> Outcome<u64> {
    Outcome::from_vec((0..len).collect())
}

// =============================================================================
// COMPOSITION BENCHMARKS
// =============================================================================

/// Every one of the 200 table cells, once per iteration.
fn bench_composition_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("algebra/tables");
    let samples = sample_outcomes();
    group.throughput(Throughput::Elements(200));
    group.bench_function("all_pairs", |b| {
        b.iter(|| {
            for this in &samples {
                for that in &samples {
                    black_box(this.clone().and(that.clone()));
                    black_box(this.clone().or(that.clone()));
                }
            }
        })
    });
    group.finish();
}

/// Concatenation copies both operands; shortest-wins only compares lengths.
fn bench_finite_composition(c: &mut Criterion) {
    let mut group = c.benchmark_group("algebra/finite");
    for &len in &[16u64, 256, 4096] {
        group.throughput(Throughput::Elements(len * 2));
        group.bench_with_input(BenchmarkId::new("or_concat", len), &len, |b, &len| {
            b.iter_batched(
                || (sequence(len), sequence(len)),
                |(a, c)| black_box(a.or(c)),
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("and_shortest", len), &len, |b, &len| {
            b.iter_batched(
                || (sequence(len), sequence(len / 2)),
                |(a, c)| black_box(a.and(c)),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

/// Folding arrivals through the mutex-guarded resolver.
fn bench_resolver(c: &mut Criterion) {
    let mut group = c.benchmark_group("algebra/resolver");
    let arrivals = 128u64;
    group.throughput(Throughput::Elements(arrivals));
    group.bench_function("disjunction_fold", |b| {
        b.iter(|| {
            let resolver = Resolver::disjunction();
            for i in 0..arrivals {
                resolver.process(Outcome::one(i));
            }
            black_box(resolver.into_outcome())
        })
    });
    group.bench_function("conjunction_fold", |b| {
        b.iter(|| {
            let resolver = Resolver::conjunction();
            for i in 1..=arrivals {
                resolver.process(sequence(i % 16 + 2));
            }
            black_box(resolver.into_outcome())
        })
    });
    group.finish();
}

// =============================================================================
// SET OPERATION BENCHMARKS
// =============================================================================

fn bench_set_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("elemental/finite");
    for &len in &[64u64, 1024, 16384] {
        let input = sequence(len);
        let references = [Outcome::from_vec((len / 2..len + len / 2).collect())];
        let union = Union::new(references.clone());
        let difference = Difference::new(references);
        group.throughput(Throughput::Elements(len));
        group.bench_with_input(BenchmarkId::new("union_all", len), &input, |b, input| {
            b.iter(|| black_box(union.apply(input, MinOutput::All)))
        });
        group.bench_with_input(BenchmarkId::new("union_min_16", len), &input, |b, input| {
            b.iter(|| black_box(union.apply(input, MinOutput::AtLeast(16))))
        });
        group.bench_with_input(BenchmarkId::new("difference_all", len), &input, |b, input| {
            b.iter(|| black_box(difference.apply(input, MinOutput::All)))
        });
    }
    group.finish();

    let mut group = c.benchmark_group("elemental/infinite");
    let cycle = Outcome::cyclical((0..64).collect()).expect("non-empty");
    let stream = Outcome::acyclical(Unbounded::from_index(|i| i as u64));
    let difference = Difference::new([Outcome::from_vec((0..32).map(|i| i * 2).collect())]);
    group.bench_function("difference_cyclical", |b| {
        b.iter(|| black_box(difference.apply(&cycle, MinOutput::AtLeast(8))))
    });
    group.bench_function("difference_acyclical_head_64", |b| {
        b.iter(|| black_box(difference.apply(&stream, MinOutput::All).head(64)))
    });
    group.finish();
}

// =============================================================================
// MAIN
// =============================================================================

criterion_group!(
    benches,
    bench_composition_tables,
    bench_finite_composition,
    bench_resolver,
    bench_set_operations,
);

criterion_main!(benches);
