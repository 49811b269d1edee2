//! Rule scaling benchmarks.
//!
//! The central performance claim is that per-event match time depends
//! on event length, not rule count: doubling the rule set from 1k to
//! 50k rules must not measurably change per-event cost beyond the
//! one-time automaton build. These benches measure both sides of that
//! claim, plus an `aho-corasick` baseline for comparison.

use aho_corasick::AhoCorasick;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use moderation_engine::{Event, ModerationEngine, RawRule};

fn synthetic_rules(count: usize) -> Vec<RawRule> {
    (0..count)
        .map(|i| RawRule::new(format!("term{i:05}x"), format!("cat{}", i % 7), 1.0))
        .collect()
}

fn bench_event() -> Event {
    Event::new(
        "bench-1",
        "a fixed length event mentioning term00042x and term00999x among \
         otherwise unremarkable text that the automaton walks once",
        "us",
        0,
    )
}

fn bench_per_event_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("per_event_match");
    let event = bench_event();

    for rule_count in [1_000usize, 5_000, 20_000, 50_000] {
        let engine = ModerationEngine::from_rules(&synthetic_rules(rule_count))
            .expect("engine builds");
        group.bench_with_input(
            BenchmarkId::from_parameter(rule_count),
            &rule_count,
            |b, _| {
                b.iter(|| {
                    let result = engine.evaluate(black_box(&event)).expect("evaluate");
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_automaton_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("automaton_build");
    group.sample_size(10);

    for rule_count in [1_000usize, 10_000, 50_000] {
        let rules = synthetic_rules(rule_count);
        group.bench_with_input(
            BenchmarkId::from_parameter(rule_count),
            &rules,
            |b, rules| {
                b.iter(|| {
                    let engine = ModerationEngine::from_rules(black_box(rules)).expect("build");
                    black_box(engine.stats())
                })
            },
        );
    }
    group.finish();
}

fn bench_aho_corasick_baseline(c: &mut Criterion) {
    let patterns: Vec<String> = (0..50_000).map(|i| format!("term{i:05}x")).collect();
    let oracle = AhoCorasick::new(&patterns).expect("oracle builds");
    let event = bench_event();

    c.bench_function("aho_corasick_baseline_50k", |b| {
        b.iter(|| {
            let count = oracle
                .find_overlapping_iter(black_box(event.text.as_str()))
                .count();
            black_box(count)
        })
    });
}

criterion_group!(
    benches,
    bench_per_event_match,
    bench_automaton_build,
    bench_aho_corasick_baseline
);
criterion_main!(benches);
