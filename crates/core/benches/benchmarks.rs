//! Benchmarks for timeutils-core.
//!
//! Run with: `cargo bench -p timeutils-core`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use timeutils_core::{Pattern, TimeUtils, Timestamp};

const TIMESTAMP: &str = "2024-01-15T10:30:45.123456789-08:00";
const PATTERN: &str = "%A, %B %d, %Y at %I:%M:%S %p (%z)";

fn bench_parse(c: &mut Criterion) {
    c.bench_function("timestamp_parse", |b| {
        b.iter(|| Timestamp::parse(black_box(TIMESTAMP)))
    });
    c.bench_function("timestamp_parse_invalid", |b| {
        b.iter(|| Timestamp::parse(black_box("2024-13-45T25:70:80Z")))
    });
}

fn bench_pattern(c: &mut Criterion) {
    let ts = Timestamp::parse(TIMESTAMP).unwrap();
    c.bench_function("pattern_compile", |b| {
        b.iter(|| Pattern::compile(black_box(PATTERN)))
    });
    let pattern = Pattern::compile(PATTERN).unwrap();
    c.bench_function("pattern_render", |b| b.iter(|| pattern.render(black_box(&ts))));
}

fn bench_functions(c: &mut Criterion) {
    let provider = TimeUtils::default();
    let mut group = c.benchmark_group("call");
    group.bench_function("unix_timestamp", |b| {
        b.iter(|| provider.call("unix_timestamp", black_box(&[TIMESTAMP])))
    });
    group.bench_function("parse_rfc3339", |b| {
        b.iter(|| provider.call("parse_rfc3339", black_box(&[TIMESTAMP])))
    });
    group.bench_function("strftime", |b| {
        b.iter(|| provider.call("strftime", black_box(&[PATTERN, TIMESTAMP])))
    });
    group.bench_function("days_difference", |b| {
        b.iter(|| {
            provider.call(
                "days_difference",
                black_box(&["2024-01-15T10:30:00Z", TIMESTAMP]),
            )
        })
    });
    group.finish();
}

criterion_group!(benches, bench_parse, bench_pattern, bench_functions);
criterion_main!(benches);
