//! Criterion benchmarks for client_logger

use client_logger::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

fn capture(level: LogLevel) -> (Logger, MemoryAppender) {
    let sink = MemoryAppender::new();
    let logger = Logger::builder()
        .min_level(level)
        .console_appender(sink.clone())
        .build();
    (logger, sink)
}

fn sample_context(fields: usize) -> LogContext {
    (0..fields)
        .map(|i| (format!("field_{}", i), format!("value_{}", i)))
        .collect()
}

// ============================================================================
// Filtering Benchmarks
// ============================================================================

fn bench_filtered_emission(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtered_emission");
    group.throughput(Throughput::Elements(1));

    let (logger, _sink) = capture(LogLevel::Error);
    let child = logger.child(sample_context(4));

    group.bench_function("root_debug", |b| {
        b.iter(|| logger.debug(black_box("dropped")));
    });

    group.bench_function("child_debug_with_context", |b| {
        b.iter(|| child.debug_with_context(black_box("dropped"), sample_context(2)));
    });

    group.bench_function("console_disabled", |b| {
        let (quiet, _sink) = capture(LogLevel::Debug);
        quiet.enable_console_output(false);
        b.iter(|| quiet.info(black_box("counted only")));
    });

    group.finish();
}

// ============================================================================
// Emission Benchmarks
// ============================================================================

fn bench_emission(c: &mut Criterion) {
    let mut group = c.benchmark_group("emission");
    group.throughput(Throughput::Elements(1));

    let (logger, sink) = capture(LogLevel::Debug);
    let child = logger.child(LogContext::for_component("Bench"));

    group.bench_function("root_info", |b| {
        b.iter(|| {
            logger.info(black_box("Info message"));
            if sink.len() > 10_000 {
                sink.clear();
            }
        });
    });

    group.bench_function("child_info_with_context", |b| {
        b.iter(|| {
            child.info_with_context(
                black_box("Request processed"),
                LogContext::new().with_field("status", 200),
            );
            if sink.len() > 10_000 {
                sink.clear();
            }
        });
    });

    group.bench_function("performance", |b| {
        b.iter(|| {
            child.performance("load_jobs", black_box(Duration::from_micros(1250)), None);
            if sink.len() > 10_000 {
                sink.clear();
            }
        });
    });

    group.bench_function("error_with_trace", |b| {
        b.iter(|| {
            let error = ErrorInfo::new("timeout").with_stack("at fetch\nat main");
            child.error_with(black_box("request failed"), Some(error), None);
            if sink.len() > 10_000 {
                sink.clear();
            }
        });
    });

    group.finish();
}

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_context_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("context_formatting");

    for fields in [1usize, 8, 32] {
        let context = sample_context(fields);
        group.throughput(Throughput::Elements(fields as u64));
        group.bench_with_input(BenchmarkId::new("to_json_string", fields), &context, |b, ctx| {
            b.iter(|| black_box(ctx.to_json_string()));
        });
        group.bench_with_input(BenchmarkId::new("merged", fields), &context, |b, ctx| {
            let call_site = sample_context(fields / 2 + 1);
            b.iter(|| black_box(ctx.merged(&call_site)));
        });
    }

    let nested = LogContext::new()
        .with_field("user", sample_context(4))
        .with_field("tags", vec!["a", "b", "c"])
        .with_field("ratio", 0.75);
    group.bench_function("nested", |b| {
        b.iter(|| black_box(nested.to_json_string()));
    });

    group.finish();
}

fn bench_output_formats(c: &mut Criterion) {
    let mut group = c.benchmark_group("output_format");
    let entry = LogEntry::new(LogLevel::Warn, "slow response").with_context(Some(sample_context(6)));

    for (name, format) in [("text", OutputFormat::Text), ("json", OutputFormat::Json)] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(format.format(&entry, &TimestampFormat::Iso8601)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_filtered_emission,
    bench_emission,
    bench_context_formatting,
    bench_output_formats,
);
criterion_main!(benches);
