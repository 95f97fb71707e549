//! Benchmarks for the renderer crate - chart construction and encoding.
//!
//! Run with: cargo bench --package renderer -- chart_body
//! Or: cargo bench --package renderer --bench render_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use csv_parser::Frame;
use plot_common::{PlotParams, PlotRequest, PlotType};
use renderer::{encode, render_figure, DrawingContext};
use test_utils::{create_grouped_csv, create_linear_csv, create_numeric_table};

fn params(plot_type: &str, x: &str, y: &str, format: &str, dpi: i64) -> PlotParams {
    PlotRequest {
        x_col: x.to_string(),
        y_col: Some(y.to_string()),
        plot_type: plot_type.to_string(),
        output_format: format.to_string(),
        dpi,
        ..PlotRequest::default()
    }
    .validate()
    .expect("benchmark parameters are valid")
}

// =============================================================================
// CHART BODY BENCHMARKS
// =============================================================================

fn bench_chart_body(c: &mut Criterion) {
    let mut group = c.benchmark_group("chart_body");

    let series = Frame::from_csv_bytes(create_linear_csv(5_000, 0.5).as_bytes()).unwrap();
    let grouped = Frame::from_csv_bytes(create_grouped_csv(8, 500).as_bytes()).unwrap();

    for plot_type in PlotType::ALL {
        let (frame, x, y) = match plot_type {
            PlotType::Box | PlotType::Violin => (&grouped, "group", "value"),
            _ => (&series, "x", "y"),
        };
        let params = params(plot_type.as_str(), x, y, "svg", 100);

        group.throughput(Throughput::Elements(frame.num_rows() as u64));
        group.bench_with_input(BenchmarkId::new(plot_type.as_str(), frame.num_rows()), frame, |b, frame| {
            b.iter(|| render_figure(black_box(frame), &params))
        });
    }

    group.finish();
}

// =============================================================================
// CORRELATION BENCHMARKS
// =============================================================================

fn bench_correlation(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation");

    for columns in [4, 16, 64] {
        let frame = Frame::from_csv_bytes(create_numeric_table(2_000, columns).as_bytes()).unwrap();
        group.bench_with_input(BenchmarkId::new("pearson", columns), &frame, |b, frame| {
            b.iter(|| black_box(frame).correlation())
        });
    }

    group.finish();
}

// =============================================================================
// ENCODE BENCHMARKS
// =============================================================================

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    group.sample_size(20);

    let ctx = DrawingContext::new();
    let frame = Frame::from_csv_bytes(create_linear_csv(500, 0.5).as_bytes()).unwrap();

    for format in ["svg", "png", "jpg", "pdf"] {
        for dpi in [100, 300] {
            let params = params("line", "x", "y", format, dpi);
            group.bench_with_input(BenchmarkId::new(format, dpi), &params, |b, params| {
                b.iter(|| {
                    let figure = render_figure(&frame, params).unwrap();
                    encode(figure, params.format, params.dpi, &ctx)
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_chart_body, bench_correlation, bench_encode);
criterion_main!(benches);
