//! Application metrics collection and reporting.
//!
//! Every record call updates both the in-process counters below and the
//! global `metrics` recorder, which the Prometheus exporter scrapes when
//! it is enabled.

use metrics::{counter, histogram};
use plot_common::{OutputFormat, PlotError, PlotType};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Metrics collector for the plotting service.
#[derive(Debug, Default)]
pub struct MetricsCollector {
    /// Validated plot requests
    pub requests: AtomicU64,

    /// Successful renders and the bytes they produced
    pub renders_total: AtomicU64,
    pub output_bytes: AtomicU64,

    /// Failed requests of any kind
    pub errors_total: AtomicU64,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a request whose parameters passed validation
    pub fn record_request(&self, plot_type: PlotType, format: OutputFormat) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        counter!(
            "plot_requests_total",
            "plot_type" => plot_type.as_str(),
            "format" => format.as_str()
        )
        .increment(1);
    }

    /// Record a failed request
    pub fn record_error(&self, err: &PlotError) {
        self.errors_total.fetch_add(1, Ordering::Relaxed);
        counter!("plot_errors_total", "kind" => err.kind()).increment(1);
    }

    /// Record a completed render and the size of its output
    pub fn record_render(&self, plot_type: PlotType, format: OutputFormat, duration_us: u64, bytes: usize) {
        self.renders_total.fetch_add(1, Ordering::Relaxed);
        self.output_bytes.fetch_add(bytes as u64, Ordering::Relaxed);

        histogram!("plot_render_duration_seconds", "plot_type" => plot_type.as_str())
            .record(duration_us as f64 / 1_000_000.0);
        histogram!("plot_output_bytes", "format" => format.as_str()).record(bytes as f64);
    }
}

/// Simple timer for measuring durations
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_micros() as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_track_records() {
        let collector = MetricsCollector::new();
        collector.record_request(PlotType::Bar, OutputFormat::Png);
        collector.record_request(PlotType::Pie, OutputFormat::Svg);
        collector.record_render(PlotType::Bar, OutputFormat::Png, 1_500, 2048);
        collector.record_render(PlotType::Pie, OutputFormat::Svg, 900, 512);
        collector.record_error(&PlotError::UnsupportedFormat("bmp".to_string()));

        assert_eq!(collector.requests.load(Ordering::Relaxed), 2);
        assert_eq!(collector.renders_total.load(Ordering::Relaxed), 2);
        assert_eq!(collector.errors_total.load(Ordering::Relaxed), 1);
        assert_eq!(collector.output_bytes.load(Ordering::Relaxed), 2560);
    }

    #[test]
    fn test_timer_is_monotonic() {
        let timer = Timer::start();
        let first = timer.elapsed_us();
        assert!(timer.elapsed_us() >= first);
    }
}
