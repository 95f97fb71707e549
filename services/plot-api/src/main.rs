//! CSV Plotting API Server
//!
//! Accepts a CSV upload plus plot parameters and returns the rendered chart.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use plot_api::build_router;
use plot_api::state::AppState;

/// CSV Plotting API Server
#[derive(Parser, Debug)]
#[command(name = "plot-api")]
#[command(about = "HTTP service that renders charts from uploaded CSV data")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8000", env = "PLOT_LISTEN_ADDR")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of worker threads
    #[arg(long, env = "PLOT_WORKER_THREADS")]
    worker_threads: Option<usize>,

    /// Maximum renders running at once (defaults to the CPU count)
    #[arg(long, env = "PLOT_MAX_CONCURRENT_RENDERS")]
    max_concurrent_renders: Option<usize>,

    /// Prometheus exporter listen address; metrics are not exported when unset
    #[arg(long, env = "PLOT_METRICS_LISTEN")]
    metrics_listen: Option<String>,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Build runtime with configured threads
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .context("Failed to create Tokio runtime")?;
    runtime.block_on(run_server(args))
}

async fn run_server(args: Args) -> Result<()> {
    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting CSV plotting server");

    if let Some(metrics_listen) = &args.metrics_listen {
        let metrics_addr: SocketAddr = metrics_listen
            .parse()
            .with_context(|| format!("Invalid metrics listen address: {}", metrics_listen))?;
        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(metrics_addr)
            .install()
            .context("Failed to install Prometheus exporter")?;
        info!("Prometheus metrics exporter listening on {}", metrics_addr);
    }

    // Fonts load once here; every request shares them read-only
    let max_renders = args.max_concurrent_renders.unwrap_or_else(num_cpus::get);
    let state = Arc::new(AppState::new(max_renders));

    let app = build_router(state);

    // Parse listen address
    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", args.listen))?;

    info!("CSV plotting API listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server failed")?;
    Ok(())
}
