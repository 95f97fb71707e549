//! CSV Plotting Service Library
//!
//! HTTP surface for the chart renderer: a service description at `GET /`
//! and chart creation at `POST /plot_csv`.

pub mod handlers;
pub mod metrics;
pub mod state;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the application router over shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::root::root_handler))
        .route("/plot_csv", post(handlers::plot::plot_csv_handler))
        // Middleware
        .layer(DefaultBodyLimit::disable())
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
