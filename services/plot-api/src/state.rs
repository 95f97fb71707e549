//! Application state for the plotting service.

use std::sync::Arc;

use renderer::DrawingContext;
use tokio::sync::Semaphore;

use crate::metrics::MetricsCollector;

/// Shared application state.
///
/// No drawing state lives here: every render builds its own figure, and
/// the drawing context only holds read-only font data.
pub struct AppState {
    /// Fonts and other immutable rendering resources.
    pub drawing: DrawingContext,

    /// Bounds the number of renders running at once.
    pub render_permits: Arc<Semaphore>,

    /// Request, render and error counters.
    pub metrics: Arc<MetricsCollector>,
}

impl AppState {
    /// State with system fonts loaded.
    pub fn new(max_concurrent_renders: usize) -> Self {
        Self::with_context(DrawingContext::new(), max_concurrent_renders)
    }

    /// State over an existing drawing context.
    pub fn with_context(drawing: DrawingContext, max_concurrent_renders: usize) -> Self {
        let permits = max_concurrent_renders.max(1);
        tracing::info!(
            max_concurrent_renders = permits,
            font_faces = drawing.font_count(),
            "Initialized application state"
        );

        Self {
            drawing,
            render_permits: Arc::new(Semaphore::new(permits)),
            metrics: Arc::new(MetricsCollector::new()),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("drawing", &self.drawing)
            .field("available_permits", &self.render_permits.available_permits())
            .finish()
    }
}
