//! Chart creation handler.

use std::sync::Arc;

use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        Extension,
    },
    response::Response,
};
use bytes::Bytes;
use csv_parser::Frame;
use plot_common::{PlotError, PlotRequest, PlotResult};
use renderer::Artifact;
use thiserror::Error;
use tracing::{info, instrument, warn};

use super::common::{artifact_response, error_response};
use crate::metrics::Timer;
use crate::state::AppState;

/// Problems reading the multipart form itself.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("field required")]
    Missing(&'static str),

    #[error("'{value}' is not a valid {expected}")]
    InvalidNumber {
        field: String,
        value: String,
        expected: &'static str,
    },

    #[error("could not read multipart body: {0}")]
    Multipart(String),
}

impl FormError {
    fn field(&self) -> &str {
        match self {
            FormError::Missing(field) => *field,
            FormError::InvalidNumber { field, .. } => field.as_str(),
            FormError::Multipart(_) => "body",
        }
    }
}

impl From<FormError> for PlotError {
    fn from(err: FormError) -> Self {
        PlotError::invalid_parameter(err.field(), err.to_string())
    }
}

/// A parsed `POST /plot_csv` form: the CSV upload and its plot parameters.
#[derive(Debug, Clone)]
pub struct PlotUpload {
    pub csv: Bytes,
    pub request: PlotRequest,
}

impl PlotUpload {
    /// Read every form field. Unknown fields are ignored; absent or empty
    /// optional fields keep their defaults.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, FormError> {
        let mut csv = None;
        let mut x_col = None;
        let mut request = PlotRequest::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| FormError::Multipart(e.to_string()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            if name == "file" {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| FormError::Multipart(e.to_string()))?;
                csv = Some(data);
                continue;
            }

            let value = field
                .text()
                .await
                .map_err(|e| FormError::Multipart(e.to_string()))?;
            if value.trim().is_empty() && name != "x_col" {
                tracing::debug!(field = %name, "Empty form field, keeping default");
                continue;
            }
            match name.as_str() {
                "x_col" => x_col = Some(value),
                "y_col" => request.y_col = Some(value),
                "plot_type" => request.plot_type = value,
                "xlabel" => request.xlabel = value,
                "ylabel" => request.ylabel = value,
                "title" => request.title = value,
                "figsize_width" => request.figsize_width = parse_float(&name, &value)?,
                "figsize_height" => request.figsize_height = parse_float(&name, &value)?,
                "output_format" => request.output_format = value,
                "dpi" => request.dpi = parse_integer(&name, &value)?,
                _ => tracing::debug!(field = %name, "Ignoring unknown form field"),
            }
        }

        request.x_col = x_col.ok_or(FormError::Missing("x_col"))?;
        Ok(Self {
            csv: csv.ok_or(FormError::Missing("file"))?,
            request,
        })
    }
}

fn parse_float(field: &str, value: &str) -> Result<f64, FormError> {
    value.trim().parse().map_err(|_| FormError::InvalidNumber {
        field: field.to_string(),
        value: value.to_string(),
        expected: "number",
    })
}

fn parse_integer(field: &str, value: &str) -> Result<i64, FormError> {
    value.trim().parse().map_err(|_| FormError::InvalidNumber {
        field: field.to_string(),
        value: value.to_string(),
        expected: "integer",
    })
}

/// POST /plot_csv - Render the uploaded CSV as a chart
#[instrument(skip_all, fields(plot_type, format))]
pub async fn plot_csv_handler(
    Extension(state): Extension<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let timer = Timer::start();

    let result = match multipart {
        Ok(multipart) => create_plot(&state, multipart).await,
        Err(rejection) => Err(FormError::Multipart(rejection.body_text()).into()),
    };

    match result {
        Ok(artifact) => {
            info!(
                bytes = artifact.len(),
                elapsed_ms = timer.elapsed_ms(),
                "Plot created"
            );
            artifact_response(artifact)
        }
        Err(e) => {
            warn!(kind = e.kind(), error = %e, "Plot creation failed");
            state.metrics.record_error(&e);
            error_response(&e)
        }
    }
}

async fn create_plot(state: &AppState, multipart: Multipart) -> PlotResult<Artifact> {
    let upload = PlotUpload::from_multipart(multipart).await?;
    let params = upload.request.validate()?;

    let plot_type = params.selection.plot_type;
    let format = params.format;
    let span = tracing::Span::current();
    span.record("plot_type", plot_type.as_str());
    span.record("format", format.as_str());
    state.metrics.record_request(plot_type, format);

    let permit = Arc::clone(&state.render_permits)
        .acquire_owned()
        .await
        .map_err(|e| PlotError::InternalError(format!("render permits unavailable: {}", e)))?;

    let drawing = state.drawing.clone();
    let csv = upload.csv;
    let timer = Timer::start();
    let artifact = tokio::task::spawn_blocking(move || -> PlotResult<Artifact> {
        let _permit = permit;
        let frame = Frame::from_csv_bytes(&csv)?;
        renderer::render_plot(&frame, &params, &drawing)
    })
    .await
    .map_err(|e| PlotError::InternalError(format!("render task failed: {}", e)))??;

    state
        .metrics
        .record_render(plot_type, format, timer.elapsed_us(), artifact.len());
    Ok(artifact)
}
