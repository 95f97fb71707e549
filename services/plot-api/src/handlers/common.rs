//! Response helpers shared by the handlers.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use plot_common::PlotError;
use renderer::Artifact;
use serde::{Deserialize, Serialize};

/// JSON body of every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Render a plot error as its status and `{"detail": ...}` body.
pub fn error_response(err: &PlotError) -> Response {
    let status = StatusCode::from_u16(err.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = ErrorBody {
        detail: err.detail(),
    };
    (status, Json(body)).into_response()
}

/// Image bytes with the content type of their format.
pub fn artifact_response(artifact: Artifact) -> Response {
    let content_type = artifact.content_type();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type)],
        artifact.bytes,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use plot_common::OutputFormat;

    #[test]
    fn test_error_response_is_500() {
        let response = error_response(&PlotError::UnsupportedFormat("bmp".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
    }

    #[test]
    fn test_artifact_response_sets_content_type() {
        let response = artifact_response(Artifact {
            bytes: b"<svg/>".to_vec(),
            format: OutputFormat::Svg,
        });
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
    }
}
