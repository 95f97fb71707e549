//! Service description handler.

use axum::Json;
use plot_common::{OutputFormat, PlotType};
use serde::{Deserialize, Serialize};

/// Service name reported at `GET /`.
pub const SERVICE_NAME: &str = "CSV Plotting Service";

/// Usage hint reported at `GET /`.
pub const USAGE: &str = "POST /plot_csv with CSV file and parameters";

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub supported_plot_types: Vec<String>,
    pub supported_formats: Vec<String>,
    pub usage: String,
}

impl ServiceInfo {
    pub fn current() -> Self {
        Self {
            message: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            supported_plot_types: PlotType::ALL.iter().map(|t| t.as_str().to_string()).collect(),
            supported_formats: OutputFormat::ALL.iter().map(|f| f.as_str().to_string()).collect(),
            usage: USAGE.to_string(),
        }
    }
}

/// GET / - Service name, version and supported options
pub async fn root_handler() -> Json<ServiceInfo> {
    Json(ServiceInfo::current())
}
