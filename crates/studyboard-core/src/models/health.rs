//! Backend health status

use serde::{Deserialize, Serialize};

/// Result of `GET /health/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HealthStatus {
    /// Backend answered with a success status
    Up { status: String },
    /// Backend unreachable or answered with an error
    Down { message: String },
}

impl HealthStatus {
    pub fn is_up(&self) -> bool {
        matches!(self, HealthStatus::Up { .. })
    }

    /// Build from a successful response body: the `status` field when the
    /// body is a JSON object carrying one, otherwise the trimmed body
    pub fn from_body(body: &str) -> Self {
        let status = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("status").and_then(|s| s.as_str()).map(str::to_string))
            .unwrap_or_else(|| body.trim().to_string());

        HealthStatus::Up { status }
    }

    /// One-line summary for status bars
    pub fn summary(&self) -> String {
        match self {
            HealthStatus::Up { status } if status.is_empty() => "Backend: up".to_string(),
            HealthStatus::Up { status } => format!("Backend: {}", status),
            HealthStatus::Down { message } => format!("Backend unavailable: {}", message),
        }
    }
}
