//! Error types for studyboard-core
//!
//! Every failure a dashboard action can hit ends up here. None of them is
//! fatal: front-ends render them next to the action that produced them.

use std::error::Error as _;
use thiserror::Error;

/// Failure talking to the backend
#[derive(Error, Debug)]
pub enum ApiError {
    // ===================
    // Transport Errors
    // ===================
    #[error("Failed to build HTTP client")]
    Client {
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid backend URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("{endpoint} timed out after {timeout_secs}s")]
    Timeout {
        endpoint: &'static str,
        timeout_secs: u64,
    },

    #[error("{endpoint} failed")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    // ===================
    // Response Errors
    // ===================
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    #[error("Unexpected response from {endpoint}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// HTTP status code, when the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text shown to the user
    ///
    /// Non-success responses show the body verbatim; everything else shows
    /// the error followed by its source chain.
    pub fn display_text(&self) -> String {
        if let ApiError::Status { status, body, .. } = self {
            return if body.trim().is_empty() {
                format!("HTTP {}", status)
            } else {
                body.clone()
            };
        }

        let mut text = self.to_string();
        let mut source = self.source();
        while let Some(err) = source {
            text.push_str(": ");
            text.push_str(&err.to_string());
            source = err.source();
        }
        text
    }

    /// Actionable hint for the user (optional)
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ApiError::InvalidUrl { .. } => {
                Some("Fix the backend URL in the settings sidebar (e.g. http://localhost:8000)")
            }
            ApiError::Timeout { .. } => Some("The backend is slow or unreachable; try again later"),
            ApiError::Transport { source, .. } if source.is_connect() => {
                Some("Check that the backend is running and the URL is correct")
            }
            ApiError::Status { status: 404, .. } => {
                Some("The backend does not expose this endpoint; check the backend URL")
            }
            ApiError::Decode { .. } => Some("The backend answered with an unexpected JSON shape"),
            _ => None,
        }
    }
}

/// Invalid user input, detected before any request is sent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be a positive whole number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Unknown {field} '{value}'")]
    UnknownChoice { field: &'static str, value: String },

    #[error("Metadata must be a JSON object: {message}")]
    InvalidMetadata { message: String },
}

/// Why a dashboard action did not produce a result
#[derive(Error, Debug)]
pub enum ActionError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error("{0}")]
    Precondition(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ActionError {
    /// Local failures never reached the network
    pub fn is_local(&self) -> bool {
        !matches!(self, ActionError::Api(_))
    }
}
