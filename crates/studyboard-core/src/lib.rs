//! studyboard-core - Core library for studyboard
//!
//! Provides the backend wire models, the HTTP client, request forms,
//! session storage and the action handlers shared by the TUI and web front-ends.

pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forms;
pub mod models;
pub mod render;
pub mod store;

pub use client::{BackendClient, Endpoint};
pub use config::Settings;
pub use dashboard::{Action, ActionKind, ActionOutcome, Dashboard, View};
pub use error::{ActionError, ApiError, FormError};
pub use models::HealthStatus;
pub use store::{Session, SessionHandle, SessionId, SessionLimits, SessionStore};
