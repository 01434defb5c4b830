//! Dashboard configuration
//!
//! Settings come from the environment (optionally seeded by a `.env` file) and
//! are then overridden per session by the sidebar fields.

use serde::{Deserialize, Serialize};

/// Environment variable holding the default backend URL
pub const API_URL_ENV: &str = "API_URL";
/// Environment variable holding the default preferred language
pub const LANGUAGE_ENV: &str = "STUDYBOARD_LANGUAGE";
/// Environment variable holding the default user id
pub const USER_ID_ENV: &str = "STUDYBOARD_USER_ID";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_USER_ID: &str = "demo-user";

/// Sidebar settings of one dashboard session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Backend base URL (without the `/api` prefix)
    pub api_url: String,
    /// Preferred language sent with searches and quizzes
    pub language: String,
    /// User whose progress is read and written
    pub user_id: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
        }
    }
}

impl Settings {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup; blank values fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            api_url: read(API_URL_ENV, DEFAULT_API_URL),
            language: read(LANGUAGE_ENV, DEFAULT_LANGUAGE),
            user_id: read(USER_ID_ENV, DEFAULT_USER_ID),
        }
    }

    /// Apply sidebar edits. Values are trimmed; nothing is validated here,
    /// a bad URL surfaces as an error on the next action.
    pub fn update(&mut self, api_url: &str, language: &str, user_id: &str) {
        self.api_url = api_url.trim().to_string();
        self.language = language.trim().to_string();
        self.user_id = user_id.trim().to_string();
    }

    /// Backend URL without trailing slashes
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

/// Load `.env` from the working directory into the process environment
///
/// Existing variables win over the file. A missing file is not an error.
pub fn load_dotenv() -> Option<std::path::PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!("Loaded environment from {}", path.display());
            Some(path)
        }
        Err(e) if e.not_found() => None,
        Err(e) => {
            tracing::warn!("Ignoring unreadable .env file: {}", e);
            None
        }
    }
}
