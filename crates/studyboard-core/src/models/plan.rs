//! Learning plan models

use crate::error::FormError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Learner level sent with a plan request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn all() -> &'static [Level] {
        &[Level::Beginner, Level::Intermediate, Level::Advanced]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            "advanced" => Ok(Level::Advanced),
            other => Err(FormError::UnknownChoice {
                field: "Level",
                value: other.to_string(),
            }),
        }
    }
}

/// Body of `POST /api/plan`, also embedded in a classroom push
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub goals: Vec<String>,
    pub level: Level,
    pub preferred_languages: Vec<String>,
    pub duration_weeks: u32,
}

/// A single link within a module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default, deserialize_with = "super::string_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "super::string_or_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "super::string_or_empty")]
    pub platform: String,
}

/// Named group of resources
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanModule {
    #[serde(default, deserialize_with = "super::string_or_empty")]
    pub title: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// Generated learning plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default, deserialize_with = "super::string_or_empty")]
    pub summary: String,
    #[serde(default)]
    pub modules: Vec<PlanModule>,
}

impl Plan {
    pub fn resource_count(&self) -> usize {
        self.modules.iter().map(|m| m.resources.len()).sum()
    }
}

/// Most recent successful plan of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedPlan {
    /// Parameters that produced the plan
    pub request: PlanRequest,
    /// Plan exactly as returned by the backend
    pub plan: Plan,
    pub cached_at: DateTime<Utc>,
}

/// Body of `POST /api/classroom/push`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassroomPush {
    pub course_name: String,
    pub plan: PlanRequest,
}
