//! Request forms
//!
//! Widget values exactly as the user typed them. Both front-ends edit these
//! structs and convert them to wire requests right before an action runs, so
//! a bad value is reported locally and never reaches the backend.

use crate::config::Settings;
use crate::error::FormError;
use crate::models::{
    ClassroomPush, CourseQuery, Level, PlanRequest, ProgressStatus, ProgressUpdate, QuizRequest,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_SEARCH_LIMIT: u32 = 10;
pub const DEFAULT_NUM_QUESTIONS: u32 = 5;
pub const DEFAULT_DURATION_WEEKS: u32 = 4;

/// Search Courses form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub query: String,
    pub limit: String,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            query: String::new(),
            limit: DEFAULT_SEARCH_LIMIT.to_string(),
        }
    }
}

impl SearchForm {
    pub fn to_query(&self, settings: &Settings) -> Result<CourseQuery, FormError> {
        Ok(CourseQuery {
            query: required("Search query", &self.query)?,
            language: settings.language.clone(),
            limit: parse_positive("Limit", &self.limit)?,
        })
    }
}

/// Build Plan form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanForm {
    /// Comma- or newline-separated goals
    pub goals: String,
    pub level: String,
    /// Comma-separated; empty means the sidebar language
    pub preferred_languages: String,
    pub duration_weeks: String,
}

impl Default for PlanForm {
    fn default() -> Self {
        Self {
            goals: String::new(),
            level: Level::default().to_string(),
            preferred_languages: String::new(),
            duration_weeks: DEFAULT_DURATION_WEEKS.to_string(),
        }
    }
}

impl PlanForm {
    pub fn to_request(&self, settings: &Settings) -> Result<PlanRequest, FormError> {
        let goals = split_list(&self.goals);
        if goals.is_empty() {
            return Err(FormError::Missing { field: "Goals" });
        }

        let mut preferred_languages = split_list(&self.preferred_languages);
        if preferred_languages.is_empty() && !settings.language.is_empty() {
            preferred_languages.push(settings.language.clone());
        }

        Ok(PlanRequest {
            goals,
            level: self.level.parse()?,
            preferred_languages,
            duration_weeks: parse_positive("Duration (weeks)", &self.duration_weeks)?,
        })
    }
}

/// Generate Quiz form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizForm {
    pub topic: String,
    pub num_questions: String,
}

impl Default for QuizForm {
    fn default() -> Self {
        Self {
            topic: String::new(),
            num_questions: DEFAULT_NUM_QUESTIONS.to_string(),
        }
    }
}

impl QuizForm {
    pub fn to_request(&self, settings: &Settings) -> Result<QuizRequest, FormError> {
        Ok(QuizRequest {
            topic: required("Topic", &self.topic)?,
            num_questions: parse_positive("Number of questions", &self.num_questions)?,
            language: settings.language.clone(),
        })
    }
}

/// Update Progress form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressForm {
    pub item_id: String,
    pub status: String,
    /// JSON object text; empty means `{}`
    pub metadata: String,
}

impl Default for ProgressForm {
    fn default() -> Self {
        Self {
            item_id: String::new(),
            status: ProgressStatus::default().to_string(),
            metadata: String::new(),
        }
    }
}

impl ProgressForm {
    /// The single array element posted for this form
    pub fn to_update(&self) -> Result<ProgressUpdate, FormError> {
        // Item id is sent literally; only emptiness is checked
        if self.item_id.trim().is_empty() {
            return Err(FormError::Missing { field: "Item id" });
        }

        Ok(ProgressUpdate {
            item_id: self.item_id.clone(),
            status: self.status.parse()?,
            metadata: parse_metadata(&self.metadata)?,
        })
    }
}

/// Push Plan to Classroom form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassroomForm {
    pub course_name: String,
}

impl ClassroomForm {
    pub fn to_push(&self, plan: PlanRequest) -> Result<ClassroomPush, FormError> {
        Ok(ClassroomPush {
            course_name: required("Course name", &self.course_name)?,
            plan,
        })
    }
}

/// Split comma- or newline-separated input, dropping blank entries
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse metadata text into a JSON object
pub fn parse_metadata(input: &str) -> Result<Map<String, Value>, FormError> {
    if input.trim().is_empty() {
        return Ok(Map::new());
    }

    match serde_json::from_str::<Value>(input) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(FormError::InvalidMetadata {
            message: format!("expected an object, got {}", json_kind(&other)),
        }),
        Err(e) => Err(FormError::InvalidMetadata {
            message: e.to_string(),
        }),
    }
}

fn required(field: &'static str, value: &str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FormError::Missing { field })
    } else {
        Ok(value.to_string())
    }
}

fn parse_positive(field: &'static str, value: &str) -> Result<u32, FormError> {
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(FormError::InvalidNumber {
            field,
            value: value.to_string(),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
