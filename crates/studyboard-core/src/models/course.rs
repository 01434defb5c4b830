//! Course search models

use serde::{Deserialize, Serialize};

/// Query string parameters of `GET /api/courses`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseQuery {
    pub query: String,
    pub language: String,
    pub limit: u32,
}

/// One search hit (display-only)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseResult {
    #[serde(default, deserialize_with = "super::string_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "super::string_or_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "super::string_or_empty")]
    pub platform: String,
}

/// Accepted shapes of the search response
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SearchResponse {
    Bare(Vec<CourseResult>),
    Results { results: Vec<CourseResult> },
    Courses { courses: Vec<CourseResult> },
}

impl SearchResponse {
    pub(crate) fn into_courses(self) -> Vec<CourseResult> {
        match self {
            SearchResponse::Bare(courses)
            | SearchResponse::Results { results: courses }
            | SearchResponse::Courses { courses } => courses,
        }
    }
}
