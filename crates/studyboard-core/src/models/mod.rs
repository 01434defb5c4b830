//! Wire models exchanged with the learning backend

pub mod course;
pub mod health;
pub mod plan;
pub mod progress;
pub mod quiz;

pub use course::{CourseQuery, CourseResult};
pub use health::HealthStatus;
pub use plan::{CachedPlan, ClassroomPush, Level, Plan, PlanModule, PlanRequest, Resource};
pub use progress::{ProgressStatus, ProgressUpdate};
pub use quiz::{Quiz, QuizChoice, QuizQuestion, QuizRequest};

use serde::{Deserialize, Deserializer};

/// Deserialize a string that the backend may send as `null`
pub(crate) fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
