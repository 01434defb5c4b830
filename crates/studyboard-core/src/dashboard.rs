//! Dashboard action handlers
//!
//! Each action is one request/response cycle: build the payload from the
//! form, send one request, turn the response (or the failure) into a `View`.
//! Nothing is retried and a failed action leaves the session untouched.

use crate::client::{http_client, BackendClient};
use crate::config::Settings;
use crate::error::{ActionError, ApiError};
use crate::forms::{ClassroomForm, PlanForm, ProgressForm, QuizForm, SearchForm};
use crate::models::{CourseResult, HealthStatus, Plan, Quiz};
use crate::store::{Session, SessionHandle};
use serde_json::Value;
use tracing::{info, warn};

/// Shown when a classroom push is attempted before any plan was built
pub const NO_PLAN_WARNING: &str = "Build a plan first: there is no plan to push to the classroom";

/// A user-triggered action together with its form values
#[derive(Debug, Clone)]
pub enum Action {
    SearchCourses(SearchForm),
    BuildPlan(PlanForm),
    GenerateQuiz(QuizForm),
    UpdateProgress(ProgressForm),
    GetProgress,
    PushToClassroom(ClassroomForm),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::SearchCourses(_) => ActionKind::SearchCourses,
            Action::BuildPlan(_) => ActionKind::BuildPlan,
            Action::GenerateQuiz(_) => ActionKind::GenerateQuiz,
            Action::UpdateProgress(_) => ActionKind::UpdateProgress,
            Action::GetProgress => ActionKind::GetProgress,
            Action::PushToClassroom(_) => ActionKind::PushToClassroom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    SearchCourses,
    BuildPlan,
    GenerateQuiz,
    UpdateProgress,
    GetProgress,
    PushToClassroom,
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::SearchCourses => "Search Courses",
            ActionKind::BuildPlan => "Build Plan",
            ActionKind::GenerateQuiz => "Generate Quiz",
            ActionKind::UpdateProgress => "Update Progress",
            ActionKind::GetProgress => "Get Progress",
            ActionKind::PushToClassroom => "Push Plan to Classroom",
        }
    }
}

/// What the front-end renders after an action
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Courses(Vec<CourseResult>),
    Plan(Plan),
    Quiz(Quiz),
    /// Confirmation plus the backend's echoed JSON
    Saved { message: String, echoed: Value },
    /// Raw JSON as returned
    Json(Value),
    /// Local precondition failure; no request was sent
    Warning(String),
    /// Transport failure, error status or undecodable body
    Error {
        status: Option<u16>,
        message: String,
        suggestion: Option<String>,
    },
}

impl From<ActionError> for View {
    fn from(error: ActionError) -> Self {
        match error {
            ActionError::Form(e) => View::Warning(e.to_string()),
            ActionError::Precondition(message) => View::Warning(message),
            ActionError::Api(e) => View::from(e),
        }
    }
}

impl From<ApiError> for View {
    fn from(error: ApiError) -> Self {
        View::Error {
            status: error.status(),
            message: error.display_text(),
            suggestion: error.suggestion().map(str::to_string),
        }
    }
}

/// Result of one action
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    pub action: ActionKind,
    pub view: View,
}

impl ActionOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self.view, View::Error { .. })
    }

    pub fn is_warning(&self) -> bool {
        matches!(self.view, View::Warning(_))
    }

    pub fn is_success(&self) -> bool {
        !self.is_error() && !self.is_warning()
    }
}

/// Runs actions against the backend configured in each session
#[derive(Debug, Clone)]
pub struct Dashboard {
    http: reqwest::Client,
}

impl Dashboard {
    pub fn new() -> Result<Self, ApiError> {
        Ok(Self::with_http(http_client()?))
    }

    pub fn with_http(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Client for the session's current backend URL
    pub fn client(&self, settings: &Settings) -> BackendClient {
        BackendClient::with_http(self.http.clone(), settings.base_url())
    }

    /// Health check, run on every page load
    pub async fn health(&self, settings: &Settings) -> HealthStatus {
        self.client(settings).health().await
    }

    /// Run one action, holding the session for its whole duration
    pub async fn run(&self, session: &SessionHandle, action: Action) -> ActionOutcome {
        let kind = action.kind();
        let mut session = session.lock().await;

        let view = match self.dispatch(&mut session, action).await {
            Ok(view) => {
                info!(action = kind.label(), "Action completed");
                view
            }
            Err(e) => {
                if e.is_local() {
                    info!(action = kind.label(), reason = %e, "Action refused locally");
                } else {
                    warn!(action = kind.label(), error = %e, "Action failed");
                }
                View::from(e)
            }
        };

        ActionOutcome { action: kind, view }
    }

    async fn dispatch(&self, session: &mut Session, action: Action) -> Result<View, ActionError> {
        let client = self.client(&session.settings);

        match action {
            Action::SearchCourses(form) => {
                let query = form.to_query(&session.settings)?;
                let courses = client.search_courses(&query).await?;
                Ok(View::Courses(courses))
            }
            Action::BuildPlan(form) => {
                let request = form.to_request(&session.settings)?;
                let plan = client.build_plan(&request).await?;
                session.cache_plan(request, plan.clone());
                Ok(View::Plan(plan))
            }
            Action::GenerateQuiz(form) => {
                let request = form.to_request(&session.settings)?;
                let quiz = client.generate_quiz(&request).await?;
                Ok(View::Quiz(quiz))
            }
            Action::UpdateProgress(form) => {
                let update = form.to_update()?;
                let user_id = &session.settings.user_id;
                let echoed = client
                    .update_progress(user_id, std::slice::from_ref(&update))
                    .await?;
                Ok(View::Saved {
                    message: format!(
                        "Progress saved: {} is {} for {}",
                        update.item_id, update.status, user_id
                    ),
                    echoed,
                })
            }
            Action::GetProgress => {
                let progress = client.get_progress(&session.settings.user_id).await?;
                Ok(View::Json(progress))
            }
            Action::PushToClassroom(form) => {
                let cached = session
                    .cached_plan()
                    .ok_or_else(|| ActionError::Precondition(NO_PLAN_WARNING.to_string()))?;
                let push = form.to_push(cached.request.clone())?;
                let echoed = client.push_to_classroom(&push).await?;
                Ok(View::Saved {
                    message: format!("Plan pushed to classroom course '{}'", push.course_name),
                    echoed,
                })
            }
        }
    }
}
