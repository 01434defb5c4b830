//! Web router using Axum

use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use studyboard_core::forms::{ClassroomForm, PlanForm, ProgressForm, QuizForm, SearchForm};
use studyboard_core::{Action, ActionOutcome, ApiError, Dashboard, SessionStore, Settings};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::pages::{render_page, PageContext, PageForms};
use crate::session::CurrentSession;

/// Shared state of the web dashboard
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Dashboard,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(dashboard: Dashboard, sessions: SessionStore) -> Self {
        Self {
            dashboard,
            sessions: Arc::new(sessions),
        }
    }
}

/// Build the application served by the shim
///
/// Fails only when the HTTP client cannot be constructed.
pub fn create_app(defaults: Settings) -> Result<Router, ApiError> {
    let dashboard = Dashboard::new()?;
    Ok(create_router(AppState::new(
        dashboard,
        SessionStore::new(defaults),
    )))
}

/// Create the web router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/settings", post(settings_handler))
        .route("/actions/search", post(search_handler))
        .route("/actions/plan", post(plan_handler))
        .route("/actions/quiz", post(quiz_handler))
        .route("/actions/progress/update", post(progress_update_handler))
        .route("/actions/progress/get", post(progress_get_handler))
        .route("/actions/classroom", post(classroom_handler))
        .route("/health/", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Sidebar form
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub api_url: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub user_id: String,
}

async fn index_handler(State(state): State<AppState>, session: CurrentSession) -> Response {
    let page = render(&state, &session, PageForms::default(), None).await;
    session.respond(page)
}

async fn settings_handler(
    session: CurrentSession,
    Form(form): Form<SettingsForm>,
) -> Response {
    {
        let mut current = session.handle.lock().await;
        current
            .settings
            .update(&form.api_url, &form.language, &form.user_id);
        debug!(session = %session.id, api_url = %current.settings.api_url, "Settings updated");
    }
    session.respond(Redirect::to("/"))
}

async fn search_handler(
    State(state): State<AppState>,
    session: CurrentSession,
    Form(form): Form<SearchForm>,
) -> Response {
    let forms = PageForms {
        search: form.clone(),
        ..PageForms::default()
    };
    run_action(&state, &session, forms, Action::SearchCourses(form)).await
}

async fn plan_handler(
    State(state): State<AppState>,
    session: CurrentSession,
    Form(form): Form<PlanForm>,
) -> Response {
    let forms = PageForms {
        plan: form.clone(),
        ..PageForms::default()
    };
    run_action(&state, &session, forms, Action::BuildPlan(form)).await
}

async fn quiz_handler(
    State(state): State<AppState>,
    session: CurrentSession,
    Form(form): Form<QuizForm>,
) -> Response {
    let forms = PageForms {
        quiz: form.clone(),
        ..PageForms::default()
    };
    run_action(&state, &session, forms, Action::GenerateQuiz(form)).await
}

async fn progress_update_handler(
    State(state): State<AppState>,
    session: CurrentSession,
    Form(form): Form<ProgressForm>,
) -> Response {
    let forms = PageForms {
        progress: form.clone(),
        ..PageForms::default()
    };
    run_action(&state, &session, forms, Action::UpdateProgress(form)).await
}

async fn progress_get_handler(State(state): State<AppState>, session: CurrentSession) -> Response {
    run_action(&state, &session, PageForms::default(), Action::GetProgress).await
}

async fn classroom_handler(
    State(state): State<AppState>,
    session: CurrentSession,
    Form(form): Form<ClassroomForm>,
) -> Response {
    let forms = PageForms {
        classroom: form.clone(),
        ..PageForms::default()
    };
    run_action(&state, &session, forms, Action::PushToClassroom(form)).await
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "studyboard-web",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn run_action(
    state: &AppState,
    session: &CurrentSession,
    forms: PageForms,
    action: Action,
) -> Response {
    let outcome = state.dashboard.run(&session.handle, action).await;
    let page = render(state, session, forms, Some(outcome)).await;
    session.respond(page)
}

/// Snapshot the session, run the page-load health check and render
async fn render(
    state: &AppState,
    session: &CurrentSession,
    forms: PageForms,
    outcome: Option<ActionOutcome>,
) -> Html<String> {
    let (settings, cached_plan) = {
        let current = session.handle.lock().await;
        (current.settings.clone(), current.cached_plan().cloned())
    };

    let health = state.dashboard.health(&settings).await;

    Html(render_page(&PageContext {
        settings: &settings,
        health: &health,
        cached_plan: cached_plan.as_ref(),
        forms: &forms,
        outcome: outcome.as_ref(),
    }))
}
