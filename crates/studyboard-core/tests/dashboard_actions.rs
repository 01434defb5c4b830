//! Integration tests for the dashboard actions against an in-process fake backend

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use studyboard_core::forms::{ClassroomForm, PlanForm, ProgressForm, QuizForm, SearchForm};
use studyboard_core::store::session_handle;
use studyboard_core::models::{CourseQuery, QuizRequest};
use studyboard_core::{
    Action, ApiError, BackendClient, Dashboard, HealthStatus, SessionHandle, Settings, View,
};

/// Request seen by the fake backend
#[derive(Debug, Clone)]
struct Hit {
    method: Method,
    path: String,
    query: Option<String>,
    body: Option<Value>,
}

/// Fake backend: records every request, answers canned JSON per path,
/// or a forced status for selected paths
#[derive(Default)]
struct Backend {
    hits: Mutex<Vec<Hit>>,
    failures: Mutex<HashMap<String, (u16, String)>>,
}

impl Backend {
    fn hits(&self) -> Vec<Hit> {
        self.hits.lock().unwrap().clone()
    }

    fn fail(&self, path: &str, status: u16, body: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(path.to_string(), (status, body.to_string()));
    }
}

async fn handle(
    State(backend): State<Arc<Backend>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let parsed = serde_json::from_slice::<Value>(&body).ok();
    backend.hits.lock().unwrap().push(Hit {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        body: parsed.clone(),
    });

    if let Some((status, text)) = backend.failures.lock().unwrap().get(&path).cloned() {
        return (StatusCode::from_u16(status).unwrap(), text).into_response();
    }

    let payload = match (method.as_str(), path.as_str()) {
        ("GET", "/health/") => json!({"status": "ok"}),
        ("GET", "/api/courses") => json!([
            {"title": "Intro to Rust", "url": "https://courses.example/rust", "platform": "Coursera"},
            {"title": "Rust Web", "url": "https://courses.example/web", "platform": "Udemy"},
            {"title": "Systems", "url": "https://courses.example/sys", "platform": "edX"}
        ]),
        ("POST", "/api/plan") => json!({
            "summary": "A two-module plan",
            "modules": [
                {"title": "Basics", "resources": [
                    {"title": "Book", "url": "https://doc.example/book", "platform": "docs"}
                ]},
                {"title": "Projects", "resources": []}
            ]
        }),
        ("POST", "/api/quiz") => json!({"questions": [
            {"question": "What does `&mut` grant?", "choices": [
                {"text": "Shared access", "is_correct": false},
                {"text": "Exclusive access", "is_correct": true}
            ]}
        ]}),
        ("POST", "/api/classroom/push") => json!({"pushed": true, "received": parsed}),
        ("GET", p) if p.starts_with("/api/progress/") => {
            json!({"user": p.trim_start_matches("/api/progress/"), "items": []})
        }
        ("POST", p) if p.starts_with("/api/progress/") => json!({"saved": parsed}),
        _ => return (StatusCode::NOT_FOUND, "no such route").into_response(),
    };

    axum::Json(payload).into_response()
}

async fn spawn_backend() -> (Arc<Backend>, String) {
    let backend = Arc::new(Backend::default());
    let app = Router::new()
        .fallback(handle)
        .with_state(Arc::clone(&backend));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (backend, format!("http://{}", addr))
}

fn session_for(url: &str) -> SessionHandle {
    session_handle(Settings {
        api_url: url.to_string(),
        language: "en".to_string(),
        user_id: "learner-7".to_string(),
    })
}

/// Loopback traffic must not be routed through a proxy from the environment
fn dashboard() -> Dashboard {
    Dashboard::with_http(reqwest::Client::builder().no_proxy().build().unwrap())
}

fn plan_form() -> PlanForm {
    PlanForm {
        goals: "ownership, lifetimes".to_string(),
        level: "intermediate".to_string(),
        preferred_languages: "en, de".to_string(),
        duration_weeks: "6".to_string(),
    }
}

#[tokio::test]
async fn test_search_renders_every_course() {
    let (backend, url) = spawn_backend().await;
    let session = session_for(&url);
    let dashboard = dashboard();

    let outcome = dashboard
        .run(
            &session,
            Action::SearchCourses(SearchForm {
                query: "rust".to_string(),
                limit: "3".to_string(),
            }),
        )
        .await;

    let View::Courses(courses) = &outcome.view else {
        panic!("expected courses, got {:?}", outcome.view);
    };
    assert_eq!(courses.len(), 3);
    assert_eq!(courses[1].title, "Rust Web");
    assert_eq!(courses[1].url, "https://courses.example/web");
    assert_eq!(courses[1].platform, "Udemy");
    assert_eq!(studyboard_core::render::outcome_lines(&outcome).len(), 3);

    let hits = backend.hits();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].method, Method::GET);
    let query = hits[0].query.as_deref().unwrap();
    assert!(query.contains("query=rust"));
    assert!(query.contains("language=en"));
    assert!(query.contains("limit=3"));
}

#[tokio::test]
async fn test_plan_success_is_cached_exactly() {
    let (backend, url) = spawn_backend().await;
    let session = session_for(&url);
    let dashboard = dashboard();

    let outcome = dashboard.run(&session, Action::BuildPlan(plan_form())).await;
    let View::Plan(plan) = outcome.view else {
        panic!("expected a plan");
    };

    let guard = session.lock().await;
    let cached = guard.cached_plan().expect("plan should be cached");
    assert_eq!(cached.plan, plan);
    assert_eq!(cached.plan.modules.len(), 2);
    assert_eq!(cached.request.goals, vec!["ownership", "lifetimes"]);

    let body = backend.hits()[0].body.clone().unwrap();
    assert_eq!(
        body,
        json!({
            "goals": ["ownership", "lifetimes"],
            "level": "intermediate",
            "preferred_languages": ["en", "de"],
            "duration_weeks": 6
        })
    );
}

#[tokio::test]
async fn test_failed_plan_keeps_previous_cache() {
    let (backend, url) = spawn_backend().await;
    let session = session_for(&url);
    let dashboard = dashboard();

    dashboard.run(&session, Action::BuildPlan(plan_form())).await;
    backend.fail("/api/plan", 503, "planner overloaded");

    let outcome = dashboard
        .run(
            &session,
            Action::BuildPlan(PlanForm {
                goals: "something else".to_string(),
                ..plan_form()
            }),
        )
        .await;

    assert!(outcome.is_error());
    let guard = session.lock().await;
    assert_eq!(
        guard.cached_plan().unwrap().request.goals,
        vec!["ownership", "lifetimes"]
    );
}

#[tokio::test]
async fn test_classroom_push_without_plan_sends_nothing() {
    let (backend, url) = spawn_backend().await;
    let session = session_for(&url);
    let dashboard = dashboard();

    let outcome = dashboard
        .run(
            &session,
            Action::PushToClassroom(ClassroomForm {
                course_name: "CS 101".to_string(),
            }),
        )
        .await;

    assert!(outcome.is_warning());
    assert!(backend.hits().is_empty());
}

#[tokio::test]
async fn test_classroom_push_sends_cached_plan_parameters() {
    let (backend, url) = spawn_backend().await;
    let session = session_for(&url);
    let dashboard = dashboard();

    dashboard.run(&session, Action::BuildPlan(plan_form())).await;
    let outcome = dashboard
        .run(
            &session,
            Action::PushToClassroom(ClassroomForm {
                course_name: "CS 101".to_string(),
            }),
        )
        .await;

    assert!(matches!(outcome.view, View::Saved { .. }));
    let hits = backend.hits();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[1].path, "/api/classroom/push");
    assert_eq!(
        hits[1].body.clone().unwrap(),
        json!({
            "course_name": "CS 101",
            "plan": {
                "goals": ["ownership", "lifetimes"],
                "level": "intermediate",
                "preferred_languages": ["en", "de"],
                "duration_weeks": 6
            }
        })
    );
}

#[tokio::test]
async fn test_progress_update_posts_one_literal_element() {
    let (backend, url) = spawn_backend().await;
    let session = session_for(&url);
    let dashboard = dashboard();

    let outcome = dashboard
        .run(
            &session,
            Action::UpdateProgress(ProgressForm {
                item_id: " lesson-4 ".to_string(),
                status: "completed".to_string(),
                metadata: r#"{"minutes": 35}"#.to_string(),
            }),
        )
        .await;

    assert!(outcome.is_success());
    let hits = backend.hits();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].method, Method::POST);
    assert_eq!(hits[0].path, "/api/progress/learner-7");
    assert_eq!(
        hits[0].body.clone().unwrap(),
        json!([{"item_id": " lesson-4 ", "status": "completed", "metadata": {"minutes": 35}}])
    );
}

#[tokio::test]
async fn test_get_progress_returns_raw_json() {
    let (_backend, url) = spawn_backend().await;
    let session = session_for(&url);
    let dashboard = dashboard();

    let outcome = dashboard.run(&session, Action::GetProgress).await;
    assert_eq!(
        outcome.view,
        View::Json(json!({"user": "learner-7", "items": []}))
    );
}

#[tokio::test]
async fn test_error_status_displays_body_for_every_endpoint() {
    let (backend, url) = spawn_backend().await;
    let session = session_for(&url);
    let dashboard = dashboard();

    for path in [
        "/api/courses",
        "/api/plan",
        "/api/quiz",
        "/api/progress/learner-7",
        "/api/classroom/push",
    ] {
        backend.fail(path, 500, &format!("boom at {}", path));
    }

    // Seed a plan so the classroom push reaches the network
    session.lock().await.cache_plan(
        plan_form().to_request(&Settings::default()).unwrap(),
        Default::default(),
    );

    let actions = vec![
        (
            Action::SearchCourses(SearchForm {
                query: "x".to_string(),
                ..Default::default()
            }),
            "/api/courses",
        ),
        (Action::BuildPlan(plan_form()), "/api/plan"),
        (
            Action::GenerateQuiz(QuizForm {
                topic: "x".to_string(),
                ..Default::default()
            }),
            "/api/quiz",
        ),
        (
            Action::UpdateProgress(ProgressForm {
                item_id: "i".to_string(),
                ..Default::default()
            }),
            "/api/progress/learner-7",
        ),
        (Action::GetProgress, "/api/progress/learner-7"),
        (
            Action::PushToClassroom(ClassroomForm {
                course_name: "c".to_string(),
            }),
            "/api/classroom/push",
        ),
    ];

    for (action, path) in actions {
        let outcome = dashboard.run(&session, action).await;
        match outcome.view {
            View::Error {
                status, message, ..
            } => {
                assert_eq!(status, Some(500));
                assert_eq!(message, format!("boom at {}", path));
            }
            other => panic!("expected error for {}, got {:?}", path, other),
        }
    }

    backend.fail("/health/", 502, "gateway says no");
    let settings = session.lock().await.settings.clone();
    assert_eq!(
        dashboard.health(&settings).await,
        HealthStatus::Down {
            message: "gateway says no".to_string()
        }
    );
}

#[tokio::test]
async fn test_quiz_decodes_choices() {
    let (_backend, url) = spawn_backend().await;
    let session = session_for(&url);
    let dashboard = dashboard();

    let outcome = dashboard
        .run(
            &session,
            Action::GenerateQuiz(QuizForm {
                topic: "borrowing".to_string(),
                num_questions: "1".to_string(),
            }),
        )
        .await;

    let lines = studyboard_core::render::outcome_lines(&outcome);
    assert_eq!(lines[0], "1. What does `&mut` grant?");
    assert_eq!(lines[1], "   - Shared access");
    assert_eq!(lines[2], "   - Exclusive access (correct)");
}

#[tokio::test]
async fn test_unreachable_backend_is_reported_not_raised() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let session = session_for(&url);
    let dashboard = dashboard();

    let outcome = dashboard.run(&session, Action::GetProgress).await;
    match outcome.view {
        View::Error {
            status, message, ..
        } => {
            assert_eq!(status, None);
            assert!(message.contains("GET /api/progress/{user_id} failed"));
        }
        other => panic!("expected transport error, got {:?}", other),
    }

    let health = dashboard.health(&session.lock().await.settings).await;
    assert!(matches!(health, HealthStatus::Down { .. }));
}

#[tokio::test]
async fn test_health_reports_status_field() {
    let (_backend, url) = spawn_backend().await;
    let dashboard = dashboard();
    let settings = Settings {
        api_url: format!("{}/", url),
        ..Settings::default()
    };

    assert_eq!(
        dashboard.health(&settings).await,
        HealthStatus::Up {
            status: "ok".to_string()
        }
    );
}

/// Accepts connections and never answers
async fn spawn_stalled_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}", addr)
}

#[tokio::test(start_paused = true)]
async fn test_stalled_backend_hits_endpoint_timeout() {
    let url = spawn_stalled_backend().await;
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    let client = BackendClient::with_http(http, url);

    let search = client
        .search_courses(&CourseQuery {
            query: "rust".to_string(),
            language: "en".to_string(),
            limit: 3,
        })
        .await;
    assert!(matches!(
        search,
        Err(ApiError::Timeout {
            timeout_secs: 20,
            ..
        })
    ));

    let quiz = client
        .generate_quiz(&QuizRequest {
            topic: "traits".to_string(),
            num_questions: 2,
            language: "en".to_string(),
        })
        .await;
    assert!(matches!(
        quiz,
        Err(ApiError::Timeout {
            timeout_secs: 60,
            ..
        })
    ));

    assert!(matches!(client.health().await, HealthStatus::Down { .. }));
}
