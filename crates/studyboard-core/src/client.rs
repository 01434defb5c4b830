//! HTTP client for the learning backend
//!
//! One method per endpoint. Every call uses its own fixed timeout, is sent
//! exactly once and never retried.

use crate::error::ApiError;
use crate::models::course::SearchResponse;
use crate::models::{
    ClassroomPush, CourseQuery, CourseResult, HealthStatus, Plan, PlanRequest, ProgressUpdate,
    Quiz, QuizRequest,
};
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Backend endpoints used by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Health,
    Courses,
    Plan,
    Quiz,
    ProgressUpdate,
    ProgressGet,
    ClassroomPush,
}

impl Endpoint {
    /// Fixed per-call timeout
    pub fn timeout(&self) -> Duration {
        match self {
            Endpoint::Health => Duration::from_secs(10),
            Endpoint::Courses | Endpoint::ProgressUpdate | Endpoint::ProgressGet => {
                Duration::from_secs(20)
            }
            Endpoint::Plan | Endpoint::Quiz | Endpoint::ClassroomPush => Duration::from_secs(60),
        }
    }

    /// Method and path template, used in logs and error messages
    pub fn label(&self) -> &'static str {
        match self {
            Endpoint::Health => "GET /health/",
            Endpoint::Courses => "GET /api/courses",
            Endpoint::Plan => "POST /api/plan",
            Endpoint::Quiz => "POST /api/quiz",
            Endpoint::ProgressUpdate => "POST /api/progress/{user_id}",
            Endpoint::ProgressGet => "GET /api/progress/{user_id}",
            Endpoint::ClassroomPush => "POST /api/classroom/push",
        }
    }
}

/// Build the shared connection pool
pub fn http_client() -> Result<reqwest::Client, ApiError> {
    reqwest::Client::builder()
        .user_agent(concat!("studyboard/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|source| ApiError::Client { source })
}

/// Client bound to one backend base URL
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client with its own connection pool
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Ok(Self::with_http(http_client()?, base_url))
    }

    /// Create a client sharing an existing connection pool
    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /health/`; never fails, a failure is reported as `Down`
    pub async fn health(&self) -> HealthStatus {
        let result = match self.url("/health/") {
            Ok(url) => self.send(Endpoint::Health, self.http.get(url)).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(body) => HealthStatus::from_body(&body),
            Err(e) => HealthStatus::Down {
                message: e.display_text(),
            },
        }
    }

    /// `GET /api/courses?query=..&language=..&limit=..`
    pub async fn search_courses(&self, query: &CourseQuery) -> Result<Vec<CourseResult>, ApiError> {
        let url = self.url("/api/courses")?;
        let body = self
            .send(Endpoint::Courses, self.http.get(url).query(query))
            .await?;
        let response: SearchResponse = decode(Endpoint::Courses, &body)?;
        Ok(response.into_courses())
    }

    /// `POST /api/plan`
    pub async fn build_plan(&self, request: &PlanRequest) -> Result<Plan, ApiError> {
        let url = self.url("/api/plan")?;
        let body = self
            .send(Endpoint::Plan, self.http.post(url).json(request))
            .await?;
        decode(Endpoint::Plan, &body)
    }

    /// `POST /api/quiz`
    pub async fn generate_quiz(&self, request: &QuizRequest) -> Result<Quiz, ApiError> {
        let url = self.url("/api/quiz")?;
        let body = self
            .send(Endpoint::Quiz, self.http.post(url).json(request))
            .await?;
        decode(Endpoint::Quiz, &body)
    }

    /// `POST /api/progress/{user_id}` with the updates as a JSON array
    pub async fn update_progress(
        &self,
        user_id: &str,
        updates: &[ProgressUpdate],
    ) -> Result<Value, ApiError> {
        let url = self.progress_url(user_id)?;
        let body = self
            .send(Endpoint::ProgressUpdate, self.http.post(url).json(updates))
            .await?;
        decode_value(Endpoint::ProgressUpdate, &body)
    }

    /// `GET /api/progress/{user_id}`
    pub async fn get_progress(&self, user_id: &str) -> Result<Value, ApiError> {
        let url = self.progress_url(user_id)?;
        let body = self.send(Endpoint::ProgressGet, self.http.get(url)).await?;
        decode_value(Endpoint::ProgressGet, &body)
    }

    /// `POST /api/classroom/push`
    pub async fn push_to_classroom(&self, push: &ClassroomPush) -> Result<Value, ApiError> {
        let url = self.url("/api/classroom/push")?;
        let body = self
            .send(Endpoint::ClassroomPush, self.http.post(url).json(push))
            .await?;
        decode_value(Endpoint::ClassroomPush, &body)
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        let raw = format!("{}{}", self.base_url, path);
        let url = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl {
            url: self.base_url.clone(),
            message: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl {
                url: self.base_url.clone(),
                message: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        Ok(url)
    }

    /// User id is pushed as a single, percent-encoded path segment
    fn progress_url(&self, user_id: &str) -> Result<Url, ApiError> {
        let mut url = self.url("/api/progress")?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl {
                url: self.base_url.clone(),
                message: "URL cannot carry a path".to_string(),
            })?
            .push(user_id);
        Ok(url)
    }

    /// Send once and return the body of a 2xx response
    async fn send(&self, endpoint: Endpoint, request: RequestBuilder) -> Result<String, ApiError> {
        let timeout = endpoint.timeout();
        let started = Instant::now();

        debug!(endpoint = endpoint.label(), base_url = %self.base_url, "Sending backend request");

        let response = request
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| transport_error(endpoint, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(endpoint, e))?;

        debug!(
            endpoint = endpoint.label(),
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Backend responded"
        );

        if !status.is_success() {
            warn!(
                endpoint = endpoint.label(),
                status = status.as_u16(),
                "Backend returned an error status"
            );
            return Err(ApiError::Status {
                endpoint: endpoint.label(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

fn transport_error(endpoint: Endpoint, error: reqwest::Error) -> ApiError {
    warn!(endpoint = endpoint.label(), error = %error, "Backend request failed");
    if error.is_timeout() {
        ApiError::Timeout {
            endpoint: endpoint.label(),
            timeout_secs: endpoint.timeout().as_secs(),
        }
    } else {
        ApiError::Transport {
            endpoint: endpoint.label(),
            source: error,
        }
    }
}

fn decode<T: DeserializeOwned>(endpoint: Endpoint, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::Decode {
        endpoint: endpoint.label(),
        source,
    })
}

/// Echoed responses may legitimately be empty
fn decode_value(endpoint: Endpoint, body: &str) -> Result<Value, ApiError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    decode(endpoint, body)
}
