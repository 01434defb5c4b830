//! Cookie-based session identity for the web dashboard

use crate::router::AppState;
use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use std::convert::Infallible;
use studyboard_core::{SessionHandle, SessionId};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "studyboard_session";

/// Session of the current request, created on first visit
pub struct CurrentSession {
    pub id: SessionId,
    pub handle: SessionHandle,
    /// True when the browser has not been told about `id` yet
    pub created: bool,
}

impl CurrentSession {
    /// Attach the session cookie to a response when the session is new
    pub fn respond(&self, response: impl IntoResponse) -> Response {
        let mut response = response.into_response();
        if self.created {
            let cookie = format!(
                "{}={}; Path=/; HttpOnly; SameSite=Lax",
                SESSION_COOKIE, self.id
            );
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                response.headers_mut().append(SET_COOKIE, value);
            }
        }
        response
    }
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let requested = session_cookie(&parts.headers);
        let (id, handle, created) = state.sessions.get_or_create(requested).await;
        Ok(Self {
            id,
            handle,
            created,
        })
    }
}

/// Read the session id from the `Cookie` headers
pub fn session_cookie(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| SessionId::parse(value))
}
