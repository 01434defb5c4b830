//! Session store with a moka cache + per-session tokio Mutex
//!
//! A session is one dashboard user: the TUI process, or one web browser
//! cookie. It owns the sidebar settings and the single cached plan. Actions
//! hold the session lock for their whole request, so a session never has two
//! requests in flight.

use crate::config::Settings;
use crate::models::{CachedPlan, Plan, PlanRequest};
use chrono::Utc;
use moka::future::Cache;
use moka::notification::RemovalCause;
use moka::policy::EvictionPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

/// Opaque session identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Fresh random identity
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a client-supplied identity; anything malformed is ignored
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s.trim()).ok().map(Self)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// State of one dashboard session
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Sidebar settings (backend URL, language, user id)
    pub settings: Settings,

    /// Most recent successful plan-build
    cached_plan: Option<CachedPlan>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            cached_plan: None,
        }
    }

    pub fn cached_plan(&self) -> Option<&CachedPlan> {
        self.cached_plan.as_ref()
    }

    /// Replace the cached plan; the previous one is dropped, never merged
    pub fn cache_plan(&mut self, request: PlanRequest, plan: Plan) {
        self.cached_plan = Some(CachedPlan {
            request,
            plan,
            cached_at: Utc::now(),
        });
    }
}

/// Shared, lockable session
pub type SessionHandle = Arc<Mutex<Session>>;

/// Create a standalone session handle (TUI, CLI)
pub fn session_handle(settings: Settings) -> SessionHandle {
    Arc::new(Mutex::new(Session::new(settings)))
}

/// Bounds on the sessions a multi-user front-end keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    /// Least recently used sessions are dropped beyond this count
    pub max_sessions: u64,
    /// Sessions untouched for this long are dropped
    pub idle_timeout: Duration,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            max_sessions: 10_000,
            idle_timeout: Duration::from_secs(30 * 60),
        }
    }
}

/// All live sessions of a multi-user front-end
///
/// Backed by a moka cache: every lookup refreshes the idle timer, and
/// abandoned browser sessions expire instead of accumulating.
pub struct SessionStore {
    sessions: Cache<SessionId, SessionHandle>,

    /// Settings new sessions start from
    defaults: Settings,
}

impl SessionStore {
    pub fn new(defaults: Settings) -> Self {
        Self::with_limits(defaults, SessionLimits::default())
    }

    pub fn with_limits(defaults: Settings, limits: SessionLimits) -> Self {
        let sessions = Cache::builder()
            .max_capacity(limits.max_sessions)
            .time_to_idle(limits.idle_timeout)
            .eviction_policy(EvictionPolicy::lru())
            .eviction_listener(|id: Arc<SessionId>, _, cause: RemovalCause| {
                debug!(session = %id, cause = ?cause, "Dropped dashboard session");
            })
            .build();

        Self { sessions, defaults }
    }

    pub async fn get(&self, id: &SessionId) -> Option<SessionHandle> {
        self.sessions.get(id).await
    }

    /// Resolve a client-supplied session, creating one when it is unknown
    /// or has expired
    ///
    /// Returns the identity to use from now on and whether it is new.
    pub async fn get_or_create(&self, id: Option<SessionId>) -> (SessionId, SessionHandle, bool) {
        if let Some(id) = id {
            if let Some(handle) = self.get(&id).await {
                return (id, handle, false);
            }
        }

        // Unknown ids are not adopted: the server picks the identity
        let id = SessionId::new();
        let handle = session_handle(self.defaults.clone());
        self.sessions.insert(id, Arc::clone(&handle)).await;
        let total = self.len().await;
        debug!(session = %id, total = total, "Created dashboard session");

        (id, handle, true)
    }

    /// Live sessions, after applying pending evictions
    pub async fn len(&self) -> u64 {
        self.sessions.run_pending_tasks().await;
        self.sessions.entry_count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
