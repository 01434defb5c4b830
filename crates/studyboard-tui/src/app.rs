//! TUI Application state and key handling

use crate::components::{Toast, ToastManager};
use crate::form::{self, FormState};
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use studyboard_core::models::CachedPlan;
use studyboard_core::{Action, ActionKind, ActionOutcome, Dashboard, HealthStatus, SessionHandle, View};
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::debug;

/// Active tab in the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Search,
    Plan,
    Quiz,
    Progress,
    Classroom,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Search, Tab::Plan, Tab::Quiz, Tab::Progress, Tab::Classroom]
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Search => 0,
            Tab::Plan => 1,
            Tab::Quiz => 2,
            Tab::Progress => 3,
            Tab::Classroom => 4,
        }
    }

    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Tab::Search,
            1 => Tab::Plan,
            2 => Tab::Quiz,
            3 => Tab::Progress,
            4 => Tab::Classroom,
            _ => Tab::Search,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Search => "Search",
            Tab::Plan => "Plan",
            Tab::Quiz => "Quiz",
            Tab::Progress => "Progress",
            Tab::Classroom => "Classroom",
        }
    }

    /// Function key selecting this tab
    pub fn shortcut(&self) -> u8 {
        self.index() as u8 + 1
    }

    /// Tab whose result panel shows an action
    pub fn for_action(kind: ActionKind) -> Self {
        match kind {
            ActionKind::SearchCourses => Tab::Search,
            ActionKind::BuildPlan => Tab::Plan,
            ActionKind::GenerateQuiz => Tab::Quiz,
            ActionKind::UpdateProgress | ActionKind::GetProgress => Tab::Progress,
            ActionKind::PushToClassroom => Tab::Classroom,
        }
    }
}

/// Which pane receives typed keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Sidebar,
    #[default]
    Form,
}

/// Request currently running on a background task
pub struct InFlight {
    pub kind: ActionKind,
    pub started: Instant,
    rx: oneshot::Receiver<ActionOutcome>,
}

/// TUI Application state
pub struct App {
    dashboard: Dashboard,

    /// The single session of this terminal
    session: SessionHandle,

    pub active_tab: Tab,
    pub focus: Focus,

    /// Sidebar fields, applied to the session on Enter
    pub sidebar: FormState,
    pub sidebar_visible: bool,

    forms: HashMap<Tab, FormState>,

    /// Last outcome per tab
    outcomes: HashMap<Tab, ActionOutcome>,

    /// Vertical scroll of the result panel
    pub result_scroll: u16,

    pub in_flight: Option<InFlight>,

    pub health: Option<HealthStatus>,
    health_rx: Option<oneshot::Receiver<HealthStatus>>,

    /// Snapshot of the session's cached plan
    pub cached_plan: Option<CachedPlan>,

    pub toast_manager: ToastManager,

    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    pub fn new(dashboard: Dashboard, session: SessionHandle) -> Self {
        let sidebar = match session.try_lock() {
            Ok(current) => form::settings_form(&current.settings),
            Err(_) => form::settings_form(&Default::default()),
        };

        let forms = HashMap::from([
            (Tab::Search, form::search_fields()),
            (Tab::Plan, form::plan_fields()),
            (Tab::Quiz, form::quiz_fields()),
            (Tab::Progress, form::progress_fields()),
            (Tab::Classroom, form::classroom_fields()),
        ]);

        Self {
            dashboard,
            session,
            active_tab: Tab::Search,
            focus: Focus::Form,
            sidebar,
            sidebar_visible: true,
            forms,
            outcomes: HashMap::new(),
            result_scroll: 0,
            in_flight: None,
            health: None,
            health_rx: None,
            cached_plan: None,
            toast_manager: ToastManager::new(),
            should_quit: false,
        }
    }

    pub fn form(&self, tab: Tab) -> Option<&FormState> {
        self.forms.get(&tab)
    }

    pub fn outcome(&self, tab: Tab) -> Option<&ActionOutcome> {
        self.outcomes.get(&tab)
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_checking_health(&self) -> bool {
        self.health_rx.is_some()
    }

    /// Handle keyboard input
    /// Returns true if the key was consumed
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);

        match key {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
                self.should_quit = true;
                true
            }
            KeyCode::Char('r') if ctrl => {
                self.submit(Action::GetProgress);
                true
            }
            KeyCode::F(n @ 1..=5) => {
                self.active_tab = Tab::from_index(n as usize - 1);
                self.focus = Focus::Form;
                self.result_scroll = 0;
                true
            }
            KeyCode::F(6) => {
                self.toggle_sidebar_focus();
                true
            }
            KeyCode::PageDown => {
                self.result_scroll = self.result_scroll.saturating_add(5);
                true
            }
            KeyCode::PageUp => {
                self.result_scroll = self.result_scroll.saturating_sub(5);
                true
            }
            KeyCode::F(7) => {
                self.check_health();
                true
            }
            KeyCode::Enter => {
                match self.focus {
                    Focus::Sidebar => self.apply_settings(),
                    Focus::Form => self.submit_active(),
                }
                true
            }
            _ => match self.focus {
                Focus::Sidebar => self.sidebar.handle_key(key, modifiers),
                Focus::Form => self
                    .forms
                    .get_mut(&self.active_tab)
                    .is_some_and(|form| form.handle_key(key, modifiers)),
            },
        }
    }

    fn toggle_sidebar_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Form => {
                self.sidebar_visible = true;
                Focus::Sidebar
            }
            Focus::Sidebar => Focus::Form,
        };
    }

    /// Run the action behind the active tab's form
    pub fn submit_active(&mut self) {
        let Some(fields) = self.forms.get(&self.active_tab) else {
            return;
        };

        let action = match self.active_tab {
            Tab::Search => Action::SearchCourses(form::to_search(fields)),
            Tab::Plan => Action::BuildPlan(form::to_plan(fields)),
            Tab::Quiz => Action::GenerateQuiz(form::to_quiz(fields)),
            Tab::Progress => Action::UpdateProgress(form::to_progress(fields)),
            Tab::Classroom => Action::PushToClassroom(form::to_classroom(fields)),
        };

        self.submit(action);
    }

    /// Start an action on a background task; refused while another is running
    pub fn submit(&mut self, action: Action) {
        if let Some(running) = &self.in_flight {
            self.toast_manager.push(Toast::warning(format!(
                "{} is still running",
                running.kind.label()
            )));
            return;
        }

        let kind = action.kind();
        let dashboard = self.dashboard.clone();
        let session = Arc::clone(&self.session);
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let outcome = dashboard.run(&session, action).await;
            let _ = tx.send(outcome);
        });

        debug!(action = kind.label(), "Action submitted");
        self.in_flight = Some(InFlight {
            kind,
            started: Instant::now(),
            rx,
        });
    }

    /// Write the sidebar fields into the session, then re-check health
    pub fn apply_settings(&mut self) {
        if self.is_busy() {
            self.toast_manager
                .push(Toast::warning("Wait for the running request to finish"));
            return;
        }

        match self.session.try_lock() {
            Ok(mut session) => {
                session.settings.update(
                    &self.sidebar.value(0),
                    &self.sidebar.value(1),
                    &self.sidebar.value(2),
                );
            }
            Err(_) => {
                self.toast_manager
                    .push(Toast::warning("Session is busy, try again"));
                return;
            }
        }

        self.toast_manager.push(Toast::info("Settings saved"));
        self.check_health();
    }

    /// Run the health check in the background
    pub fn check_health(&mut self) {
        if self.health_rx.is_some() {
            return;
        }

        let settings = match self.session.try_lock() {
            Ok(session) => session.settings.clone(),
            Err(_) => {
                self.toast_manager
                    .push(Toast::warning("Session is busy, health check skipped"));
                return;
            }
        };

        let dashboard = self.dashboard.clone();
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let _ = tx.send(dashboard.health(&settings).await);
        });
        self.health_rx = Some(rx);
    }

    /// Collect finished background work (non-blocking)
    pub fn poll_background(&mut self) {
        if let Some(rx) = self.health_rx.as_mut() {
            match rx.try_recv() {
                Ok(health) => {
                    self.health = Some(health);
                    self.health_rx = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Closed) => self.health_rx = None,
            }
        }

        let Some(running) = self.in_flight.as_mut() else {
            return;
        };

        let outcome = match running.rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Closed) => ActionOutcome {
                action: running.kind,
                view: View::Error {
                    status: None,
                    message: "The request task stopped unexpectedly".to_string(),
                    suggestion: None,
                },
            },
        };

        self.in_flight = None;
        self.finish(outcome);
    }

    fn finish(&mut self, outcome: ActionOutcome) {
        self.toast_manager.push(Toast::for_outcome(&outcome));

        if let Ok(session) = self.session.try_lock() {
            self.cached_plan = session.cached_plan().cloned();
        }

        self.result_scroll = 0;
        self.outcomes.insert(Tab::for_action(outcome.action), outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use studyboard_core::dashboard::NO_PLAN_WARNING;
    use studyboard_core::store::session_handle;
    use studyboard_core::Settings;

    fn app() -> App {
        let settings = Settings {
            api_url: "http://127.0.0.1:9".to_string(),
            ..Settings::default()
        };
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        App::new(Dashboard::with_http(http), session_handle(settings))
    }

    async fn wait_idle(app: &mut App) {
        for _ in 0..200 {
            app.poll_background();
            if !app.is_busy() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("action did not finish");
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    #[test]
    fn test_function_keys_switch_tabs() {
        let mut app = app();
        assert_eq!(app.active_tab, Tab::Search);

        app.handle_key(KeyCode::F(3), KeyModifiers::NONE);
        assert_eq!(app.active_tab, Tab::Quiz);
        app.handle_key(KeyCode::F(5), KeyModifiers::NONE);
        assert_eq!(app.active_tab, Tab::Classroom);
        assert_eq!(Tab::Classroom.shortcut(), 5);
    }

    #[test]
    fn test_page_keys_scroll_results() {
        let mut app = app();
        app.handle_key(KeyCode::PageDown, KeyModifiers::NONE);
        app.handle_key(KeyCode::PageDown, KeyModifiers::NONE);
        app.handle_key(KeyCode::PageUp, KeyModifiers::NONE);
        assert_eq!(app.result_scroll, 5);

        app.handle_key(KeyCode::F(2), KeyModifiers::NONE);
        assert_eq!(app.result_scroll, 0);
    }

    #[test]
    fn test_typing_goes_to_focused_pane() {
        let mut app = app();
        type_text(&mut app, "sql");
        assert_eq!(app.form(Tab::Search).unwrap().value(0), "sql");

        app.handle_key(KeyCode::F(6), KeyModifiers::NONE);
        assert_eq!(app.focus, Focus::Sidebar);
        app.handle_key(KeyCode::Char('u'), KeyModifiers::CONTROL);
        type_text(&mut app, "http://other:8000");
        assert_eq!(app.sidebar.value(0), "http://other:8000");
        assert_eq!(app.form(Tab::Search).unwrap().value(0), "sql");
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_push_without_plan_warns() {
        let mut app = app();
        app.handle_key(KeyCode::F(5), KeyModifiers::NONE);
        type_text(&mut app, "Algebra");
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert!(app.is_busy());

        wait_idle(&mut app).await;

        let outcome = app.outcome(Tab::Classroom).unwrap();
        assert_eq!(outcome.view, View::Warning(NO_PLAN_WARNING.to_string()));
        assert!(app.cached_plan.is_none());
    }

    #[tokio::test]
    async fn test_second_submit_is_refused_while_in_flight() {
        let mut app = app();
        app.submit(Action::GetProgress);
        let started = app.in_flight.as_ref().map(|f| f.kind);

        app.submit(Action::PushToClassroom(Default::default()));
        assert_eq!(app.in_flight.as_ref().map(|f| f.kind), started);

        wait_idle(&mut app).await;
        assert!(app.outcome(Tab::Progress).unwrap().is_error());
        assert!(app.outcome(Tab::Classroom).is_none());
    }

    #[tokio::test]
    async fn test_settings_are_applied_to_session() {
        let mut app = app();
        app.handle_key(KeyCode::F(6), KeyModifiers::NONE);
        app.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        app.handle_key(KeyCode::Char('u'), KeyModifiers::CONTROL);
        type_text(&mut app, "de");
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(app.session.lock().await.settings.language, "de");
        assert!(app.is_checking_health());
    }

    #[tokio::test]
    async fn test_health_check_on_locked_session_is_reported() {
        let mut app = app();
        let session = Arc::clone(&app.session);
        let _guard = session.lock().await;

        app.handle_key(KeyCode::F(7), KeyModifiers::NONE);

        assert!(!app.is_checking_health());
        let toast = app.toast_manager.latest().unwrap();
        assert_eq!(toast.toast_type, crate::components::ToastType::Warning);
        assert_eq!(toast.message, "Session is busy, health check skipped");
    }
}
