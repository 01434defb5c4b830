//! Toast notifications for action results

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};
use studyboard_core::{ActionOutcome, View};

use crate::theme::StatusColor;

/// Toasts stacked at the bottom of the screen
const MAX_VISIBLE: usize = 3;
const TOAST_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastType {
    Success,
    Warning,
    Error,
    Info,
}

impl ToastType {
    fn status(&self) -> StatusColor {
        match self {
            Self::Success => StatusColor::Success,
            Self::Warning => StatusColor::Warning,
            Self::Error => StatusColor::Error,
            Self::Info => StatusColor::Focus,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Warning => "⚠",
            Self::Error => "✗",
            Self::Info => "ℹ",
        }
    }

    /// Errors stay longer than confirmations
    fn lifetime(&self) -> Duration {
        match self {
            Self::Error => Duration::from_secs(6),
            Self::Warning => Duration::from_secs(4),
            Self::Success | Self::Info => Duration::from_secs(3),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub toast_type: ToastType,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, toast_type: ToastType) -> Self {
        Self {
            message: message.into(),
            toast_type,
            created_at: Instant::now(),
            duration: toast_type.lifetime(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastType::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastType::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastType::Error)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastType::Info)
    }

    /// Short summary of a finished action; details go to the result panel
    pub fn for_outcome(outcome: &ActionOutcome) -> Self {
        let label = outcome.action.label();
        match &outcome.view {
            View::Warning(message) => Self::warning(message.clone()),
            View::Error {
                status: Some(code), ..
            } => Self::error(format!("{} failed (HTTP {})", label, code)),
            View::Error { .. } => Self::error(format!("{} failed", label)),
            View::Courses(courses) => {
                Self::success(format!("{} course(s) found", courses.len()))
            }
            View::Plan(plan) => Self::success(format!(
                "Plan ready: {} modules, {} resources",
                plan.modules.len(),
                plan.resource_count()
            )),
            View::Quiz(quiz) => {
                Self::success(format!("Quiz ready: {} questions", quiz.questions.len()))
            }
            View::Saved { message, .. } => Self::success(message.clone()),
            View::Json(_) => Self::success(format!("{} done", label)),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }
}

#[derive(Debug, Default)]
pub struct ToastManager {
    toasts: Vec<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self { toasts: Vec::new() }
    }

    pub fn push(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    pub fn clear_expired(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    /// Newest toast at the bottom, centered horizontally
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.clear_expired();

        let start = self.toasts.len().saturating_sub(MAX_VISIBLE);
        let visible = &self.toasts[start..];
        if visible.is_empty() {
            return;
        }

        // Keep clear of the status bar
        let stack_height = visible.len() as u16 * TOAST_HEIGHT;
        let mut y = area.y + area.height.saturating_sub(stack_height + 2);

        for toast in visible {
            let width = (toast.message.chars().count() + 6).min(area.width as usize) as u16;
            let toast_area = Rect {
                x: area.x + area.width.saturating_sub(width) / 2,
                y,
                width,
                height: TOAST_HEIGHT.min(area.height),
            };
            render_single_toast(frame, toast_area, toast);
            y += TOAST_HEIGHT;
        }
    }
}

fn render_single_toast(frame: &mut Frame, area: Rect, toast: &Toast) {
    let color = toast.toast_type.status().to_color();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let content = Line::from(vec![
        Span::styled(
            format!("{} ", toast.toast_type.icon()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(toast.message.as_str()),
    ]);
    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), inner);
}
