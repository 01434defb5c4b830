//! Color language for the studyboard TUI
//!
//! - Green: healthy backend, successful action
//! - Red: backend down, failed action
//! - Yellow: local warning, request in flight
//! - Gray: neutral, unknown
//! - Cyan: focus

use ratatui::style::Color;
use studyboard_core::{ActionOutcome, HealthStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Success,
    Error,
    Warning,
    Neutral,
    Focus,
}

impl StatusColor {
    pub fn to_color(self) -> Color {
        match self {
            StatusColor::Success => Color::Green,
            StatusColor::Error => Color::Red,
            StatusColor::Warning => Color::Yellow,
            StatusColor::Neutral => Color::DarkGray,
            StatusColor::Focus => Color::Cyan,
        }
    }

    pub fn for_outcome(outcome: &ActionOutcome) -> Self {
        if outcome.is_error() {
            StatusColor::Error
        } else if outcome.is_warning() {
            StatusColor::Warning
        } else {
            StatusColor::Success
        }
    }

    /// `None` while the first check is still running
    pub fn for_health(health: Option<&HealthStatus>) -> Self {
        match health {
            Some(h) if h.is_up() => StatusColor::Success,
            Some(_) => StatusColor::Error,
            None => StatusColor::Neutral,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_colors() {
        let up = HealthStatus::Up {
            status: "ok".to_string(),
        };
        let down = HealthStatus::Down {
            message: "refused".to_string(),
        };
        assert_eq!(StatusColor::for_health(Some(&up)), StatusColor::Success);
        assert_eq!(StatusColor::for_health(Some(&down)), StatusColor::Error);
        assert_eq!(StatusColor::for_health(None).to_color(), Color::DarkGray);
    }
}
