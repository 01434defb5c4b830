//! Request spinner
//!
//! The frame is derived from how long the request has been running.

use ratatui::{style::Style, text::Span};
use std::time::Duration;

use crate::theme::StatusColor;

const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const FRAME_MILLIS: u128 = 80;

/// Spinner frame for a request running for `elapsed`
pub fn spinner(elapsed: Duration) -> Span<'static> {
    let index = (elapsed.as_millis() / FRAME_MILLIS) as usize % FRAMES.len();
    Span::styled(
        FRAMES[index],
        Style::default().fg(StatusColor::Warning.to_color()),
    )
}
