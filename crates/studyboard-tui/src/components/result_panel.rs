//! Result panel for the last action of a tab

use studyboard_core::render::{outcome_lines, CORRECT_MARKER};
use studyboard_core::ActionOutcome;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::theme::StatusColor;

/// Render the outcome, or a hint when nothing ran yet
pub fn render_result_panel(
    frame: &mut Frame,
    area: Rect,
    outcome: Option<&ActionOutcome>,
    scroll: u16,
) {
    let Some(outcome) = outcome else {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Result ");
        let hint = Paragraph::new(Line::from(Span::styled(
            "Fill in the form and press Enter",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let color = StatusColor::for_outcome(outcome).to_color();
    let icon = if outcome.is_error() {
        "✗"
    } else if outcome.is_warning() {
        "⚠"
    } else {
        "✓"
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {} {} ", icon, outcome.action.label()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));

    let lines: Vec<Line> = outcome_lines(outcome)
        .into_iter()
        .map(|line| style_line(line, outcome))
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn style_line(line: String, outcome: &ActionOutcome) -> Line<'static> {
    if outcome.is_error() {
        return Line::from(Span::styled(line, Style::default().fg(Color::Red)));
    }
    if outcome.is_warning() {
        return Line::from(Span::styled(line, Style::default().fg(Color::Yellow)));
    }
    if line.ends_with(CORRECT_MARKER) {
        return Line::from(Span::styled(
            line,
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ));
    }
    if line.starts_with("Module ") {
        return Line::from(Span::styled(
            line,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(line)
}
