//! TUI rendering logic

use crate::app::{App, Focus, Tab};
use crate::components::{render_result_panel, spinner};
use crate::form::{FieldKind, FormState};
use crate::theme::StatusColor;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 34;

/// Render the full UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Logo + tab bar
            Constraint::Min(0),    // Sidebar + content
            Constraint::Length(1), // Status bar
        ])
        .split(size);

    render_header(frame, chunks[0], app.active_tab);

    let body = if app.sidebar_visible {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(chunks[1]);
        render_sidebar(frame, columns[0], app);
        columns[1]
    } else {
        chunks[1]
    };

    render_tab_content(frame, body, app);
    render_status_bar(frame, chunks[2], app);

    // Toast notifications on top of everything
    app.toast_manager.render(frame, size);
}

fn render_header(frame: &mut Frame, area: Rect, active: Tab) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(14), Constraint::Min(0)])
        .split(inner);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled("◈ ", Style::default().fg(Color::Cyan)),
        Span::styled(
            "studyboard",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ]));
    frame.render_widget(logo, columns[0]);

    let titles: Vec<Line> = Tab::all()
        .iter()
        .map(|t| {
            let style = if *t == active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(format!(" F{} {} ", t.shortcut(), t.name()), style))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(active.index())
        .divider(Span::styled("│", Style::default().fg(Color::DarkGray)));
    frame.render_widget(tabs, columns[1]);
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Sidebar;
    let border = if focused {
        StatusColor::Focus
    } else {
        StatusColor::Neutral
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border.to_color()))
        .title(Span::styled(
            " Settings ",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));

    let mut lines = field_lines(&app.sidebar, focused);
    lines.push(Line::from(""));

    let health_color = StatusColor::for_health(app.health.as_ref()).to_color();
    let health_text = match (&app.health, app.is_checking_health()) {
        (_, true) => "Checking backend...".to_string(),
        (Some(health), false) => health.summary(),
        (None, false) => "Backend: unknown".to_string(),
    };
    lines.push(Line::from(vec![
        Span::styled("● ", Style::default().fg(health_color)),
        Span::styled(health_text, Style::default().fg(health_color)),
    ]));

    let plan_text = match &app.cached_plan {
        Some(cached) => format!(
            "Cached plan: {} modules",
            cached.plan.modules.len()
        ),
        None => "No plan cached".to_string(),
    };
    lines.push(Line::from(Span::styled(
        plan_text,
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_tab_content(frame: &mut Frame, area: Rect, app: &mut App) {
    let tab = app.active_tab;
    let field_count = app.form(tab).map(|f| f.fields.len()).unwrap_or(0) as u16;

    // Two lines per field, plus borders, plus a line for the request state
    let form_height = field_count * 2 + 3 + u16::from(tab == Tab::Classroom);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(form_height), Constraint::Min(0)])
        .split(area);

    render_form(frame, chunks[0], app);
    render_result_panel(frame, chunks[1], app.outcome(tab), app.result_scroll);
}

fn render_form(frame: &mut Frame, area: Rect, app: &mut App) {
    let tab = app.active_tab;
    let focused = app.focus == Focus::Form;
    let border = if focused {
        StatusColor::Focus
    } else {
        StatusColor::Neutral
    };

    let title = match tab {
        Tab::Search => " Search Courses ",
        Tab::Plan => " Build Plan ",
        Tab::Quiz => " Generate Quiz ",
        Tab::Progress => " Update Progress ",
        Tab::Classroom => " Push Plan to Classroom ",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border.to_color()))
        .title(Span::styled(
            title,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));

    let mut lines = app
        .form(tab)
        .map(|form| field_lines(form, focused))
        .unwrap_or_default();

    if tab == Tab::Classroom {
        let text = match &app.cached_plan {
            Some(cached) => format!("Plan to push: {}", cached.request.goals.join(", ")),
            None => "No plan built yet (F2 to build one)".to_string(),
        };
        lines.push(Line::from(Span::styled(
            text,
            Style::default().fg(Color::DarkGray),
        )));
    }

    let state = match &app.in_flight {
        Some(running) => Line::from(vec![
            spinner(running.started.elapsed()),
            Span::styled(
                format!(
                    " {} ({}s)",
                    running.kind.label(),
                    running.started.elapsed().as_secs()
                ),
                Style::default().fg(StatusColor::Warning.to_color()),
            ),
        ]),
        None => Line::from(Span::styled(
            "Enter to submit",
            Style::default().fg(Color::DarkGray),
        )),
    };
    lines.push(state);

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Label line then value line for each field
fn field_lines(form: &FormState, focused: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(form.fields.len() * 2);

    for (i, field) in form.fields.iter().enumerate() {
        let active = focused && i == form.focused;
        let label_style = if active {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(Span::styled(field.label.to_string(), label_style)));

        let value = match &field.kind {
            FieldKind::Text(text) => {
                let mut spans = vec![Span::raw(format!(" {}", text))];
                if active {
                    spans.push(Span::styled(
                        "_",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::SLOW_BLINK),
                    ));
                }
                Line::from(spans)
            }
            FieldKind::Choice { .. } if active => {
                Line::from(Span::raw(format!(" ◂ {} ▸", field.value())))
            }
            FieldKind::Choice { .. } => Line::from(Span::raw(format!("   {}", field.value()))),
        };
        lines.push(value);
    }

    lines
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let hint = match app.focus {
        Focus::Sidebar => "Tab/↑↓ field │ Enter save settings │ F6 back to form",
        Focus::Form => match app.active_tab {
            Tab::Plan | Tab::Progress => {
                "Tab/↑↓ field │ ←→ choice │ Enter submit │ PgUp/PgDn scroll │ Ctrl+R get progress"
            }
            _ => "Tab/↑↓ field │ Enter submit │ PgUp/PgDn scroll │ Ctrl+R get progress",
        },
    };

    let line = Line::from(vec![
        Span::styled(" F1-F5", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(" tabs ", Style::default().fg(Color::Gray)),
        Span::styled("│", Style::default().fg(Color::Gray)),
        Span::styled(" F6", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(" settings ", Style::default().fg(Color::Gray)),
        Span::styled("│", Style::default().fg(Color::Gray)),
        Span::styled(" F7", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(" health ", Style::default().fg(Color::Gray)),
        Span::styled("│", Style::default().fg(Color::Gray)),
        Span::styled(" Ctrl+C", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(" quit ", Style::default().fg(Color::Gray)),
        Span::styled("│", Style::default().fg(Color::Gray)),
        Span::styled(format!(" {}", hint), Style::default().fg(Color::Gray)),
    ]);

    let bar = Paragraph::new(line).style(Style::default().bg(Color::Black));
    frame.render_widget(bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use studyboard_core::store::session_handle;
    use studyboard_core::{ActionKind, ActionOutcome, Dashboard, Settings, View};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn app() -> App {
        let settings = Settings {
            api_url: "http://backend.test:8000".to_string(),
            ..Settings::default()
        };
        App::new(
            Dashboard::with_http(reqwest::Client::new()),
            session_handle(settings),
        )
    }

    #[test]
    fn test_renders_tabs_and_sidebar() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();

        let text = buffer_text(&terminal);
        for tab in Tab::all() {
            assert!(text.contains(tab.name()), "missing tab {}", tab.name());
        }
        assert!(text.contains("Backend URL"));
        assert!(text.contains("http://backend.test:8000"));
        assert!(text.contains("Search Courses"));
        assert!(text.contains("Enter to submit"));
    }

    #[test]
    fn test_classroom_tab_without_plan() {
        let mut app = app();
        app.active_tab = Tab::Classroom;
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();

        assert!(buffer_text(&terminal).contains("No plan built yet"));
    }

    #[test]
    fn test_result_panel_shows_error_body() {
        let outcome = ActionOutcome {
            action: ActionKind::SearchCourses,
            view: View::Error {
                status: Some(500),
                message: "Internal Server Error".to_string(),
                suggestion: None,
            },
        };
        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                render_result_panel(f, area, Some(&outcome), 0)
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("HTTP 500"));
        assert!(text.contains("Internal Server Error"));
    }
}
