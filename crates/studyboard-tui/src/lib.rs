//! studyboard-tui - Terminal dashboard for studyboard using Ratatui

pub mod app;
pub mod components;
pub mod form;
pub mod theme;
pub mod ui;

pub use app::App;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::time::Duration;
use studyboard_core::store::session_handle;
use studyboard_core::{Dashboard, Settings};

/// Run the TUI application
pub async fn run(settings: Settings) -> Result<()> {
    let dashboard = Dashboard::new()?;
    let mut app = App::new(dashboard, session_handle(settings));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Health check on start-up, like a page load
    app.check_health();

    let result = run_loop(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    <B as Backend>::Error: Send + Sync + 'static,
{
    loop {
        // Collect finished requests and health checks
        app.poll_background();

        terminal.draw(|f| ui::render(f, app))?;

        // Short poll keeps the spinner moving and lets background tasks run
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code, key.modifiers);
                }
            }
        } else {
            tokio::task::yield_now().await;
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
