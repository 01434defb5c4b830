//! studyboard - Learning dashboard for a course/plan/quiz backend

mod cli;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use studyboard_core::config::{load_dotenv, API_URL_ENV, LANGUAGE_ENV, USER_ID_ENV};
use studyboard_core::forms::{SearchForm, DEFAULT_SEARCH_LIMIT};
use studyboard_core::store::session_handle;
use studyboard_core::{Action, Dashboard, Settings};
use studyboard_web::ServeConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "studyboard",
    version,
    about = "Learning dashboard for searching courses, building plans and tracking progress",
    long_about = "A terminal and web dashboard in front of a learning backend.\n\
                  \n\
                  Searches courses, builds study plans, generates quizzes, records progress\n\
                  and pushes the last plan to a classroom course.\n\
                  \n\
                  Examples:\n\
                    studyboard                          # Run TUI (default)\n\
                    studyboard web                      # Serve the web dashboard on $PORT (7860)\n\
                    studyboard health                   # Check the backend\n\
                    studyboard search \"rust\" -n 5       # Search courses\n\
                    studyboard progress --json          # Print the user's progress\n\
                  \n\
                  Environment Variables:\n\
                    API_URL                             # Backend base URL (default http://localhost:8000)\n\
                    STUDYBOARD_LANGUAGE                 # Preferred language (default en)\n\
                    STUDYBOARD_USER_ID                  # User id for progress (default demo-user)\n\
                    PORT                                # Web dashboard port (default 7860)\n\
                    RUST_LOG                            # Log filter for web and one-shot modes\n\
                  \n\
                  A .env file in the working directory is loaded first."
)]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,

    /// Backend base URL
    #[arg(long, env = API_URL_ENV, global = true)]
    api_url: Option<String>,

    /// Preferred language for searches, plans and quizzes
    #[arg(long, env = LANGUAGE_ENV, global = true)]
    language: Option<String>,

    /// User id whose progress is read and written
    #[arg(long, env = USER_ID_ENV, global = true)]
    user_id: Option<String>,

    /// Disable ANSI colors in tables
    #[arg(long, env = "STUDYBOARD_NO_COLOR", global = true)]
    no_color: bool,
}

impl Cli {
    /// Flags win over the environment; blanks fall back to defaults
    fn settings(&self) -> Settings {
        Settings::from_lookup(|key| match key {
            API_URL_ENV => self.api_url.clone(),
            LANGUAGE_ENV => self.language.clone(),
            USER_ID_ENV => self.user_id.clone(),
            _ => None,
        })
    }
}

#[derive(Subcommand)]
enum Mode {
    /// Run TUI interface (default)
    Tui,
    /// Serve the web dashboard on 0.0.0.0:$PORT
    Web,
    /// Check backend health and exit
    Health {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search courses
    Search {
        /// Search query
        query: String,
        /// Max results
        #[arg(long, short = 'n', default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the user's progress
    Progress {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing, so clap sees variables from .env
    load_dotenv();

    let cli = Cli::parse();
    let settings = cli.settings();
    let no_color = cli.no_color;

    match cli.mode.unwrap_or(Mode::Tui) {
        Mode::Tui => studyboard_tui::run(settings).await,
        Mode::Web => {
            init_tracing("info");
            run_web(settings).await
        }
        Mode::Health { json } => {
            init_tracing("warn");
            run_health(settings, json).await
        }
        Mode::Search { query, limit, json } => {
            init_tracing("warn");
            run_search(settings, query, limit, json, no_color).await
        }
        Mode::Progress { json } => {
            init_tracing("warn");
            run_progress(settings, json, no_color).await
        }
    }
}

/// Log to stderr; `RUST_LOG` overrides the default level
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

async fn run_web(settings: Settings) -> Result<()> {
    let config = ServeConfig::from_env().context("Cannot start web dashboard")?;
    let app = studyboard_web::create_app(settings.clone())
        .context("Failed to build the web dashboard")?;

    tracing::info!(backend = %settings.api_url, "Serving dashboard on {}", config.addr());

    studyboard_web::serve(app, &config)
        .await
        .context("Web dashboard stopped")?;
    Ok(())
}

async fn run_health(settings: Settings, json: bool) -> Result<()> {
    let dashboard = Dashboard::new()?;
    let health = dashboard.health(&settings).await;

    println!("{}", cli::format_health(&settings, &health, json));

    if !health.is_up() {
        bail!("backend at {} is not healthy", settings.api_url);
    }
    Ok(())
}

async fn run_search(
    settings: Settings,
    query: String,
    limit: u32,
    json: bool,
    no_color: bool,
) -> Result<()> {
    let action = Action::SearchCourses(SearchForm {
        query,
        limit: limit.to_string(),
    });
    run_once(settings, action, json, no_color).await
}

async fn run_progress(settings: Settings, json: bool, no_color: bool) -> Result<()> {
    run_once(settings, Action::GetProgress, json, no_color).await
}

/// Run a single action and print its outcome
async fn run_once(settings: Settings, action: Action, json: bool, no_color: bool) -> Result<()> {
    let dashboard = Dashboard::new()?;
    let session = session_handle(settings);

    let outcome = dashboard.run(&session, action).await;
    let output = cli::format_outcome(&outcome, json, no_color);

    if outcome.is_success() {
        println!("{}", output);
        Ok(())
    } else {
        bail!("{}", output)
    }
}
