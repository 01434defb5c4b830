//! Server-rendered pages
//!
//! Plain HTML strings; every piece of user or backend text goes through
//! `html_escape` before it is written.

mod forms;
mod results;
mod sidebar;

use studyboard_core::forms::{ClassroomForm, PlanForm, ProgressForm, QuizForm, SearchForm};
use studyboard_core::models::CachedPlan;
use studyboard_core::{ActionOutcome, HealthStatus, Settings};

pub use results::outcome_html;

/// Form values echoed back into the page
#[derive(Debug, Clone, Default)]
pub struct PageForms {
    pub search: SearchForm,
    pub plan: PlanForm,
    pub quiz: QuizForm,
    pub progress: ProgressForm,
    pub classroom: ClassroomForm,
}

/// Everything one page render needs
pub struct PageContext<'a> {
    pub settings: &'a Settings,
    pub health: &'a HealthStatus,
    pub cached_plan: Option<&'a CachedPlan>,
    pub forms: &'a PageForms,
    pub outcome: Option<&'a ActionOutcome>,
}

const STYLE: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: system-ui, -apple-system, sans-serif; background: #f5f5f5; color: #1a1a1a; display: flex; min-height: 100vh; }
aside { width: 280px; background: #1f2430; color: #e6e6e6; padding: 1.5rem; }
aside h1 { font-size: 1.4rem; margin-bottom: 1rem; }
aside label { display: block; font-size: 0.85rem; margin-top: 0.75rem; }
aside input { width: 100%; }
main { flex: 1; padding: 1.5rem 2rem; max-width: 1100px; }
section { background: white; padding: 1rem 1.25rem; margin-bottom: 1rem; border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,0.08); }
section h2 { font-size: 1.1rem; margin-bottom: 0.75rem; }
label { display: block; font-size: 0.85rem; margin: 0.5rem 0 0.25rem; }
input, select, textarea { padding: 0.35rem 0.5rem; border: 1px solid #ccc; border-radius: 4px; font: inherit; }
textarea { width: 100%; min-height: 4rem; }
button { margin-top: 0.75rem; padding: 0.4rem 1rem; border: 0; border-radius: 4px; background: #0066cc; color: white; cursor: pointer; }
.banner { padding: 0.6rem 1rem; border-radius: 6px; margin-bottom: 1rem; }
.banner.up { background: #e3f6e8; color: #1d6b34; }
.banner.down { background: #fdecea; color: #8a1c12; }
.result.success { border-left: 4px solid #2e9e4f; }
.result.warning { border-left: 4px solid #d99a00; }
.result.error { border-left: 4px solid #c0392b; }
.correct { font-weight: 600; color: #1d6b34; }
pre { background: #f0f0f0; padding: 0.75rem; border-radius: 4px; overflow-x: auto; }
.muted { color: #777; font-size: 0.85rem; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); gap: 1rem; }
a { color: #0066cc; text-decoration: none; }
a:hover { text-decoration: underline; }
"#;

/// Render the full dashboard page
pub fn render_page(ctx: &PageContext<'_>) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str("<title>studyboard - Learning Dashboard</title>\n");
    html.push_str(&format!("<style>{}</style>\n", STYLE));
    html.push_str("</head>\n<body>\n");

    sidebar::render(&mut html, ctx.settings, ctx.health);

    html.push_str("<main>\n");
    health_banner(&mut html, ctx.health);

    if let Some(outcome) = ctx.outcome {
        html.push_str(&outcome_html(outcome));
    }

    html.push_str("<div class=\"grid\">\n");
    forms::render(&mut html, ctx.forms, ctx.cached_plan);
    html.push_str("</div>\n</main>\n</body>\n</html>\n");

    html
}

fn health_banner(html: &mut String, health: &HealthStatus) {
    let class = if health.is_up() { "up" } else { "down" };
    html.push_str(&format!(
        "<div class=\"banner {}\" id=\"health\">{}</div>\n",
        class,
        text(&health.summary())
    ));
}

/// Escape text content
pub(crate) fn text(s: &str) -> String {
    html_escape::encode_text(s).into_owned()
}

/// Escape a double-quoted attribute value
pub(crate) fn attr(s: &str) -> String {
    html_escape::encode_double_quoted_attribute(s).into_owned()
}

/// Link when `url` is http(s), plain text otherwise
pub(crate) fn link(label: &str, url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
            attr(url),
            text(label)
        )
    } else {
        text(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_only_for_http_urls() {
        assert!(link("Rust", "https://rust.example").starts_with("<a href=\"https://rust.example\""));
        assert_eq!(link("bad", "javascript:alert(1)"), "bad");
        assert_eq!(link("<b>", ""), "&lt;b&gt;");
    }

    #[test]
    fn test_attr_escapes_quotes() {
        assert_eq!(attr("a\"b"), "a&quot;b");
    }

    #[test]
    fn test_page_shows_health_and_settings() {
        let settings = Settings {
            api_url: "http://backend:8000".to_string(),
            language: "es".to_string(),
            user_id: "<ana>".to_string(),
        };
        let health = HealthStatus::Down {
            message: "connection refused".to_string(),
        };
        let forms = PageForms::default();

        let html = render_page(&PageContext {
            settings: &settings,
            health: &health,
            cached_plan: None,
            forms: &forms,
            outcome: None,
        });

        assert!(html.contains("Backend unavailable: connection refused"));
        assert!(html.contains("value=\"http://backend:8000\""));
        assert!(html.contains("&lt;ana&gt;"));
        assert!(!html.contains("<ana>"));
        assert!(html.contains("No plan built yet"));
    }
}
