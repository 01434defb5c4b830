//! Settings sidebar

use super::attr;
use studyboard_core::{HealthStatus, Settings};

pub(super) fn render(html: &mut String, settings: &Settings, health: &HealthStatus) {
    html.push_str("<aside>\n<h1>studyboard</h1>\n");
    html.push_str("<form method=\"post\" action=\"/settings\">\n");
    field(html, "Backend URL", "api_url", &settings.api_url);
    field(html, "Preferred language", "language", &settings.language);
    field(html, "User id", "user_id", &settings.user_id);
    html.push_str("<button type=\"submit\">Save settings</button>\n</form>\n");

    let state = if health.is_up() { "up" } else { "down" };
    html.push_str(&format!(
        "<p class=\"muted\" style=\"margin-top:1rem\">Backend {}</p>\n",
        state
    ));
    html.push_str("</aside>\n");
}

fn field(html: &mut String, label: &str, name: &str, value: &str) {
    html.push_str(&format!(
        "<label for=\"{name}\">{label}</label>\n<input id=\"{name}\" name=\"{name}\" value=\"{}\">\n",
        attr(value)
    ));
}
