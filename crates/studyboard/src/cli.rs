//! Output formatting for the one-shot commands
//!
//! Tables for humans (comfy-table), pretty JSON with `--json`.

use comfy_table::{Cell, Color, ContentArrangement, Table};
use serde_json::{json, Value};
use studyboard_core::render::{outcome_lines, pretty_json};
use studyboard_core::{ActionOutcome, HealthStatus, Settings, View};

/// Format an action outcome (human or JSON)
pub fn format_outcome(outcome: &ActionOutcome, json: bool, no_color: bool) -> String {
    match &outcome.view {
        View::Courses(courses) if json => {
            serde_json::to_string_pretty(courses).unwrap_or_else(|_| "[]".to_string())
        }
        View::Courses(courses) if courses.is_empty() => "No courses found.".to_string(),
        View::Courses(courses) => {
            let mut table = new_table(&["Title", "Platform", "URL"], no_color);
            for course in courses {
                table.add_row(vec![
                    truncate(&course.title, 60),
                    course.platform.clone(),
                    course.url.clone(),
                ]);
            }
            table.to_string()
        }
        View::Json(value) if json => pretty_json(value),
        View::Json(value) => format_progress(value, no_color),
        View::Error {
            status, message, ..
        } if json => pretty_json(&json!({
            "action": outcome.action.label(),
            "status": status,
            "error": message,
        })),
        _ => outcome_lines(outcome).join("\n"),
    }
}

/// Progress is free-form: tabulate what has a recognizable shape
pub fn format_progress(value: &Value, no_color: bool) -> String {
    match value {
        Value::Null => "No progress recorded.".to_string(),
        Value::Array(items) if items.is_empty() => "No progress recorded.".to_string(),
        Value::Array(items) if items.iter().all(Value::is_object) => {
            let mut table = new_table(&["Item", "Status", "Metadata"], no_color);
            for item in items {
                table.add_row(vec![
                    scalar(item.get("item_id")),
                    scalar(item.get("status")),
                    item.get("metadata")
                        .map(Value::to_string)
                        .unwrap_or_default(),
                ]);
            }
            table.to_string()
        }
        Value::Object(map) => {
            let mut table = new_table(&["Key", "Value"], no_color);
            for (key, value) in map {
                table.add_row(vec![key.clone(), truncate(&scalar(Some(value)), 80)]);
            }
            table.to_string()
        }
        other => pretty_json(other),
    }
}

pub fn format_health(settings: &Settings, health: &HealthStatus, json: bool) -> String {
    if json {
        return pretty_json(&json!({
            "api_url": settings.api_url,
            "health": health,
        }));
    }

    let marker = if health.is_up() { "✓" } else { "✗" };
    format!("{} {} ({})", marker, health.summary(), settings.api_url)
}

fn new_table(headers: &[&str], no_color: bool) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    if no_color {
        table.set_header(headers.to_vec());
    } else {
        table.set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
    }
    table
}

/// Strings unquoted, everything else as JSON text
fn scalar(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max {
        s.to_string()
    } else {
        s.chars().take(max - 1).collect::<String>() + "…"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studyboard_core::models::CourseResult;
    use studyboard_core::ActionKind;

    fn courses(list: Vec<CourseResult>) -> ActionOutcome {
        ActionOutcome {
            action: ActionKind::SearchCourses,
            view: View::Courses(list),
        }
    }

    #[test]
    fn test_course_table() {
        let outcome = courses(vec![CourseResult {
            title: "Intro to Rust".to_string(),
            url: "https://rust.example".to_string(),
            platform: "edX".to_string(),
        }]);
        let table = format_outcome(&outcome, false, true);
        assert!(table.contains("Title"));
        assert!(table.contains("Intro to Rust"));
        assert!(table.contains("edX"));
    }

    #[test]
    fn test_course_json_and_empty() {
        assert_eq!(format_outcome(&courses(vec![]), false, true), "No courses found.");
        assert_eq!(format_outcome(&courses(vec![]), true, true), "[]");
    }

    #[test]
    fn test_progress_shapes() {
        let rows = json!([
            {"item_id": "lesson-1", "status": "completed", "metadata": {"score": 9}},
            {"item_id": "lesson-2", "status": "in_progress"}
        ]);
        let table = format_progress(&rows, true);
        assert!(table.contains("lesson-1"));
        assert!(table.contains("{\"score\":9}"));

        let object = json!({"user_id": "demo-user", "completed": 3});
        let table = format_progress(&object, true);
        assert!(table.contains("demo-user"));
        assert!(table.contains("completed"));

        assert_eq!(format_progress(&Value::Null, true), "No progress recorded.");
    }

    #[test]
    fn test_error_json() {
        let outcome = ActionOutcome {
            action: ActionKind::GetProgress,
            view: View::Error {
                status: Some(404),
                message: "not found".to_string(),
                suggestion: None,
            },
        };
        let value: Value = serde_json::from_str(&format_outcome(&outcome, true, true)).unwrap();
        assert_eq!(value["status"], 404);
        assert_eq!(value["error"], "not found");
    }

    #[test]
    fn test_health_line() {
        let settings = Settings::default();
        let down = HealthStatus::Down {
            message: "connection refused".to_string(),
        };
        let line = format_health(&settings, &down, false);
        assert!(line.starts_with("✗ Backend unavailable: connection refused"));
        assert!(line.contains("http://localhost:8000"));
    }

    #[test]
    fn test_truncate_unicode() {
        assert_eq!(truncate("ação rápida", 5), "ação…");
        assert_eq!(truncate("short", 10), "short");
    }
}
