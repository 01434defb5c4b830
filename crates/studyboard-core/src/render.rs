//! Text rendering shared by the front-ends
//!
//! Produces plain display lines; the TUI styles them, the CLI prints them.

use crate::dashboard::{ActionOutcome, View};
use crate::models::{CourseResult, Plan, Quiz, QuizChoice};
use serde_json::Value;

/// Marker appended to correct quiz choices
pub const CORRECT_MARKER: &str = "(correct)";

/// One line per course: `title [platform] url`
pub fn course_lines(courses: &[CourseResult]) -> Vec<String> {
    courses.iter().map(course_line).collect()
}

pub fn course_line(course: &CourseResult) -> String {
    let mut line = if course.title.is_empty() {
        "(untitled)".to_string()
    } else {
        course.title.clone()
    };
    if !course.platform.is_empty() {
        line.push_str(&format!(" [{}]", course.platform));
    }
    if !course.url.is_empty() {
        line.push_str(&format!(" {}", course.url));
    }
    line
}

/// Summary, then each module with its resources indented below it
pub fn plan_lines(plan: &Plan) -> Vec<String> {
    let mut lines = Vec::new();
    if !plan.summary.is_empty() {
        lines.push(plan.summary.clone());
        lines.push(String::new());
    }

    for (i, module) in plan.modules.iter().enumerate() {
        lines.push(format!("Module {}: {}", i + 1, module.title));
        for resource in &module.resources {
            let mut line = format!("  - {}", resource.title);
            if !resource.platform.is_empty() {
                line.push_str(&format!(" [{}]", resource.platform));
            }
            if !resource.url.is_empty() {
                line.push_str(&format!(" {}", resource.url));
            }
            lines.push(line);
        }
    }

    lines
}

/// Questions numbered from 1 in response order, choices indented below
pub fn quiz_lines(quiz: &Quiz) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, question) in quiz.questions.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, question.question));
        for choice in &question.choices {
            lines.push(format!("   - {}", choice_label(choice)));
        }
    }
    lines
}

pub fn choice_label(choice: &QuizChoice) -> String {
    if choice.is_correct {
        format!("{} {}", choice.text, CORRECT_MARKER)
    } else {
        choice.text.clone()
    }
}

pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Full textual rendering of an outcome
pub fn outcome_lines(outcome: &ActionOutcome) -> Vec<String> {
    match &outcome.view {
        View::Courses(courses) if courses.is_empty() => vec!["No courses found".to_string()],
        View::Courses(courses) => course_lines(courses),
        View::Plan(plan) => plan_lines(plan),
        View::Quiz(quiz) if quiz.questions.is_empty() => {
            vec!["The backend returned no questions".to_string()]
        }
        View::Quiz(quiz) => quiz_lines(quiz),
        View::Saved { message, echoed } => {
            let mut lines = vec![message.clone(), String::new()];
            lines.extend(pretty_json(echoed).lines().map(str::to_string));
            lines
        }
        View::Json(value) => pretty_json(value).lines().map(str::to_string).collect(),
        View::Warning(message) => vec![message.clone()],
        View::Error {
            status,
            message,
            suggestion,
        } => {
            let mut lines = Vec::new();
            if let Some(status) = status {
                lines.push(format!("HTTP {}", status));
            }
            lines.extend(message.lines().map(str::to_string));
            if let Some(suggestion) = suggestion {
                lines.push(format!("Hint: {}", suggestion));
            }
            lines
        }
    }
}
