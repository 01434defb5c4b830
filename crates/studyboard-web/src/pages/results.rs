//! Result panel for the last action

use super::{link, text};
use studyboard_core::render::{choice_label, pretty_json};
use studyboard_core::{ActionOutcome, View};

/// Render one outcome as a result section
pub fn outcome_html(outcome: &ActionOutcome) -> String {
    let class = if outcome.is_error() {
        "error"
    } else if outcome.is_warning() {
        "warning"
    } else {
        "success"
    };

    let mut html = format!(
        "<section class=\"result {}\" id=\"result\">\n<h2>{}</h2>\n",
        class,
        text(outcome.action.label())
    );

    match &outcome.view {
        View::Courses(courses) if courses.is_empty() => {
            html.push_str("<p>No courses found</p>\n");
        }
        View::Courses(courses) => {
            html.push_str("<ul>\n");
            for course in courses {
                let title = if course.title.is_empty() {
                    "(untitled)"
                } else {
                    &course.title
                };
                html.push_str(&format!("<li>{}", link(title, &course.url)));
                if !course.platform.is_empty() {
                    html.push_str(&format!(" <span class=\"muted\">[{}]</span>", text(&course.platform)));
                }
                html.push_str("</li>\n");
            }
            html.push_str("</ul>\n");
        }
        View::Plan(plan) => {
            if !plan.summary.is_empty() {
                html.push_str(&format!("<p>{}</p>\n", text(&plan.summary)));
            }
            for (i, module) in plan.modules.iter().enumerate() {
                html.push_str(&format!(
                    "<h3>Module {}: {}</h3>\n<ul>\n",
                    i + 1,
                    text(&module.title)
                ));
                for resource in &module.resources {
                    html.push_str(&format!("<li>{}", link(&resource.title, &resource.url)));
                    if !resource.platform.is_empty() {
                        html.push_str(&format!(
                            " <span class=\"muted\">[{}]</span>",
                            text(&resource.platform)
                        ));
                    }
                    html.push_str("</li>\n");
                }
                html.push_str("</ul>\n");
            }
        }
        View::Quiz(quiz) if quiz.questions.is_empty() => {
            html.push_str("<p>The backend returned no questions</p>\n");
        }
        View::Quiz(quiz) => {
            html.push_str("<ol>\n");
            for question in &quiz.questions {
                html.push_str(&format!("<li>{}\n<ul>\n", text(&question.question)));
                for choice in &question.choices {
                    let class = if choice.is_correct { " class=\"correct\"" } else { "" };
                    html.push_str(&format!(
                        "<li{}>{}</li>\n",
                        class,
                        text(&choice_label(choice))
                    ));
                }
                html.push_str("</ul>\n</li>\n");
            }
            html.push_str("</ol>\n");
        }
        View::Saved { message, echoed } => {
            html.push_str(&format!("<p>{}</p>\n", text(message)));
            html.push_str(&format!("<pre>{}</pre>\n", text(&pretty_json(echoed))));
        }
        View::Json(value) => {
            html.push_str(&format!("<pre>{}</pre>\n", text(&pretty_json(value))));
        }
        View::Warning(message) => {
            html.push_str(&format!("<p>{}</p>\n", text(message)));
        }
        View::Error {
            status,
            message,
            suggestion,
        } => {
            if let Some(status) = status {
                html.push_str(&format!("<p><strong>HTTP {}</strong></p>\n", status));
            }
            html.push_str(&format!("<pre>{}</pre>\n", text(message)));
            if let Some(suggestion) = suggestion {
                html.push_str(&format!("<p class=\"muted\">{}</p>\n", text(suggestion)));
            }
        }
    }

    html.push_str("</section>\n");
    html
}
