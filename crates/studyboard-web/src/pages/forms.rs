//! Action forms, one section per backend action

use super::{attr, text};
use crate::pages::PageForms;
use studyboard_core::models::{CachedPlan, Level, ProgressStatus};

pub(super) fn render(html: &mut String, forms: &PageForms, cached_plan: Option<&CachedPlan>) {
    let search = &forms.search;
    open(html, "Search Courses", "/actions/search");
    input(html, "Query", "query", &search.query);
    input(html, "Limit", "limit", &search.limit);
    close(html, "Search");

    let plan = &forms.plan;
    open(html, "Build Plan", "/actions/plan");
    textarea(html, "Goals (comma or newline separated)", "goals", &plan.goals);
    select(
        html,
        "Level",
        "level",
        Level::all().iter().map(|l| l.as_str()),
        &plan.level,
    );
    input(
        html,
        "Preferred languages (empty uses the sidebar language)",
        "preferred_languages",
        &plan.preferred_languages,
    );
    input(html, "Duration (weeks)", "duration_weeks", &plan.duration_weeks);
    close(html, "Build plan");

    let quiz = &forms.quiz;
    open(html, "Generate Quiz", "/actions/quiz");
    input(html, "Topic", "topic", &quiz.topic);
    input(html, "Number of questions", "num_questions", &quiz.num_questions);
    close(html, "Generate quiz");

    let progress = &forms.progress;
    open(html, "Update Progress", "/actions/progress/update");
    input(html, "Item id", "item_id", &progress.item_id);
    select(
        html,
        "Status",
        "status",
        ProgressStatus::all().iter().map(|s| s.as_str()),
        &progress.status,
    );
    textarea(html, "Metadata (JSON object)", "metadata", &progress.metadata);
    close(html, "Save progress");

    open(html, "Get Progress", "/actions/progress/get");
    html.push_str("<p class=\"muted\">Reads the progress of the sidebar user id.</p>\n");
    close(html, "Get progress");

    open(html, "Push Plan to Classroom", "/actions/classroom");
    match cached_plan {
        Some(cached) => html.push_str(&format!(
            "<p class=\"muted\">Cached plan: {} ({} modules, built {})</p>\n",
            text(&cached.request.goals.join(", ")),
            cached.plan.modules.len(),
            cached.cached_at.format("%Y-%m-%d %H:%M UTC")
        )),
        None => html.push_str("<p class=\"muted\">No plan built yet</p>\n"),
    }
    input(html, "Course name", "course_name", &forms.classroom.course_name);
    close(html, "Push plan");
}

fn open(html: &mut String, title: &str, action: &str) {
    html.push_str(&format!(
        "<section>\n<h2>{}</h2>\n<form method=\"post\" action=\"{}\">\n",
        text(title),
        attr(action)
    ));
}

fn close(html: &mut String, button: &str) {
    html.push_str(&format!(
        "<button type=\"submit\">{}</button>\n</form>\n</section>\n",
        text(button)
    ));
}

fn input(html: &mut String, label: &str, name: &str, value: &str) {
    html.push_str(&format!(
        "<label>{}</label>\n<input name=\"{}\" value=\"{}\">\n",
        text(label),
        name,
        attr(value)
    ));
}

fn textarea(html: &mut String, label: &str, name: &str, value: &str) {
    html.push_str(&format!(
        "<label>{}</label>\n<textarea name=\"{}\">{}</textarea>\n",
        text(label),
        name,
        text(value)
    ));
}

fn select<'a>(
    html: &mut String,
    label: &str,
    name: &str,
    options: impl Iterator<Item = &'a str>,
    selected: &str,
) {
    html.push_str(&format!(
        "<label>{}</label>\n<select name=\"{}\">\n",
        text(label),
        name
    ));
    for option in options {
        let marker = if option == selected { " selected" } else { "" };
        html.push_str(&format!(
            "<option value=\"{0}\"{1}>{0}</option>\n",
            option, marker
        ));
    }
    html.push_str("</select>\n");
}
