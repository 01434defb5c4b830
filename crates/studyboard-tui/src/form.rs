//! Editable form fields for the terminal dashboard
//!
//! Text fields take typed characters; choice fields cycle with Left/Right.
//! Values stay strings until an action converts them through the core forms.

use crossterm::event::{KeyCode, KeyModifiers};
use studyboard_core::forms::{
    ClassroomForm, PlanForm, ProgressForm, QuizForm, SearchForm, DEFAULT_DURATION_WEEKS,
    DEFAULT_NUM_QUESTIONS, DEFAULT_SEARCH_LIMIT,
};
use studyboard_core::models::{Level, ProgressStatus};
use studyboard_core::Settings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text(String),
    Choice {
        options: Vec<&'static str>,
        selected: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub fn text(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            kind: FieldKind::Text(value.into()),
        }
    }

    pub fn choice(label: &'static str, options: Vec<&'static str>, selected: &str) -> Self {
        let selected = options.iter().position(|o| *o == selected).unwrap_or(0);
        Self {
            label,
            kind: FieldKind::Choice { options, selected },
        }
    }

    pub fn value(&self) -> String {
        match &self.kind {
            FieldKind::Text(value) => value.clone(),
            FieldKind::Choice { options, selected } => {
                options.get(*selected).copied().unwrap_or_default().to_string()
            }
        }
    }

    /// Apply an editing key; returns false when the key is not for this field
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        match &mut self.kind {
            FieldKind::Text(value) => match key {
                KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
                    value.clear();
                    true
                }
                KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                    value.push(c);
                    true
                }
                KeyCode::Backspace => {
                    value.pop();
                    true
                }
                _ => false,
            },
            FieldKind::Choice { options, selected } => {
                if options.is_empty() {
                    return false;
                }
                match key {
                    KeyCode::Right | KeyCode::Char(' ') => {
                        *selected = (*selected + 1) % options.len();
                        true
                    }
                    KeyCode::Left => {
                        *selected = (*selected + options.len() - 1) % options.len();
                        true
                    }
                    _ => false,
                }
            }
        }
    }
}

/// An ordered set of fields with one focused field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub fields: Vec<Field>,
    pub focused: usize,
}

impl FormState {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields, focused: 0 }
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        match key {
            KeyCode::Tab | KeyCode::Down => {
                self.next_field();
                true
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.prev_field();
                true
            }
            _ => self
                .fields
                .get_mut(self.focused)
                .is_some_and(|field| field.handle_key(key, modifiers)),
        }
    }

    /// Value of the field at `index`, empty when out of range
    pub fn value(&self, index: usize) -> String {
        self.fields.get(index).map(Field::value).unwrap_or_default()
    }
}

pub fn settings_form(settings: &Settings) -> FormState {
    FormState::new(vec![
        Field::text("Backend URL", &settings.api_url),
        Field::text("Language", &settings.language),
        Field::text("User id", &settings.user_id),
    ])
}

pub fn search_fields() -> FormState {
    FormState::new(vec![
        Field::text("Query", ""),
        Field::text("Limit", DEFAULT_SEARCH_LIMIT.to_string()),
    ])
}

pub fn plan_fields() -> FormState {
    FormState::new(vec![
        Field::text("Goals (comma separated)", ""),
        Field::choice(
            "Level",
            Level::all().iter().map(Level::as_str).collect(),
            Level::default().as_str(),
        ),
        Field::text("Preferred languages", ""),
        Field::text("Duration (weeks)", DEFAULT_DURATION_WEEKS.to_string()),
    ])
}

pub fn quiz_fields() -> FormState {
    FormState::new(vec![
        Field::text("Topic", ""),
        Field::text("Number of questions", DEFAULT_NUM_QUESTIONS.to_string()),
    ])
}

pub fn progress_fields() -> FormState {
    FormState::new(vec![
        Field::text("Item id", ""),
        Field::choice(
            "Status",
            ProgressStatus::all().iter().map(ProgressStatus::as_str).collect(),
            ProgressStatus::default().as_str(),
        ),
        Field::text("Metadata (JSON)", ""),
    ])
}

pub fn classroom_fields() -> FormState {
    FormState::new(vec![Field::text("Course name", "")])
}

pub fn to_search(form: &FormState) -> SearchForm {
    SearchForm {
        query: form.value(0),
        limit: form.value(1),
    }
}

pub fn to_plan(form: &FormState) -> PlanForm {
    PlanForm {
        goals: form.value(0),
        level: form.value(1),
        preferred_languages: form.value(2),
        duration_weeks: form.value(3),
    }
}

pub fn to_quiz(form: &FormState) -> QuizForm {
    QuizForm {
        topic: form.value(0),
        num_questions: form.value(1),
    }
}

pub fn to_progress(form: &FormState) -> ProgressForm {
    ProgressForm {
        item_id: form.value(0),
        status: form.value(1),
        metadata: form.value(2),
    }
}

pub fn to_classroom(form: &FormState) -> ClassroomForm {
    ClassroomForm {
        course_name: form.value(0),
    }
}
