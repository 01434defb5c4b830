//! Quiz models

use serde::{Deserialize, Serialize};

/// Body of `POST /api/quiz`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizRequest {
    pub topic: String,
    pub num_questions: u32,
    pub language: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizChoice {
    #[serde(default, deserialize_with = "super::string_or_empty")]
    pub text: String,
    #[serde(default, alias = "correct")]
    pub is_correct: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    #[serde(default, deserialize_with = "super::string_or_empty")]
    pub question: String,
    #[serde(default)]
    pub choices: Vec<QuizChoice>,
}

/// Generated quiz, questions in backend order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_flag_aliases() {
        let json = r#"{"questions": [{
            "question": "2 + 2?",
            "choices": [
                {"text": "3", "is_correct": false},
                {"text": "4", "correct": true},
                {"text": "5"}
            ]
        }]}"#;
        let quiz: Quiz = serde_json::from_str(json).unwrap();
        let flags: Vec<bool> = quiz.questions[0]
            .choices
            .iter()
            .map(|c| c.is_correct)
            .collect();
        assert_eq!(flags, vec![false, true, false]);
    }
}
