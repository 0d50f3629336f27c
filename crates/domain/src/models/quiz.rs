//! Quiz domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Question type enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    FillBlank,
    TrueFalse,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::FillBlank => "fill_blank",
            QuestionType::TrueFalse => "true_false",
        }
    }

    /// Whether answers are picked from an option list (as opposed to typed).
    pub fn has_options(&self) -> bool {
        !matches!(self, QuestionType::FillBlank)
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multiple_choice" => Ok(QuestionType::MultipleChoice),
            "fill_blank" => Ok(QuestionType::FillBlank),
            "true_false" => Ok(QuestionType::TrueFalse),
            _ => Err(format!("Invalid question type: {}", s)),
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One selectable answer option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    pub text: String,
    pub is_correct: bool,
}

impl AnswerOption {
    pub fn blank() -> Self {
        Self {
            text: String::new(),
            is_correct: false,
        }
    }

    pub fn labeled(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_correct: false,
        }
    }
}

/// An authored quiz question.
///
/// For `multiple_choice` and `true_false`, exactly one option is expected to
/// carry `is_correct`; the authoring operations in
/// `services::question_builder` maintain that invariant. `fill_blank` stores
/// a freeform `correct_answer` instead, compared case-insensitively when
/// grading.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub text: String,
    pub question_type: QuestionType,
    pub options: Vec<AnswerOption>,
    pub correct_answer: Option<String>,
    pub points: i32,
    pub order_index: i32,
}

/// A quiz with its questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub questions: Vec<Question>,
}

/// A question as shown to a quiz taker: correct answers are stripped.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub id: Uuid,
    pub text: String,
    pub question_type: QuestionType,
    pub options: Vec<String>,
    pub points: i32,
    pub order_index: i32,
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id,
            text: question.text.clone(),
            question_type: question.question_type,
            options: question.options.iter().map(|o| o.text.clone()).collect(),
            points: question.points,
            order_index: question.order_index,
        }
    }
}

/// A quiz as shown to a quiz taker.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizView {
    pub id: Uuid,
    pub title: String,
    pub questions: Vec<QuestionView>,
}

impl From<&Quiz> for QuizView {
    fn from(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id,
            title: quiz.title.clone(),
            questions: quiz.questions.iter().map(QuestionView::from).collect(),
        }
    }
}

/// One submitted answer: an option index for choice questions, free text for
/// fill-in-the-blank.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub question_id: Uuid,
    pub selected_option: Option<usize>,
    pub answer_text: Option<String>,
}

/// A full quiz submission.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSubmission {
    pub answers: Vec<SubmittedAnswer>,
}

/// Graded result of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub score: i32,
    pub max_score: i32,
    pub correct_count: u32,
    pub question_count: u32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 500, message = "Question text must be 1-500 characters"))]
    pub text: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<AnswerOption>,
    pub correct_answer: Option<String>,
    #[validate(custom(function = "shared::validation::validate_points"))]
    #[serde(default = "default_points")]
    pub points: i32,
    #[serde(default)]
    pub order_index: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionRequest {
    #[validate(length(min = 1, max = 500, message = "Question text must be 1-500 characters"))]
    pub text: Option<String>,
    pub options: Option<Vec<AnswerOption>>,
    pub correct_answer: Option<String>,
    #[validate(custom(function = "shared::validation::validate_points"))]
    pub points: Option<i32>,
    pub order_index: Option<i32>,
}

fn default_points() -> i32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question {
            id: Uuid::new_v4(),
            quiz_id: Uuid::new_v4(),
            text: "She ___ to school every day.".to_string(),
            question_type: QuestionType::MultipleChoice,
            options: vec![
                AnswerOption {
                    text: "go".to_string(),
                    is_correct: false,
                },
                AnswerOption {
                    text: "goes".to_string(),
                    is_correct: true,
                },
            ],
            correct_answer: None,
            points: 2,
            order_index: 0,
        }
    }

    #[test]
    fn test_question_type_roundtrip() {
        for qt in [
            QuestionType::MultipleChoice,
            QuestionType::FillBlank,
            QuestionType::TrueFalse,
        ] {
            assert_eq!(QuestionType::from_str(qt.as_str()).unwrap(), qt);
        }
        assert!(QuestionType::from_str("essay").is_err());
    }

    #[test]
    fn test_question_type_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&QuestionType::MultipleChoice).unwrap(),
            "\"multiple_choice\""
        );
    }

    #[test]
    fn test_question_view_strips_correct_flags() {
        let view = QuestionView::from(&question());
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("isCorrect"));
        assert!(!json.contains("correctAnswer"));
        assert_eq!(view.options, vec!["go", "goes"]);
    }

    #[test]
    fn test_create_question_defaults() {
        let request: CreateQuestionRequest =
            serde_json::from_str(r#"{"text":"Pick one","questionType":"true_false"}"#).unwrap();
        assert_eq!(request.points, 1);
        assert!(request.options.is_empty());
    }
}
