//! Quiz entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::{AnswerOption, QuestionType};
use sqlx::types::Json;
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

/// Database row mapping for the quizzes table.
#[derive(Debug, Clone, FromRow)]
pub struct QuizEntity {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// Database row mapping for the questions table. Options live in a jsonb
/// column since they are only ever read and written as a whole.
#[derive(Debug, Clone, FromRow)]
pub struct QuestionEntity {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub text: String,
    pub question_type: String,
    pub options: Json<Vec<AnswerOption>>,
    pub correct_answer: Option<String>,
    pub points: i32,
    pub order_index: i32,
}

impl From<QuestionEntity> for domain::models::Question {
    fn from(entity: QuestionEntity) -> Self {
        Self {
            id: entity.id,
            quiz_id: entity.quiz_id,
            text: entity.text,
            question_type: QuestionType::from_str(&entity.question_type)
                .unwrap_or(QuestionType::MultipleChoice), // Default fallback
            options: entity.options.0,
            correct_answer: entity.correct_answer,
            points: entity.points,
            order_index: entity.order_index,
        }
    }
}

/// Database row mapping for the quiz_attempts table.
#[derive(Debug, Clone, FromRow)]
pub struct QuizAttemptEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub quiz_id: Uuid,
    pub score: i32,
    pub max_score: i32,
    pub taken_at: DateTime<Utc>,
}

/// Attempt joined to the grammar category its quiz's topic belongs to.
/// Input row for the category progress roll-up.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryAttemptRow {
    pub category_id: Uuid,
    pub score: i32,
    pub max_score: i32,
}

impl From<CategoryAttemptRow> for domain::services::TopicAttempt {
    fn from(row: CategoryAttemptRow) -> Self {
        Self {
            category_id: row.category_id,
            score: row.score,
            max_score: row.max_score,
        }
    }
}
