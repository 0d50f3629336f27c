//! Quiz and question repository for database operations.

use domain::models::{CreateQuestionRequest, Question};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{QuestionEntity, QuizEntity};
use crate::metrics::QueryTimer;

const QUESTION_COLUMNS: &str =
    "id, quiz_id, text, question_type, options, correct_answer, points, order_index";

/// Repository for quiz and question database operations.
#[derive(Clone)]
pub struct QuizRepository {
    pool: PgPool,
}

impl QuizRepository {
    /// Creates a new QuizRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an empty quiz.
    pub async fn create_quiz(&self, title: &str) -> Result<QuizEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_quiz");
        let result = sqlx::query_as::<_, QuizEntity>(
            r#"
            INSERT INTO quizzes (title)
            VALUES ($1)
            RETURNING id, title, created_at
            "#,
        )
        .bind(title)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a quiz by id.
    pub async fn find_quiz(&self, id: Uuid) -> Result<Option<QuizEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_quiz_by_id");
        let result = sqlx::query_as::<_, QuizEntity>(
            "SELECT id, title, created_at FROM quizzes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Questions of a quiz in authoring order.
    pub async fn list_questions(&self, quiz_id: Uuid) -> Result<Vec<QuestionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_questions");
        let result = sqlx::query_as::<_, QuestionEntity>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE quiz_id = $1 \
             ORDER BY order_index, id",
        ))
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a question by id.
    pub async fn find_question(&self, id: Uuid) -> Result<Option<QuestionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_question_by_id");
        let result = sqlx::query_as::<_, QuestionEntity>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a question.
    pub async fn create_question(
        &self,
        quiz_id: Uuid,
        request: &CreateQuestionRequest,
    ) -> Result<QuestionEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_question");
        let result = sqlx::query_as::<_, QuestionEntity>(&format!(
            r#"
            INSERT INTO questions
                (quiz_id, text, question_type, options, correct_answer, points, order_index)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {QUESTION_COLUMNS}
            "#,
        ))
        .bind(quiz_id)
        .bind(&request.text)
        .bind(request.question_type.as_str())
        .bind(Json(&request.options))
        .bind(request.correct_answer.as_deref())
        .bind(request.points)
        .bind(request.order_index)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Persist a fully edited question (text, type, options, answer). The
    /// authoring operations mutate the domain model; this writes it back.
    pub async fn save_question(
        &self,
        question: &Question,
    ) -> Result<Option<QuestionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("save_question");
        let result = sqlx::query_as::<_, QuestionEntity>(&format!(
            r#"
            UPDATE questions
            SET text = $2,
                question_type = $3,
                options = $4,
                correct_answer = $5,
                points = $6,
                order_index = $7
            WHERE id = $1
            RETURNING {QUESTION_COLUMNS}
            "#,
        ))
        .bind(question.id)
        .bind(&question.text)
        .bind(question.question_type.as_str())
        .bind(Json(&question.options))
        .bind(question.correct_answer.as_deref())
        .bind(question.points)
        .bind(question.order_index)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a question. Returns whether a row was removed.
    pub async fn delete_question(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_question");
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0);
        timer.record();
        result
    }

    /// Delete a quiz and (via cascade) its questions.
    pub async fn delete_quiz(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_quiz");
        let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0);
        timer.record();
        result
    }
}
