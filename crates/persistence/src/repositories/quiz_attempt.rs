//! Quiz attempt repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{CategoryAttemptRow, QuizAttemptEntity};
use crate::metrics::QueryTimer;

/// Repository for quiz attempt database operations.
#[derive(Clone)]
pub struct QuizAttemptRepository {
    pool: PgPool,
}

impl QuizAttemptRepository {
    /// Creates a new QuizAttemptRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a graded attempt.
    pub async fn insert(
        &self,
        user_id: Uuid,
        quiz_id: Uuid,
        score: i32,
        max_score: i32,
    ) -> Result<QuizAttemptEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_quiz_attempt");
        let result = sqlx::query_as::<_, QuizAttemptEntity>(
            r#"
            INSERT INTO quiz_attempts (user_id, quiz_id, score, max_score)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, quiz_id, score, max_score, taken_at
            "#,
        )
        .bind(user_id)
        .bind(quiz_id)
        .bind(score)
        .bind(max_score)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Attempts a user has made since UTC midnight. Input to the daily
    /// entitlement gate.
    pub async fn count_today(&self, user_id: Uuid) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_quiz_attempts_today");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM quiz_attempts
            WHERE user_id = $1 AND taken_at >= date_trunc('day', NOW())
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// A user's attempts joined to the grammar category of the quiz's topic.
    /// Attempts on quizzes not linked to a topic are excluded.
    pub async fn category_attempts(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<CategoryAttemptRow>, sqlx::Error> {
        let timer = QueryTimer::new("list_category_attempts");
        let result = sqlx::query_as::<_, CategoryAttemptRow>(
            r#"
            SELECT gt.category_id, qa.score, qa.max_score
            FROM quiz_attempts qa
            JOIN grammar_topics gt ON gt.quiz_id = qa.quiz_id
            WHERE qa.user_id = $1
            ORDER BY qa.taken_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
