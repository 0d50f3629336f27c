//! Reading text repository for database operations.

use domain::models::{CreateReadingTextRequest, UpdateReadingTextRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ReadingTextEntity;
use crate::metrics::QueryTimer;

const READING_COLUMNS: &str =
    "id, title, level, content, is_premium, order_index, quiz_id, created_at, updated_at";

/// Repository for reading text database operations.
#[derive(Clone)]
pub struct ReadingTextRepository {
    pool: PgPool,
}

impl ReadingTextRepository {
    /// Creates a new ReadingTextRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All texts, ordered for display.
    pub async fn list_all(&self) -> Result<Vec<ReadingTextEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_reading_texts");
        let result = sqlx::query_as::<_, ReadingTextEntity>(&format!(
            "SELECT {READING_COLUMNS} FROM reading_texts ORDER BY order_index, created_at",
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a text by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ReadingTextEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_reading_text_by_id");
        let result = sqlx::query_as::<_, ReadingTextEntity>(&format!(
            "SELECT {READING_COLUMNS} FROM reading_texts WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a text.
    pub async fn create(
        &self,
        request: &CreateReadingTextRequest,
    ) -> Result<ReadingTextEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_reading_text");
        let result = sqlx::query_as::<_, ReadingTextEntity>(&format!(
            r#"
            INSERT INTO reading_texts (title, level, content, is_premium, order_index, quiz_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {READING_COLUMNS}
            "#,
        ))
        .bind(&request.title)
        .bind(request.level.as_str())
        .bind(&request.content)
        .bind(request.is_premium)
        .bind(request.order_index)
        .bind(request.quiz_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Partial update; unset fields keep their value.
    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateReadingTextRequest,
    ) -> Result<Option<ReadingTextEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_reading_text");
        let result = sqlx::query_as::<_, ReadingTextEntity>(&format!(
            r#"
            UPDATE reading_texts
            SET title = COALESCE($2, title),
                level = COALESCE($3, level),
                content = COALESCE($4, content),
                is_premium = COALESCE($5, is_premium),
                order_index = COALESCE($6, order_index),
                quiz_id = COALESCE($7, quiz_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {READING_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(request.title.as_deref())
        .bind(request.level.map(|l| l.as_str()))
        .bind(request.content.as_deref())
        .bind(request.is_premium)
        .bind(request.order_index)
        .bind(request.quiz_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a text. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_reading_text");
        let result = sqlx::query("DELETE FROM reading_texts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0);
        timer.record();
        result
    }
}
