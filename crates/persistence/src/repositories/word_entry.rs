//! Word entry repository for database operations.
//!
//! Every query is scoped to the owning user; there is no cross-user access
//! to vocabulary.

use domain::models::{CreateWordEntryRequest, UpdateWordEntryRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::WordEntryEntity;
use crate::metrics::QueryTimer;

const WORD_COLUMNS: &str =
    "id, user_id, word, description, example_sentences, category_id, created_at";

/// Repository for word entry database operations.
#[derive(Clone)]
pub struct WordEntryRepository {
    pool: PgPool,
}

impl WordEntryRepository {
    /// Creates a new WordEntryRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All entries of one user, newest first.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<WordEntryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_word_entries");
        let result = sqlx::query_as::<_, WordEntryEntity>(&format!(
            "SELECT {WORD_COLUMNS} FROM word_entries WHERE user_id = $1 \
             ORDER BY created_at DESC",
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find one entry, scoped to its owner.
    pub async fn find_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<WordEntryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_word_entry");
        let result = sqlx::query_as::<_, WordEntryEntity>(&format!(
            "SELECT {WORD_COLUMNS} FROM word_entries WHERE id = $1 AND user_id = $2",
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create an entry for a user.
    pub async fn create(
        &self,
        user_id: Uuid,
        request: &CreateWordEntryRequest,
    ) -> Result<WordEntryEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_word_entry");
        let result = sqlx::query_as::<_, WordEntryEntity>(&format!(
            r#"
            INSERT INTO word_entries (user_id, word, description, example_sentences, category_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {WORD_COLUMNS}
            "#,
        ))
        .bind(user_id)
        .bind(&request.word)
        .bind(request.description.as_deref())
        .bind(&request.example_sentences)
        .bind(request.category_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Partial update, scoped to the owner; unset fields keep their value.
    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        request: &UpdateWordEntryRequest,
    ) -> Result<Option<WordEntryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_word_entry");
        let result = sqlx::query_as::<_, WordEntryEntity>(&format!(
            r#"
            UPDATE word_entries
            SET word = COALESCE($3, word),
                description = COALESCE($4, description),
                example_sentences = COALESCE($5, example_sentences),
                category_id = COALESCE($6, category_id)
            WHERE id = $1 AND user_id = $2
            RETURNING {WORD_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(user_id)
        .bind(request.word.as_deref())
        .bind(request.description.as_deref())
        .bind(request.example_sentences.clone())
        .bind(request.category_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete an entry, scoped to the owner. Returns whether a row was
    /// removed.
    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_word_entry");
        let result = sqlx::query("DELETE FROM word_entries WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0);
        timer.record();
        result
    }
}
