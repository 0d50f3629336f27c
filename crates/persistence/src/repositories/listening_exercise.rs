//! Listening exercise repository for database operations.

use domain::models::{CreateListeningExerciseRequest, UpdateListeningExerciseRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ListeningExerciseEntity;
use crate::metrics::QueryTimer;

const LISTENING_COLUMNS: &str = "id, title, level, transcript, duration_secs, audio_asset_id, \
     is_premium, order_index, quiz_id, created_at, updated_at";

/// Repository for listening exercise database operations.
#[derive(Clone)]
pub struct ListeningExerciseRepository {
    pool: PgPool,
}

impl ListeningExerciseRepository {
    /// Creates a new ListeningExerciseRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All exercises, ordered for display.
    pub async fn list_all(&self) -> Result<Vec<ListeningExerciseEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_listening_exercises");
        let result = sqlx::query_as::<_, ListeningExerciseEntity>(&format!(
            "SELECT {LISTENING_COLUMNS} FROM listening_exercises ORDER BY order_index, created_at",
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an exercise by id.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ListeningExerciseEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_listening_exercise_by_id");
        let result = sqlx::query_as::<_, ListeningExerciseEntity>(&format!(
            "SELECT {LISTENING_COLUMNS} FROM listening_exercises WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create an exercise.
    pub async fn create(
        &self,
        request: &CreateListeningExerciseRequest,
    ) -> Result<ListeningExerciseEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_listening_exercise");
        let result = sqlx::query_as::<_, ListeningExerciseEntity>(&format!(
            r#"
            INSERT INTO listening_exercises
                (title, level, transcript, duration_secs, audio_asset_id, is_premium,
                 order_index, quiz_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {LISTENING_COLUMNS}
            "#,
        ))
        .bind(&request.title)
        .bind(request.level.as_str())
        .bind(&request.transcript)
        .bind(request.duration_secs)
        .bind(request.audio_asset_id)
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
        request: &UpdateListeningExerciseRequest,
    ) -> Result<Option<ListeningExerciseEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_listening_exercise");
        let result = sqlx::query_as::<_, ListeningExerciseEntity>(&format!(
            r#"
            UPDATE listening_exercises
            SET title = COALESCE($2, title),
                level = COALESCE($3, level),
                transcript = COALESCE($4, transcript),
                duration_secs = COALESCE($5, duration_secs),
                audio_asset_id = COALESCE($6, audio_asset_id),
                is_premium = COALESCE($7, is_premium),
                order_index = COALESCE($8, order_index),
                quiz_id = COALESCE($9, quiz_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {LISTENING_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(request.title.as_deref())
        .bind(request.level.map(|l| l.as_str()))
        .bind(request.transcript.as_deref())
        .bind(request.duration_secs)
        .bind(request.audio_asset_id)
        .bind(request.is_premium)
        .bind(request.order_index)
        .bind(request.quiz_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete an exercise. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_listening_exercise");
        let result = sqlx::query("DELETE FROM listening_exercises WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0);
        timer.record();
        result
    }
}
