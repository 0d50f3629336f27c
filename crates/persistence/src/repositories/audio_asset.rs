//! Audio asset repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::AudioAssetEntity;
use crate::metrics::QueryTimer;

/// Repository for audio asset metadata.
#[derive(Clone)]
pub struct AudioAssetRepository {
    pool: PgPool,
}

impl AudioAssetRepository {
    /// Creates a new AudioAssetRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record an uploaded asset. The id doubles as the on-disk file name.
    pub async fn insert(
        &self,
        id: Uuid,
        file_name: &str,
        content_type: &str,
        size_bytes: i64,
    ) -> Result<AudioAssetEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_audio_asset");
        let result = sqlx::query_as::<_, AudioAssetEntity>(
            r#"
            INSERT INTO audio_assets (id, file_name, content_type, size_bytes)
            VALUES ($1, $2, $3, $4)
            RETURNING id, file_name, content_type, size_bytes, created_at
            "#,
        )
        .bind(id)
        .bind(file_name)
        .bind(content_type)
        .bind(size_bytes)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an asset by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AudioAssetEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_audio_asset_by_id");
        let result = sqlx::query_as::<_, AudioAssetEntity>(
            "SELECT id, file_name, content_type, size_bytes, created_at \
             FROM audio_assets WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete an asset row. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_audio_asset");
        let result = sqlx::query("DELETE FROM audio_assets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0);
        timer.record();
        result
    }
}
