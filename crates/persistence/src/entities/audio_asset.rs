//! Audio asset entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the audio_assets table. The bytes themselves
/// live on disk under the storage root; the row records metadata only.
#[derive(Debug, Clone, FromRow)]
pub struct AudioAssetEntity {
    pub id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub created_at: DateTime<Utc>,
}
