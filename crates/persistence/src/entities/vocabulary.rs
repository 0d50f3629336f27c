//! Word entry entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the word_entries table.
#[derive(Debug, Clone, FromRow)]
pub struct WordEntryEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub word: String,
    pub description: Option<String>,
    pub example_sentences: Vec<String>,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<WordEntryEntity> for domain::models::WordEntry {
    fn from(entity: WordEntryEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            word: entity.word,
            description: entity.description,
            example_sentences: entity.example_sentences,
            category_id: entity.category_id,
            created_at: entity.created_at,
        }
    }
}
