//! Reading text entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::LanguageLevel;
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

/// Database row mapping for the reading_texts table.
#[derive(Debug, Clone, FromRow)]
pub struct ReadingTextEntity {
    pub id: Uuid,
    pub title: String,
    pub level: String,
    pub content: String,
    pub is_premium: bool,
    pub order_index: i32,
    pub quiz_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ReadingTextEntity> for domain::models::ReadingText {
    fn from(entity: ReadingTextEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            level: LanguageLevel::from_str(&entity.level).unwrap_or(LanguageLevel::A1), // Default fallback
            content: entity.content,
            is_premium: entity.is_premium,
            order_index: entity.order_index,
            quiz_id: entity.quiz_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
