//! Grammar catalogue entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the grammar_categories table.
#[derive(Debug, Clone, FromRow)]
pub struct GrammarCategoryEntity {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub icon: String,
    pub color: String,
    pub order_index: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GrammarCategoryEntity> for domain::models::GrammarCategory {
    fn from(entity: GrammarCategoryEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            icon: entity.icon,
            color: entity.color,
            order_index: entity.order_index,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Database row mapping for the grammar_topics table.
#[derive(Debug, Clone, FromRow)]
pub struct GrammarTopicEntity {
    pub id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub explanation: String,
    pub examples: Vec<String>,
    pub mini_text: Option<String>,
    pub is_premium: bool,
    pub order_index: i32,
    pub quiz_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GrammarTopicEntity> for domain::models::GrammarTopic {
    fn from(entity: GrammarTopicEntity) -> Self {
        Self {
            id: entity.id,
            category_id: entity.category_id,
            title: entity.title,
            explanation: entity.explanation,
            examples: entity.examples,
            mini_text: entity.mini_text,
            is_premium: entity.is_premium,
            order_index: entity.order_index,
            quiz_id: entity.quiz_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
