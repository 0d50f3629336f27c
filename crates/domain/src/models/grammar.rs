//! Grammar catalogue domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::validation::{validate_hex_color, validate_slug};

/// A grammar category groups topics ("Tenses", "Prepositions", ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarCategory {
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

/// A grammar topic: explanation, examples, and an optional practice quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarTopic {
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

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGrammarCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(custom(function = "validate_slug"))]
    pub slug: String,
    #[validate(length(min = 1, max = 50, message = "Icon must be 1-50 characters"))]
    pub icon: String,
    #[validate(custom(function = "validate_hex_color"))]
    pub color: String,
    #[serde(default)]
    pub order_index: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGrammarCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_slug"))]
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Icon must be 1-50 characters"))]
    pub icon: Option<String>,
    #[validate(custom(function = "validate_hex_color"))]
    pub color: Option<String>,
    pub order_index: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGrammarTopicRequest {
    pub category_id: Uuid,
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Explanation must not be empty"))]
    pub explanation: String,
    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_example_sentences"))]
    pub examples: Vec<String>,
    pub mini_text: Option<String>,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub order_index: i32,
    pub quiz_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGrammarTopicRequest {
    pub category_id: Option<Uuid>,
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Explanation must not be empty"))]
    pub explanation: Option<String>,
    #[validate(custom(function = "shared::validation::validate_example_sentences"))]
    pub examples: Option<Vec<String>>,
    pub mini_text: Option<String>,
    pub is_premium: Option<bool>,
    pub order_index: Option<i32>,
    pub quiz_id: Option<Uuid>,
}

/// Query parameters for the admin category list.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListQuery {
    pub search: Option<String>,
    /// all/active/inactive
    pub status: Option<String>,
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub page_size: Option<u32>,
}

/// Query parameters for the admin topic list.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TopicListQuery {
    pub search: Option<String>,
    /// Category id as string, or the "all" sentinel.
    pub category: Option<String>,
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub page_size: Option<u32>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_category_request_validation() {
        let request = CreateGrammarCategoryRequest {
            name: "Tenses".to_string(),
            slug: "tenses".to_string(),
            icon: "clock".to_string(),
            color: "#4f46e5".to_string(),
            order_index: 0,
            is_active: true,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_category_rejects_bad_slug() {
        let request = CreateGrammarCategoryRequest {
            name: "Tenses".to_string(),
            slug: "Not A Slug".to_string(),
            icon: "clock".to_string(),
            color: "#4f46e5".to_string(),
            order_index: 0,
            is_active: true,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_category_rejects_bad_color() {
        let request = CreateGrammarCategoryRequest {
            name: "Tenses".to_string(),
            slug: "tenses".to_string(),
            icon: "clock".to_string(),
            color: "blue".to_string(),
            order_index: 0,
            is_active: true,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_category_defaults() {
        let request: CreateGrammarCategoryRequest = serde_json::from_str(
            r##"{"name":"Tenses","slug":"tenses","icon":"clock","color":"#4f46e5"}"##,
        )
        .unwrap();
        assert!(request.is_active);
        assert_eq!(request.order_index, 0);
    }

    #[test]
    fn test_create_topic_rejects_too_many_examples() {
        let request = CreateGrammarTopicRequest {
            category_id: Uuid::new_v4(),
            title: "Present Simple".to_string(),
            explanation: "Used for habits.".to_string(),
            examples: (0..11).map(|i| format!("Example {}.", i)).collect(),
            mini_text: None,
            is_premium: false,
            order_index: 0,
            quiz_id: None,
        };
        assert!(request.validate().is_err());
    }
}
