//! Reading text domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::listing::SortOrder;

use super::level::LanguageLevel;

/// A reading text with a CEFR level and an optional comprehension quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingText {
    pub id: Uuid,
    pub title: String,
    pub level: LanguageLevel,
    pub content: String,
    pub is_premium: bool,
    pub order_index: i32,
    pub quiz_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReadingTextRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    pub level: LanguageLevel,
    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: String,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub order_index: i32,
    pub quiz_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReadingTextRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    pub level: Option<LanguageLevel>,
    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: Option<String>,
    pub is_premium: Option<bool>,
    pub order_index: Option<i32>,
    pub quiz_id: Option<Uuid>,
}

/// Query parameters for reading text lists.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReadingListQuery {
    pub search: Option<String>,
    /// CEFR level as string, or the "all" sentinel.
    pub level: Option<String>,
    pub sort: Option<SortOrder>,
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub page_size: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_validation() {
        let request = CreateReadingTextRequest {
            title: "A Day at the Market".to_string(),
            level: LanguageLevel::A2,
            content: "Maria goes to the market every Saturday.".to_string(),
            is_premium: false,
            order_index: 0,
            quiz_id: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_empty_content() {
        let request = CreateReadingTextRequest {
            title: "A Day at the Market".to_string(),
            level: LanguageLevel::A2,
            content: String::new(),
            is_premium: false,
            order_index: 0,
            quiz_id: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_level_deserializes_lowercase() {
        let request: CreateReadingTextRequest =
            serde_json::from_str(r#"{"title":"T","level":"b1","content":"c"}"#).unwrap();
        assert_eq!(request.level, LanguageLevel::B1);
    }
}
