//! Personal vocabulary domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::listing::SortOrder;

/// One word in a user's personal vocabulary notebook. Owned by exactly one
/// user; the whole feature is premium-gated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub word: String,
    pub description: Option<String>,
    pub example_sentences: Vec<String>,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWordEntryRequest {
    #[validate(length(min = 1, max = 100, message = "Word must be 1-100 characters"))]
    pub word: String,
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_example_sentences"))]
    pub example_sentences: Vec<String>,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWordEntryRequest {
    #[validate(length(min = 1, max = 100, message = "Word must be 1-100 characters"))]
    pub word: Option<String>,
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
    #[validate(custom(function = "shared::validation::validate_example_sentences"))]
    pub example_sentences: Option<Vec<String>>,
    pub category_id: Option<Uuid>,
}

/// Query parameters for the vocabulary list.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyListQuery {
    pub search: Option<String>,
    /// Category id as string, or the "all" sentinel.
    pub category: Option<String>,
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
        let request = CreateWordEntryRequest {
            word: "Fernweh".to_string(),
            description: Some("Longing for far-off places".to_string()),
            example_sentences: vec!["Sein Fernweh trieb ihn nach Lissabon.".to_string()],
            category_id: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_empty_word() {
        let request = CreateWordEntryRequest {
            word: String::new(),
            description: None,
            example_sentences: vec![],
            category_id: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_list_query_accepts_sort_values() {
        let query: VocabularyListQuery =
            serde_json::from_str(r#"{"sort":"alphabetical","page":2}"#).unwrap();
        assert_eq!(query.sort, Some(SortOrder::Alphabetical));
        assert_eq!(query.page, Some(2));
    }
}
