//! Listening exercise domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::level::LanguageLevel;

/// A listening exercise: transcript plus an uploaded audio asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListeningExercise {
    pub id: Uuid,
    pub title: String,
    pub level: LanguageLevel,
    pub transcript: String,
    /// Audio duration in seconds.
    pub duration_secs: i32,
    pub audio_asset_id: Option<Uuid>,
    pub is_premium: bool,
    pub order_index: i32,
    pub quiz_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateListeningExerciseRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    pub level: LanguageLevel,
    #[validate(length(min = 1, message = "Transcript must not be empty"))]
    pub transcript: String,
    #[validate(range(min = 1, max = 7200, message = "Duration must be between 1s and 2h"))]
    pub duration_secs: i32,
    pub audio_asset_id: Option<Uuid>,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub order_index: i32,
    pub quiz_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListeningExerciseRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    pub level: Option<LanguageLevel>,
    #[validate(length(min = 1, message = "Transcript must not be empty"))]
    pub transcript: Option<String>,
    #[validate(range(min = 1, max = 7200, message = "Duration must be between 1s and 2h"))]
    pub duration_secs: Option<i32>,
    pub audio_asset_id: Option<Uuid>,
    pub is_premium: Option<bool>,
    pub order_index: Option<i32>,
    pub quiz_id: Option<Uuid>,
}

/// Query parameters for listening exercise lists.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListeningListQuery {
    pub search: Option<String>,
    /// CEFR level as string, or the "all" sentinel.
    pub level: Option<String>,
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
        let request = CreateListeningExerciseRequest {
            title: "At the Station".to_string(),
            level: LanguageLevel::B1,
            transcript: "The train to Berlin leaves at nine.".to_string(),
            duration_secs: 95,
            audio_asset_id: None,
            is_premium: true,
            order_index: 0,
            quiz_id: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_zero_duration() {
        let request = CreateListeningExerciseRequest {
            title: "At the Station".to_string(),
            level: LanguageLevel::B1,
            transcript: "The train to Berlin leaves at nine.".to_string(),
            duration_secs: 0,
            audio_asset_id: None,
            is_premium: false,
            order_index: 0,
            quiz_id: None,
        };
        assert!(request.validate().is_err());
    }
}
