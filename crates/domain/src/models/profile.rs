//! User profile domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::services::subscription::PremiumState;

/// A user account with its premium entitlement fields.
///
/// The subscription status itself is never stored; it is derived from
/// `is_premium`, `premium_expires_at`, and `premium_cancelled_at` on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)] // Never serialize password hash to API responses
    pub password_hash: Option<String>,
    pub full_name: Option<String>,
    pub is_admin: bool,
    pub is_premium: bool,
    pub premium_expires_at: Option<DateTime<Utc>>,
    pub premium_cancelled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub checkout_customer_id: Option<String>,
    #[serde(skip_serializing)]
    pub checkout_subscription_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// The premium entitlement fields, as the derivation input.
    pub fn premium_state(&self) -> PremiumState {
        PremiumState {
            is_premium: self.is_premium,
            premium_expires_at: self.premium_expires_at,
            premium_cancelled_at: self.premium_cancelled_at,
        }
    }
}

/// Self-service profile update.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub full_name: Option<String>,
}

/// Admin-side user update.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdateUserRequest {
    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub full_name: Option<String>,
    pub is_admin: Option<bool>,
}

/// Admin premium grant. A missing expiry means a lifetime grant.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GrantPremiumRequest {
    pub expires_at: Option<DateTime<Utc>>,
}

/// Query parameters for the admin user list.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    /// Substring match against email and full name.
    pub search: Option<String>,
    /// Derived subscription status filter: all/none/active/expired/cancelled.
    pub status: Option<String>,
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub page_size: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile {
            id: Uuid::new_v4(),
            email: "ana@example.com".to_string(),
            password_hash: Some("secret_hash".to_string()),
            full_name: Some("Ana Petrova".to_string()),
            is_admin: false,
            is_premium: true,
            premium_expires_at: None,
            premium_cancelled_at: None,
            checkout_customer_id: Some("cus_123".to_string()),
            checkout_subscription_id: Some("sub_456".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login_at: None,
        }
    }

    #[test]
    fn test_sensitive_fields_not_serialized() {
        let json = serde_json::to_string(&profile()).unwrap();
        assert!(!json.contains("secret_hash"));
        assert!(!json.contains("cus_123"));
        assert!(!json.contains("sub_456"));
        assert!(json.contains("ana@example.com"));
    }

    #[test]
    fn test_premium_state_mirrors_profile() {
        let p = profile();
        let state = p.premium_state();
        assert!(state.is_premium);
        assert_eq!(state.premium_expires_at, None);
        assert_eq!(state.premium_cancelled_at, None);
    }
}
