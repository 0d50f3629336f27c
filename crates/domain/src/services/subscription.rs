//! Subscription status derivation and transitions.
//!
//! The status is never persisted: it is recomputed from the premium fields
//! on every read, so it cannot drift from the underlying data. Every status,
//! including `Cancelled`, is reachable through the explicit transitions
//! below: cancellation stamps `premium_cancelled_at` while clearing
//! `is_premium`, which is the only way the derivation produces `Cancelled`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The persisted premium entitlement fields of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PremiumState {
    pub is_premium: bool,
    pub premium_expires_at: Option<DateTime<Utc>>,
    pub premium_cancelled_at: Option<DateTime<Utc>>,
}

/// Derived subscription status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Never subscribed (or a cancelled subscription with no record kept).
    None,
    /// Subscribed; `expires_at` of `None` means a lifetime subscription.
    Active { expires_at: Option<DateTime<Utc>> },
    /// Subscription ran out without an explicit cancellation.
    Expired { expires_at: DateTime<Utc> },
    /// Explicitly cancelled by the user or an admin.
    Cancelled { cancelled_at: DateTime<Utc> },
}

impl SubscriptionStatus {
    /// Short label used by list filters and API responses.
    pub fn label(&self) -> &'static str {
        match self {
            SubscriptionStatus::None => "none",
            SubscriptionStatus::Active { .. } => "active",
            SubscriptionStatus::Expired { .. } => "expired",
            SubscriptionStatus::Cancelled { .. } => "cancelled",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SubscriptionStatus::Active { .. })
    }
}

impl PremiumState {
    /// Derives the subscription status at `now`.
    pub fn status(&self, now: DateTime<Utc>) -> SubscriptionStatus {
        if !self.is_premium {
            return match self.premium_cancelled_at {
                Some(cancelled_at) => SubscriptionStatus::Cancelled { cancelled_at },
                None => SubscriptionStatus::None,
            };
        }

        match self.premium_expires_at {
            None => SubscriptionStatus::Active { expires_at: None },
            Some(expires_at) if expires_at > now => SubscriptionStatus::Active {
                expires_at: Some(expires_at),
            },
            Some(expires_at) => SubscriptionStatus::Expired { expires_at },
        }
    }

    /// Whether the user currently has premium access.
    pub fn has_premium_access(&self, now: DateTime<Utc>) -> bool {
        self.status(now).is_active()
    }

    /// Activation transition: grants premium until `expires_at` (`None` for
    /// lifetime) and clears any previous cancellation.
    pub fn activate(&mut self, expires_at: Option<DateTime<Utc>>) {
        self.is_premium = true;
        self.premium_expires_at = expires_at;
        self.premium_cancelled_at = None;
    }

    /// Cancellation transition: revokes premium and stamps the cancellation
    /// time, making `Cancelled` derivable afterwards.
    pub fn cancel(&mut self, now: DateTime<Utc>) {
        self.is_premium = false;
        self.premium_cancelled_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn state(
        is_premium: bool,
        expires_at: Option<DateTime<Utc>>,
        cancelled_at: Option<DateTime<Utc>>,
    ) -> PremiumState {
        PremiumState {
            is_premium,
            premium_expires_at: expires_at,
            premium_cancelled_at: cancelled_at,
        }
    }

    #[test]
    fn test_not_premium_is_none() {
        let now = Utc::now();
        assert_eq!(state(false, None, None).status(now), SubscriptionStatus::None);
    }

    #[test]
    fn test_premium_without_expiry_is_lifetime_active() {
        let now = Utc::now();
        assert_eq!(
            state(true, None, None).status(now),
            SubscriptionStatus::Active { expires_at: None }
        );
    }

    #[test]
    fn test_premium_with_future_expiry_is_active() {
        let now = Utc::now();
        let expires = now + Duration::days(1);
        assert_eq!(
            state(true, Some(expires), None).status(now),
            SubscriptionStatus::Active {
                expires_at: Some(expires)
            }
        );
    }

    #[test]
    fn test_premium_with_past_expiry_is_expired() {
        let now = Utc::now();
        let expires = now - Duration::days(1);
        assert_eq!(
            state(true, Some(expires), None).status(now),
            SubscriptionStatus::Expired { expires_at: expires }
        );
    }

    #[test]
    fn test_expiry_exactly_now_is_expired() {
        let now = Utc::now();
        assert_eq!(
            state(true, Some(now), None).status(now),
            SubscriptionStatus::Expired { expires_at: now }
        );
    }

    #[test]
    fn test_cancelled_is_reachable_via_transition() {
        let now = Utc::now();
        let mut premium = state(true, Some(now + Duration::days(30)), None);

        premium.cancel(now);

        assert_eq!(
            premium.status(now),
            SubscriptionStatus::Cancelled { cancelled_at: now }
        );
    }

    #[test]
    fn test_reactivation_clears_cancellation() {
        let now = Utc::now();
        let mut premium = state(false, None, Some(now - Duration::days(10)));

        let expires = now + Duration::days(30);
        premium.activate(Some(expires));

        assert_eq!(
            premium.status(now),
            SubscriptionStatus::Active {
                expires_at: Some(expires)
            }
        );
        assert_eq!(premium.premium_cancelled_at, None);
    }

    #[test]
    fn test_has_premium_access() {
        let now = Utc::now();
        assert!(state(true, None, None).has_premium_access(now));
        assert!(state(true, Some(now + Duration::hours(1)), None).has_premium_access(now));
        assert!(!state(true, Some(now - Duration::hours(1)), None).has_premium_access(now));
        assert!(!state(false, None, None).has_premium_access(now));
    }

    #[test]
    fn test_labels() {
        let now = Utc::now();
        assert_eq!(state(false, None, None).status(now).label(), "none");
        assert_eq!(state(true, None, None).status(now).label(), "active");
        assert_eq!(
            state(true, Some(now - Duration::days(1)), None).status(now).label(),
            "expired"
        );
        assert_eq!(
            state(false, None, Some(now)).status(now).label(),
            "cancelled"
        );
    }

    #[test]
    fn test_status_serializes_with_tag() {
        let status = SubscriptionStatus::Active { expires_at: None };
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"status\":\"active\""));
    }
}
