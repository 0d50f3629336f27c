//! Daily quiz entitlement gate.

use serde::Serialize;

/// How many more quizzes a user may take today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuizAllowance {
    /// Premium users are never limited.
    Unlimited,
    /// Free users get a per-day budget from the app settings.
    Limited { remaining: u32 },
}

impl QuizAllowance {
    pub fn can_take(&self) -> bool {
        match self {
            QuizAllowance::Unlimited => true,
            QuizAllowance::Limited { remaining } => *remaining > 0,
        }
    }

    /// Remaining quizzes today; `None` means unlimited.
    pub fn remaining(&self) -> Option<u32> {
        match self {
            QuizAllowance::Unlimited => None,
            QuizAllowance::Limited { remaining } => Some(*remaining),
        }
    }
}

/// Computes the allowance from today's usage, the configured free limit, and
/// the user's premium flag.
pub fn quiz_allowance(used_today: u32, max_free_per_day: u32, is_premium: bool) -> QuizAllowance {
    if is_premium {
        return QuizAllowance::Unlimited;
    }

    QuizAllowance::Limited {
        remaining: max_free_per_day.saturating_sub(used_today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_premium_is_always_unlimited() {
        let allowance = quiz_allowance(5, 5, true);
        assert_eq!(allowance, QuizAllowance::Unlimited);
        assert!(allowance.can_take());
        assert_eq!(allowance.remaining(), None);

        assert!(quiz_allowance(1000, 0, true).can_take());
    }

    #[test]
    fn test_free_user_at_limit_cannot_take() {
        let allowance = quiz_allowance(5, 5, false);
        assert!(!allowance.can_take());
        assert_eq!(allowance.remaining(), Some(0));
    }

    #[test]
    fn test_free_user_below_limit_can_take() {
        let allowance = quiz_allowance(2, 5, false);
        assert!(allowance.can_take());
        assert_eq!(allowance.remaining(), Some(3));
    }

    #[test]
    fn test_usage_beyond_limit_saturates_at_zero() {
        let allowance = quiz_allowance(12, 5, false);
        assert_eq!(allowance.remaining(), Some(0));
        assert!(!allowance.can_take());
    }

    #[test]
    fn test_zero_limit_blocks_free_users() {
        assert!(!quiz_allowance(0, 0, false).can_take());
    }

    #[test]
    fn test_allowance_serialization() {
        let json = serde_json::to_string(&QuizAllowance::Limited { remaining: 3 }).unwrap();
        assert!(json.contains("\"kind\":\"limited\""));
        assert!(json.contains("\"remaining\":3"));

        let json = serde_json::to_string(&QuizAllowance::Unlimited).unwrap();
        assert!(json.contains("\"kind\":\"unlimited\""));
    }
}
