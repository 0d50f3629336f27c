//! Per-category progress scoring.
//!
//! Builds the category score map shown on the learner dashboard: quiz
//! attempts are rolled up by the grammar category their topic belongs to.

use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// One graded attempt, already joined to its topic's category.
#[derive(Debug, Clone)]
pub struct TopicAttempt {
    pub category_id: Uuid,
    pub score: i32,
    pub max_score: i32,
}

/// Rolled-up progress for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProgress {
    pub category_id: Uuid,
    pub attempts: u32,
    /// Mean percentage over attempts; attempts with a zero maximum are
    /// counted but contribute 0%.
    pub average_percent: f64,
}

/// Rolls attempts up into per-category progress, ordered by category id for
/// a stable output.
pub fn category_progress(attempts: &[TopicAttempt]) -> Vec<CategoryProgress> {
    let mut sums: HashMap<Uuid, (u32, f64)> = HashMap::new();

    for attempt in attempts {
        let percent = if attempt.max_score > 0 {
            (attempt.score as f64 / attempt.max_score as f64) * 100.0
        } else {
            0.0
        };
        let entry = sums.entry(attempt.category_id).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += percent;
    }

    let mut progress: Vec<CategoryProgress> = sums
        .into_iter()
        .map(|(category_id, (attempts, percent_sum))| CategoryProgress {
            category_id,
            attempts,
            average_percent: percent_sum / attempts as f64,
        })
        .collect();

    progress.sort_by_key(|p| p.category_id);
    progress
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(category_id: Uuid, score: i32, max_score: i32) -> TopicAttempt {
        TopicAttempt {
            category_id,
            score,
            max_score,
        }
    }

    #[test]
    fn test_empty_attempts_yield_empty_progress() {
        assert!(category_progress(&[]).is_empty());
    }

    #[test]
    fn test_single_category_average() {
        let cat = Uuid::new_v4();
        let progress = category_progress(&[attempt(cat, 4, 4), attempt(cat, 1, 4)]);

        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0].attempts, 2);
        assert!((progress[0].average_percent - 62.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_multiple_categories_grouped() {
        let cat_a = Uuid::new_v4();
        let cat_b = Uuid::new_v4();

        let progress = category_progress(&[
            attempt(cat_a, 2, 4),
            attempt(cat_b, 3, 3),
            attempt(cat_a, 4, 4),
        ]);

        assert_eq!(progress.len(), 2);
        let a = progress.iter().find(|p| p.category_id == cat_a).unwrap();
        let b = progress.iter().find(|p| p.category_id == cat_b).unwrap();
        assert_eq!(a.attempts, 2);
        assert!((a.average_percent - 75.0).abs() < f64::EPSILON);
        assert_eq!(b.attempts, 1);
        assert!((b.average_percent - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_max_score_counts_as_zero_percent() {
        let cat = Uuid::new_v4();
        let progress = category_progress(&[attempt(cat, 0, 0), attempt(cat, 2, 2)]);

        assert_eq!(progress[0].attempts, 2);
        assert!((progress[0].average_percent - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_output_sorted_by_category_id() {
        let attempts: Vec<TopicAttempt> = (0..5)
            .map(|_| attempt(Uuid::new_v4(), 1, 2))
            .collect();
        let progress = category_progress(&attempts);
        assert!(progress.windows(2).all(|w| w[0].category_id <= w[1].category_id));
    }
}
