//! Shortlist Scoring — pluggable, trait-based classification of historical
//! answers into answered/declined, and the accuracy computation over them.
//!
//! Default: `DeclinedPrefixClassifier` (string-prefix heuristic, fast,
//! deterministic, fully testable). The trait exists so stricter classifiers
//! can be swapped in without touching the endpoint or the scoring math.
//!
//! `AppState` holds an `Arc<dyn AnswerQualityClassifier>`.

use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::models::qa::QaRecordRow;
use crate::models::user::User;

/// Candidates at or above this accuracy make the shortlist.
pub const SHORTLIST_THRESHOLD: f64 = 60.0;

/// Decides whether a stored answer counts as an actual answer, as opposed to
/// the model declining because the context didn't cover the question.
pub trait AnswerQualityClassifier: Send + Sync {
    fn is_answered(&self, answer: &str) -> bool;
}

/// The generation backend opens declined answers with this marker.
const DECLINED_PREFIX: &str = "Unfortunately";

/// Prefix heuristic: an answer that (after trimming surrounding whitespace)
/// starts with the declined marker does not count.
pub struct DeclinedPrefixClassifier;

impl AnswerQualityClassifier for DeclinedPrefixClassifier {
    fn is_answered(&self, answer: &str) -> bool {
        !answer.trim().starts_with(DECLINED_PREFIX)
    }
}

/// A shortlist row, derived from a candidate's QA history at request time
/// and never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ShortlistEntry {
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
    /// Kept unrounded in memory; the threshold comparison uses the raw value
    /// and only the JSON view rounds to two decimals.
    #[serde(serialize_with = "round_two_decimals")]
    pub accuracy: f64,
    pub total_questions: usize,
}

/// Scores one candidate's history. `None` means no questions asked yet —
/// the candidate is excluded from consideration, which is not an error.
pub fn score(
    user: &User,
    records: &[QaRecordRow],
    classifier: &dyn AnswerQualityClassifier,
) -> Option<ShortlistEntry> {
    if records.is_empty() {
        return None;
    }

    let correct_count = records
        .iter()
        .filter(|r| classifier.is_answered(&r.answer))
        .count();
    let total_questions = records.len();
    let accuracy = 100.0 * correct_count as f64 / total_questions as f64;

    Some(ShortlistEntry {
        user_id: user.id,
        full_name: user.full_name.clone(),
        email: user.email.clone(),
        accuracy,
        total_questions,
    })
}

pub fn is_shortlisted(entry: &ShortlistEntry) -> bool {
    entry.accuracy >= SHORTLIST_THRESHOLD
}

fn round_two_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((value * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "alice@example.com".to_string(),
            full_name: "Alice Doe".to_string(),
            created_at: Utc::now(),
        }
    }

    fn record(user_id: Uuid, answer: &str) -> QaRecordRow {
        QaRecordRow {
            id: Uuid::new_v4(),
            user_id,
            question: "q".to_string(),
            answer: answer.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_history_scores_none() {
        assert!(score(&user(), &[], &DeclinedPrefixClassifier).is_none());
    }

    #[test]
    fn test_two_of_three_answered_is_shortlisted() {
        let u = user();
        let records = vec![
            record(u.id, "Paris"),
            record(u.id, "Unfortunately, not found"),
            record(u.id, "42"),
        ];
        let entry = score(&u, &records, &DeclinedPrefixClassifier).unwrap();
        assert_eq!(entry.total_questions, 3);
        assert!((entry.accuracy - 200.0 / 3.0).abs() < 1e-9);
        assert!(is_shortlisted(&entry));

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["accuracy"], 66.67);
    }

    #[test]
    fn test_half_answered_is_not_shortlisted() {
        let u = user();
        let records = vec![
            record(u.id, "Unfortunately I cannot tell from the context."),
            record(u.id, "ok"),
        ];
        let entry = score(&u, &records, &DeclinedPrefixClassifier).unwrap();
        assert_eq!(entry.accuracy, 50.0);
        assert!(!is_shortlisted(&entry));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let u = user();
        let records = vec![
            record(u.id, "a"),
            record(u.id, "b"),
            record(u.id, "c"),
            record(u.id, "Unfortunately..."),
            record(u.id, "Unfortunately..."),
        ];
        let entry = score(&u, &records, &DeclinedPrefixClassifier).unwrap();
        assert_eq!(entry.accuracy, 60.0);
        assert!(is_shortlisted(&entry));
    }

    #[test]
    fn test_declined_prefix_detected_after_trimming() {
        let c = DeclinedPrefixClassifier;
        assert!(!c.is_answered("  Unfortunately, the context says nothing."));
        assert!(!c.is_answered("\nUnfortunately no."));
        assert!(c.is_answered("The candidate is unfortunately overqualified."));
        assert!(c.is_answered("Paris"));
    }

    #[test]
    fn test_classifier_is_swappable() {
        /// Counts only non-empty answers; stricter suites can go further.
        struct NonEmpty;
        impl AnswerQualityClassifier for NonEmpty {
            fn is_answered(&self, answer: &str) -> bool {
                !answer.trim().is_empty()
            }
        }

        let u = user();
        let records = vec![record(u.id, ""), record(u.id, "Unfortunately...")];
        let entry = score(&u, &records, &NonEmpty).unwrap();
        assert_eq!(entry.accuracy, 50.0);
    }
}
