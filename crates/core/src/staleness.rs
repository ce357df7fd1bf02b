//! Silent-deal detection.
//!
//! A deal is silent when nobody has contacted the prospect for at least
//! [`SILENT_THRESHOLD_DAYS`] whole days. A deal with no recorded contact
//! is always silent and ranks ahead of every dated one.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Whole days without contact after which a deal counts as silent.
pub const SILENT_THRESHOLD_DAYS: i64 = 5;

const MILLIS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

/// Outcome of classifying a single deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SilenceClassification {
    pub is_silent: bool,
    /// Whole days since the last contact; `None` when there never was one.
    pub days_since_contact: Option<i64>,
}

impl SilenceClassification {
    /// Rank key: larger means more neglected. Never-contacted sorts first.
    fn neglect(&self) -> i64 {
        self.days_since_contact.unwrap_or(i64::MAX)
    }
}

/// Whole days elapsed between `last_contact` and `now`, floored.
///
/// A contact date in the future counts as zero days.
pub fn days_since(last_contact: Timestamp, now: Timestamp) -> i64 {
    let millis = (now - last_contact).num_milliseconds();
    millis.div_euclid(MILLIS_PER_DAY).max(0)
}

/// Classify a deal by its last contact date.
pub fn classify_silence(last_contact: Option<Timestamp>, now: Timestamp) -> SilenceClassification {
    match last_contact {
        None => SilenceClassification {
            is_silent: true,
            days_since_contact: None,
        },
        Some(at) => {
            let days = days_since(at, now);
            SilenceClassification {
                is_silent: days >= SILENT_THRESHOLD_DAYS,
                days_since_contact: Some(days),
            }
        }
    }
}

/// Keep the silent items and order them most-neglected first.
///
/// `last_contact` extracts the contact timestamp from each item, which
/// lets the same ranking serve local deals and CRM deals alike. Items
/// with equal neglect keep their input order.
pub fn rank_silent<T, F>(items: Vec<T>, last_contact: F, now: Timestamp) -> Vec<(T, SilenceClassification)>
where
    F: Fn(&T) -> Option<Timestamp>,
{
    let mut silent: Vec<(T, SilenceClassification)> = items
        .into_iter()
        .filter_map(|item| {
            let class = classify_silence(last_contact(&item), now);
            class.is_silent.then_some((item, class))
        })
        .collect();

    silent.sort_by(|a, b| b.1.neglect().cmp(&a.1.neglect()));
    silent
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
