//! Analytics Aggregation
//!
//! Folds an owner's analytics rows into the stats report.

use chrono::{DateTime, Duration, Utc};

use crate::models::analytics::{AnalyticsRecord, AnalyticsStats};
use crate::utils::clock::parse_timestamp;

/// Window counted as "this month"
pub const RECENT_WINDOW_DAYS: i64 = 30;

/// Aggregate `records` relative to `now`
pub fn compute_stats(records: &[AnalyticsRecord], now: DateTime<Utc>) -> AnalyticsStats {
    let mut stats = AnalyticsStats {
        total_pitches: records.len(),
        ..Default::default()
    };
    if records.is_empty() {
        return stats;
    }

    let cutoff = now - Duration::days(RECENT_WINDOW_DAYS);
    let mut total_words = 0usize;

    for record in records {
        *stats
            .pitch_types
            .entry(record.pitch_type.clone())
            .or_insert(0) += 1;
        *stats
            .audience_types
            .entry(record.audience.clone())
            .or_insert(0) += 1;
        total_words += record.word_count.total;

        if parse_timestamp(&record.created_at).is_some_and(|ts| ts > cutoff) {
            stats.created_this_month += 1;
        }
    }

    stats.average_word_count = total_words as f64 / records.len() as f64;
    stats
}
