//! Calendar month grouping for event lists.
//!
//! Groups a pre-sorted event list into (year, month) buckets for progressive
//! disclosure. Grouping is stable: it never re-sorts, and bucket order is
//! first-appearance order in the input, which is also how the
//! default-open policy indexes into it.

use crate::types::LiveEvent;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Fixed-locale month names for bucket labels.
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A (year, month) bucket key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    /// Calendar year.
    pub year: i32,
    /// Month number, 1-12.
    pub month: u32,
}

impl MonthKey {
    /// The key for a calendar date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Fixed-locale label, e.g. "June 2025".
    #[must_use]
    pub fn label(&self) -> String {
        let name = MONTH_NAMES
            .get(self.month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("Unknown");
        format!("{name} {year}", year = self.year)
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One month's worth of events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    /// Bucket key.
    pub key: MonthKey,
    /// Display label for the bucket header.
    pub label: String,
    /// Events in this month, in input order.
    pub events: Vec<LiveEvent>,
}

/// Group events into month buckets.
///
/// Events are bucketed by exact (year, month) equality of their date.
/// Within a bucket the input order is preserved, and buckets appear in
/// first-appearance order - callers are expected to pre-sort by date
/// descending, but grouping itself does not re-sort.
#[must_use]
pub fn group_by_month(events: &[LiveEvent]) -> Vec<MonthBucket> {
    let mut buckets: Vec<MonthBucket> = Vec::new();

    for event in events {
        let key = MonthKey::from_date(event.date);
        match buckets.iter_mut().find(|bucket| bucket.key == key) {
            Some(bucket) => bucket.events.push(event.clone()),
            None => buckets.push(MonthBucket {
                key,
                label: key.label(),
                events: vec![event.clone()],
            }),
        }
    }

    buckets
}

/// Bucket keys that should render expanded by default.
///
/// A bucket is open when its year is the current year or later, or when it
/// is exactly one year before the current year and its month number is at
/// least the current month number. This approximates "everything from
/// roughly the last twelve months plus all future months", keeping the
/// source's asymmetry: future months of the current year are open, but only
/// the trailing window of the previous year is.
#[must_use]
pub fn default_open_months(buckets: &[MonthBucket], today: NaiveDate) -> Vec<MonthKey> {
    buckets
        .iter()
        .map(|bucket| bucket.key)
        .filter(|key| is_open_by_default(*key, today))
        .collect()
}

fn is_open_by_default(key: MonthKey, today: NaiveDate) -> bool {
    key.year >= today.year() || (key.year == today.year() - 1 && key.month >= today.month())
}

/// Group events and compute the default-open bucket keys in one step.
///
/// Convenience for the presentation layer: the month buckets plus the keys
/// that should render expanded, given "today".
#[must_use]
pub fn group_and_default_open(
    events: &[LiveEvent],
    today: NaiveDate,
) -> (Vec<MonthBucket>, Vec<MonthKey>) {
    let buckets = group_by_month(events);
    let open = default_open_months(&buckets, today);
    (buckets, open)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use crate::types::{EventId, UserId};

    fn event(year: i32, month: u32, day: u32, artist: &str) -> LiveEvent {
        LiveEvent {
            id: EventId::new(),
            artist: artist.to_owned(),
            date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
            venue: "The Venue".to_owned(),
            created_by: UserId::new(),
        }
    }

    #[test]
    fn buckets_follow_first_appearance_order() {
        let events = vec![
            event(2026, 1, 10, "a"),
            event(2025, 1, 5, "b"),
            event(2026, 1, 2, "c"),
            event(2024, 7, 1, "d"),
        ];

        let buckets = group_by_month(&events);
        let keys: Vec<MonthKey> = buckets.iter().map(|b| b.key).collect();

        assert_eq!(
            keys,
            vec![
                MonthKey { year: 2026, month: 1 },
                MonthKey { year: 2025, month: 1 },
                MonthKey { year: 2024, month: 7 },
            ]
        );
        // Within the 2026-01 bucket, input order is preserved.
        let first = &buckets[0].events;
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].artist, "a");
        assert_eq!(first[1].artist, "c");
    }

    #[test]
    fn labels_use_fixed_locale_month_names() {
        let buckets = group_by_month(&[event(2025, 6, 15, "a")]);
        assert_eq!(buckets[0].label, "June 2025");
    }

    #[test]
    fn empty_input_groups_to_no_buckets() {
        assert!(group_by_month(&[]).is_empty());
    }

    #[test]
    fn recency_default_matches_one_year_cutoff() {
        // today = 2025-06-15; months {2024-03, 2024-07, 2025-01, 2026-01}.
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let events = vec![
            event(2024, 3, 1, "a"),
            event(2024, 7, 1, "b"),
            event(2025, 1, 1, "c"),
            event(2026, 1, 1, "d"),
        ];

        let buckets = group_by_month(&events);
        let open = default_open_months(&buckets, today);

        assert_eq!(
            open,
            vec![
                MonthKey { year: 2024, month: 7 },
                MonthKey { year: 2025, month: 1 },
                MonthKey { year: 2026, month: 1 },
            ]
        );
        assert!(!open.contains(&MonthKey { year: 2024, month: 3 }));
    }

    #[test]
    fn future_months_of_current_year_default_open() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let buckets = group_by_month(&[event(2025, 12, 31, "nye")]);

        let open = default_open_months(&buckets, today);
        assert_eq!(open.len(), 1);
    }

    #[test]
    fn previous_year_same_month_is_open() {
        // Exactly one year ago, month equal to the current month.
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let buckets = group_by_month(&[event(2024, 6, 1, "a")]);

        assert_eq!(default_open_months(&buckets, today).len(), 1);
    }

    #[test]
    fn two_years_back_is_closed() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let buckets = group_by_month(&[event(2023, 12, 1, "a")]);

        assert!(default_open_months(&buckets, today).is_empty());
    }
}
