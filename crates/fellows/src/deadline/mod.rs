//! Deadline arithmetic and urgency tiers for opportunity close dates.
//!
//! Day counts are taken between calendar dates: the evaluation instant is
//! reduced to its UTC date before differencing, so the time of day never moves
//! a boundary.

mod status;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub use status::{format_display_date, DeadlineStatus};

/// Deadlines this many days out (or fewer, including past ones) are urgent.
pub const URGENT_WITHIN_DAYS: i64 = 3;
/// Deadlines this many days out (or fewer) are at least a warning.
pub const WARNING_WITHIN_DAYS: i64 = 14;

/// Severity tier used to color-code deadline badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineUrgency {
    Urgent,
    Warning,
    Safe,
}

impl DeadlineUrgency {
    pub const fn ordered() -> [Self; 3] {
        [Self::Urgent, Self::Warning, Self::Safe]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::Warning => "Closing Soon",
            Self::Safe => "Open",
        }
    }

    pub const fn style_class(self) -> &'static str {
        match self {
            Self::Safe => "border-green-200 bg-green-50 text-green-700 dark:border-green-800 dark:bg-green-950 dark:text-green-300",
            Self::Warning => "border-yellow-200 bg-yellow-50 text-yellow-700 dark:border-yellow-800 dark:bg-yellow-950 dark:text-yellow-300",
            Self::Urgent => "border-red-200 bg-red-50 text-red-700 dark:border-red-800 dark:bg-red-950 dark:text-red-300",
        }
    }
}

/// Thresholds separating the urgency tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlinePolicy {
    pub urgent_within_days: i64,
    pub warning_within_days: i64,
}

impl Default for DeadlinePolicy {
    fn default() -> Self {
        Self {
            urgent_within_days: URGENT_WITHIN_DAYS,
            warning_within_days: WARNING_WITHIN_DAYS,
        }
    }
}

impl DeadlinePolicy {
    /// Classify a signed day count. Past deadlines fall into the urgent tier.
    pub fn classify(&self, days_until: i64) -> DeadlineUrgency {
        if days_until <= self.urgent_within_days {
            DeadlineUrgency::Urgent
        } else if days_until <= self.warning_within_days {
            DeadlineUrgency::Warning
        } else {
            DeadlineUrgency::Safe
        }
    }

    pub fn urgency(&self, close_date: Option<NaiveDate>, now: DateTime<Utc>) -> DeadlineUrgency {
        match close_date {
            Some(close_date) => self.classify(days_until_deadline(close_date, now)),
            None => DeadlineUrgency::Safe,
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.urgent_within_days <= self.warning_within_days
    }
}

/// Signed number of calendar days from `now` (as a UTC date) to `close_date`.
pub fn days_until_deadline(close_date: NaiveDate, now: DateTime<Utc>) -> i64 {
    (close_date - now.date_naive()).num_days()
}

/// Urgency tier under the default thresholds. Rolling applications are safe.
pub fn deadline_urgency(close_date: Option<NaiveDate>, now: DateTime<Utc>) -> DeadlineUrgency {
    DeadlinePolicy::default().urgency(close_date, now)
}

/// Midnight UTC on `date`, used when callers only have a calendar day.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}
