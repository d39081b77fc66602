use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::days_until_deadline;

/// Display state of an opportunity's application window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DeadlineStatus {
    Open { days_left: i64 },
    Closed { days_ago: i64 },
    Rolling,
}

impl DeadlineStatus {
    pub fn evaluate(close_date: Option<NaiveDate>, now: DateTime<Utc>) -> Self {
        let Some(close_date) = close_date else {
            return Self::Rolling;
        };

        let days = days_until_deadline(close_date, now);
        if days < 0 {
            Self::Closed { days_ago: -days }
        } else {
            Self::Open { days_left: days }
        }
    }

    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed { .. })
    }

    pub const fn accepts_applications(self) -> bool {
        !self.is_closed()
    }

    pub fn headline(self) -> String {
        match self {
            Self::Open { days_left: 1 } => "1 day left".to_string(),
            Self::Open { days_left } => format!("{days_left} days left"),
            Self::Closed { .. } => "Closed".to_string(),
            Self::Rolling => "Rolling Application".to_string(),
        }
    }

    pub fn detail(self, close_date: Option<NaiveDate>) -> String {
        match (self, close_date) {
            (Self::Rolling, _) | (_, None) => "Apply anytime".to_string(),
            (_, Some(date)) => format!("Closes {}", format_display_date(date)),
        }
    }
}

/// Human-readable calendar date, e.g. `Jan 1, 2025`.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
