use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use fellows::deadline::{
    days_until_deadline, deadline_urgency, start_of_day, DeadlinePolicy, DeadlineStatus,
    DeadlineUrgency, URGENT_WITHIN_DAYS, WARNING_WITHIN_DAYS,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 14, 30, 0)
        .single()
        .expect("valid instant")
}

fn days_from_now(days: i64) -> NaiveDate {
    now().date_naive() + Duration::days(days)
}

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid date")
}

#[test]
fn thresholds_match_documented_constants() {
    assert_eq!(URGENT_WITHIN_DAYS, 3);
    assert_eq!(WARNING_WITHIN_DAYS, 14);
    let policy = DeadlinePolicy::default();
    assert_eq!(policy.urgent_within_days, URGENT_WITHIN_DAYS);
    assert_eq!(policy.warning_within_days, WARNING_WITHIN_DAYS);
}

#[test]
fn boundary_values_select_expected_tiers() {
    let cases = [
        (0, DeadlineUrgency::Urgent),
        (3, DeadlineUrgency::Urgent),
        (4, DeadlineUrgency::Warning),
        (14, DeadlineUrgency::Warning),
        (15, DeadlineUrgency::Safe),
    ];

    for (offset, expected) in cases {
        let close = days_from_now(offset);
        assert_eq!(days_until_deadline(close, now()), offset);
        assert_eq!(
            deadline_urgency(Some(close), now()),
            expected,
            "offset {offset} days"
        );
    }
}

#[test]
fn past_deadlines_are_negative_and_classified_by_magnitude() {
    for offset in [-1, -30, -365] {
        let close = days_from_now(offset);
        let days = days_until_deadline(close, now());
        assert!(days < 0);
        assert_eq!(days, offset);
        assert_eq!(
            deadline_urgency(Some(close), now()),
            DeadlineUrgency::Urgent
        );
    }
}

#[test]
fn closing_today_is_zero_and_urgent() {
    let close = now().date_naive();
    assert_eq!(days_until_deadline(close, now()), 0);
    assert_eq!(deadline_urgency(Some(close), now()), DeadlineUrgency::Urgent);
}

#[test]
fn rolling_applications_are_always_safe() {
    let instants = [
        now(),
        start_of_day(date("1999-12-31")),
        start_of_day(date("2100-01-01")),
    ];
    for instant in instants {
        assert_eq!(deadline_urgency(None, instant), DeadlineUrgency::Safe);
        assert_eq!(DeadlineStatus::evaluate(None, instant), DeadlineStatus::Rolling);
    }
}

#[test]
fn repeated_evaluation_is_idempotent() {
    let close = days_from_now(9);
    let first = (
        days_until_deadline(close, now()),
        deadline_urgency(Some(close), now()),
    );
    let second = (
        days_until_deadline(close, now()),
        deadline_urgency(Some(close), now()),
    );
    assert_eq!(first, second);
}

#[test]
fn new_year_deadline_scenario() {
    let close = date("2025-01-01");

    let before = start_of_day(date("2024-12-29"));
    assert_eq!(days_until_deadline(close, before), 3);
    assert_eq!(deadline_urgency(Some(close), before), DeadlineUrgency::Urgent);
    assert!(!DeadlineStatus::evaluate(Some(close), before).is_closed());

    let after = start_of_day(date("2025-01-02"));
    assert_eq!(days_until_deadline(close, after), -1);
    assert_eq!(deadline_urgency(Some(close), after), DeadlineUrgency::Urgent);
    let status = DeadlineStatus::evaluate(Some(close), after);
    assert!(status.is_closed());
    assert_eq!(status.headline(), "Closed");
}

#[test]
fn late_evening_evaluation_uses_the_utc_calendar_day() {
    let close = date("2025-01-01");
    let late = Utc
        .with_ymd_and_hms(2024, 12, 28, 23, 59, 59)
        .single()
        .expect("valid instant");
    assert_eq!(days_until_deadline(close, late), 4);
    assert_eq!(deadline_urgency(Some(close), late), DeadlineUrgency::Warning);
}
