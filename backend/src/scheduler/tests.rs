//! Unit tests for appointment date computation and input parsing.

use chrono::NaiveDate;

use super::*;
use crate::models::{CycleNumber, IntervalUnit};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ymd(value: NaiveDate) -> String {
    value.format(DATE_FORMAT).to_string()
}

// =========================================================
// Parsing
// =========================================================

#[test]
fn test_parse_start_date_valid() {
    assert_eq!(parse_start_date("2024-01-31").unwrap(), date(2024, 1, 31));
    assert_eq!(parse_start_date("  2024-02-29 ").unwrap(), date(2024, 2, 29));
}

#[test]
fn test_parse_start_date_rejects_loose_formats() {
    for input in ["2024-1-5", "24-01-05", "2024/01/05", "20240105", "2024-01-05T00:00", ""] {
        assert_eq!(
            parse_start_date(input),
            Err(ScheduleError::InvalidDate(input.to_string())),
            "input {input:?} should be rejected"
        );
    }
}

#[test]
fn test_parse_start_date_rejects_impossible_days() {
    assert!(matches!(parse_start_date("2023-02-29"), Err(ScheduleError::InvalidDate(_))));
    assert!(matches!(parse_start_date("2024-13-01"), Err(ScheduleError::InvalidDate(_))));
    assert!(matches!(parse_start_date("2024-04-31"), Err(ScheduleError::InvalidDate(_))));
}

#[test]
fn test_parse_interval_count() {
    assert_eq!(parse_interval_count("7").unwrap(), 7);
    assert_eq!(parse_interval_count(" 2 ").unwrap(), 2);

    for input in ["0", "-1", "1.5", "two", ""] {
        assert_eq!(
            parse_interval_count(input),
            Err(ScheduleError::InvalidInterval(input.to_string()))
        );
    }
}

#[test]
fn test_parse_tolerance_days_defaults_to_zero() {
    assert_eq!(parse_tolerance_days(None).unwrap(), 0);
    assert_eq!(parse_tolerance_days(Some("")).unwrap(), 0);
    assert_eq!(parse_tolerance_days(Some("   ")).unwrap(), 0);
    assert_eq!(parse_tolerance_days(Some("3")).unwrap(), 3);
}

#[test]
fn test_parse_tolerance_days_rejects_negative() {
    assert_eq!(
        parse_tolerance_days(Some("-2")),
        Err(ScheduleError::InvalidTolerance("-2".to_string()))
    );
}

// =========================================================
// Computation
// =========================================================

#[test]
fn test_weekly_scenario_with_tolerance() {
    let schedule = compute_schedule(date(2024, 1, 1), IntervalUnit::Day, 7, 2).unwrap();
    let entries = schedule.entries();

    assert_eq!(entries[0].cycle_number, CycleNumber::new(1));
    assert_eq!(ymd(entries[0].on_date), "2024-01-01");
    assert_eq!(ymd(entries[0].plus_date), "2024-01-03");
    assert_eq!(ymd(entries[0].minus_date), "2023-12-30");

    assert_eq!(entries[1].cycle_number, CycleNumber::new(2));
    assert_eq!(ymd(entries[1].on_date), "2024-01-08");
    assert_eq!(ymd(entries[1].plus_date), "2024-01-10");
    assert_eq!(ymd(entries[1].minus_date), "2024-01-06");
}

#[test]
fn test_always_thirty_entries() {
    for unit in IntervalUnit::ALL {
        for count in [1, 3, 12] {
            let schedule = compute_schedule(date(2025, 6, 15), unit, count, 1).unwrap();
            assert_eq!(schedule.len(), DEFAULT_APPOINTMENT_COUNT as usize);
        }
    }
}

#[test]
fn test_day_interval_is_linear() {
    let start = date(2024, 3, 10);
    let schedule = compute_schedule(start, IntervalUnit::Day, 5, 0).unwrap();

    for (k, entry) in schedule.iter().enumerate() {
        assert_eq!((entry.on_date - start).num_days(), 5 * k as i64);
        assert_eq!(entry.cycle_number.value() as usize, k + 1);
    }
}

#[test]
fn test_week_interval_multiplies_by_seven() {
    let start = date(2024, 12, 20);
    let schedule = compute_schedule(start, IntervalUnit::Week, 3, 0).unwrap();

    assert_eq!(schedule.entries()[1].on_date, date(2025, 1, 10));
    for (k, entry) in schedule.iter().enumerate() {
        assert_eq!((entry.on_date - start).num_days(), 21 * k as i64);
    }
}

#[test]
fn test_month_interval_clamps_to_leap_february() {
    let schedule = compute_schedule(date(2024, 1, 31), IntervalUnit::Month, 1, 0).unwrap();
    let dates: Vec<String> = schedule.iter().take(4).map(|e| ymd(e.on_date)).collect();

    assert_eq!(dates, ["2024-01-31", "2024-02-29", "2024-03-29", "2024-04-29"]);
    assert_eq!(ymd(schedule.entries()[12].on_date), "2025-01-29");
    assert_eq!(ymd(schedule.entries()[13].on_date), "2025-02-28");
    assert_eq!(ymd(schedule.entries()[14].on_date), "2025-03-28");
}

#[test]
fn test_month_interval_steps_from_previous_date() {
    let start = date(2023, 8, 31);
    let schedule = compute_schedule(start, IntervalUnit::Month, 2, 0).unwrap();
    let entries = schedule.entries();

    assert_eq!(entries[0].on_date, start);
    for pair in entries.windows(2) {
        let expected = pair[0].on_date.checked_add_months(Months::new(2)).unwrap();
        assert_eq!(pair[1].on_date, expected);
    }

    let dates: Vec<String> = entries.iter().take(5).map(|e| ymd(e.on_date)).collect();
    assert_eq!(dates, ["2023-08-31", "2023-10-31", "2023-12-31", "2024-02-29", "2024-04-29"]);
}

#[test]
fn test_last_entry_does_not_advance_past_schedule() {
    let config = ScheduleConfig { appointment_count: 1 };
    let start = NaiveDate::MAX;
    let schedule = compute_schedule_with(&config, start, IntervalUnit::Month, 1, 0).unwrap();
    assert_eq!(schedule.entries()[0].on_date, start);
}

#[test]
fn test_tolerance_window_is_symmetric() {
    for tolerance in [0, 1, 4, 30] {
        let schedule = compute_schedule(date(2024, 2, 27), IntervalUnit::Week, 2, tolerance).unwrap();
        for entry in &schedule {
            assert_eq!((entry.plus_date - entry.on_date).num_days(), tolerance as i64);
            assert_eq!((entry.on_date - entry.minus_date).num_days(), tolerance as i64);
        }
    }
}

#[test]
fn test_zero_tolerance_collapses_window() {
    let schedule = compute_schedule(date(2024, 5, 1), IntervalUnit::Day, 1, 0).unwrap();
    for entry in &schedule {
        assert_eq!(entry.plus_date, entry.on_date);
        assert_eq!(entry.minus_date, entry.on_date);
    }
}

#[test]
fn test_zero_interval_rejected() {
    assert_eq!(
        compute_schedule(date(2024, 1, 1), IntervalUnit::Day, 0, 0),
        Err(ScheduleError::InvalidInterval("0".to_string()))
    );
}

#[test]
fn test_configured_appointment_count() {
    let config = ScheduleConfig { appointment_count: 4 };
    let schedule = compute_schedule_with(&config, date(2024, 1, 1), IntervalUnit::Day, 1, 0).unwrap();
    assert_eq!(schedule.len(), 4);
    assert_eq!(schedule.entries()[3].on_date, date(2024, 1, 4));

    let empty = ScheduleConfig { appointment_count: 0 };
    assert_eq!(
        compute_schedule_with(&empty, date(2024, 1, 1), IntervalUnit::Day, 1, 0),
        Err(ScheduleError::EmptySchedule)
    );
}

#[test]
fn test_overflow_reports_out_of_range() {
    let start = NaiveDate::MAX - chrono::Days::new(10);
    assert_eq!(
        compute_schedule(start, IntervalUnit::Month, 1, 0),
        Err(ScheduleError::DateOutOfRange(start))
    );

    let early = NaiveDate::MIN;
    assert_eq!(
        compute_schedule(early, IntervalUnit::Day, 1, 1),
        Err(ScheduleError::DateOutOfRange(early))
    );
}

#[test]
fn test_compute_is_deterministic() {
    let a = compute_schedule(date(2024, 7, 4), IntervalUnit::Month, 3, 5).unwrap();
    let b = compute_schedule(date(2024, 7, 4), IntervalUnit::Month, 3, 5).unwrap();
    assert_eq!(a, b);
}
