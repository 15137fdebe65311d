//! Tests for the input-validation boundary.

use sensei_core::{
  lesson::{Attendance, LessonStatus, RateType},
  student::NewStudent,
};

use crate::input;

#[test]
fn parses_date_and_time_into_a_start_instant() {
  let starts_at = input::parse_starts_at("2025-11-06", "16:00").unwrap();
  assert_eq!(starts_at.to_string(), "2025-11-06 16:00:00");
}

#[test]
fn rejects_malformed_dates_and_times() {
  assert!(input::parse_starts_at("06-11-2025", "16:00").is_err());
  assert!(input::parse_starts_at("2025-11-06", "4pm").is_err());
  assert!(input::parse_day("2025/11/06").is_err());
}

#[test]
fn subject_is_trimmed_and_must_be_non_empty() {
  assert_eq!(input::subject("  Math ").unwrap(), "Math");
  assert!(input::subject("   ").is_err());
}

#[test]
fn duration_must_be_positive() {
  assert_eq!(input::duration(60).unwrap(), 60);
  assert!(input::duration(0).is_err());
}

#[test]
fn parses_enum_tokens() {
  assert_eq!(input::parse_rate_type("fixed").unwrap(), RateType::Fixed);
  assert_eq!(
    input::parse_status("canceled").unwrap(),
    LessonStatus::Canceled
  );
  assert_eq!(input::parse_attendance("late").unwrap(), Attendance::Late);
  assert!(input::parse_rate_type("per-minute").is_err());
  assert!(input::parse_status("finished").is_err());
  assert!(input::parse_attendance("present").is_err());
}

#[test]
fn minors_require_guardian_contact() {
  let mut input_rec = NewStudent {
    name:           "Minji".into(),
    is_adult:       false,
    birthdate:      None,
    grade:          None,
    guardian_name:  Some("Mrs Kim".into()),
    guardian_phone: None,
    email:          None,
    note:           None,
  };
  assert!(input::check_guardian(&input_rec).is_err());

  input_rec.guardian_phone = Some("010-1234-5678".into());
  assert!(input::check_guardian(&input_rec).is_ok());

  // Adults never need guardian fields.
  input_rec.is_adult = true;
  input_rec.guardian_name = None;
  input_rec.guardian_phone = None;
  assert!(input::check_guardian(&input_rec).is_ok());
}
