//! Caller-side validation.
//!
//! The core repositories accept input as-is, so everything user-typed is
//! checked here before it reaches them: non-empty subject, well-formed
//! date/time, positive duration, guardian contact for minors.

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sensei_core::{
  lesson::{Attendance, LessonStatus, RateType},
  student::NewStudent,
};

pub fn parse_day(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .with_context(|| format!("invalid date {s:?}, expected YYYY-MM-DD"))
}

pub fn parse_starts_at(date: &str, time: &str) -> Result<NaiveDateTime> {
  let day = parse_day(date)?;
  let time = NaiveTime::parse_from_str(time, "%H:%M")
    .with_context(|| format!("invalid time {time:?}, expected HH:MM"))?;
  Ok(day.and_time(time))
}

pub fn subject(raw: &str) -> Result<String> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    bail!("subject must not be empty");
  }
  Ok(trimmed.to_owned())
}

pub fn duration(minutes: u32) -> Result<u32> {
  if minutes == 0 {
    bail!("duration must be a positive number of minutes");
  }
  Ok(minutes)
}

pub fn parse_rate_type(s: &str) -> Result<RateType> {
  match s {
    "hourly" => Ok(RateType::Hourly),
    "fixed" => Ok(RateType::Fixed),
    other => bail!("unknown rate type {other:?} (hourly|fixed)"),
  }
}

pub fn parse_status(s: &str) -> Result<LessonStatus> {
  match s {
    "scheduled" => Ok(LessonStatus::Scheduled),
    "done" => Ok(LessonStatus::Done),
    "canceled" => Ok(LessonStatus::Canceled),
    other => bail!("unknown status {other:?} (scheduled|done|canceled)"),
  }
}

pub fn parse_attendance(s: &str) -> Result<Attendance> {
  match s {
    "show" => Ok(Attendance::Show),
    "late" => Ok(Attendance::Late),
    "absent" => Ok(Attendance::Absent),
    other => bail!("unknown attendance {other:?} (show|late|absent)"),
  }
}

/// A well-formed minor record carries guardian contact details.
pub fn check_guardian(input: &NewStudent) -> Result<()> {
  if !input.is_adult
    && (input.guardian_name.is_none() || input.guardian_phone.is_none())
  {
    bail!("guardian name and phone are required for a minor");
  }
  Ok(())
}
