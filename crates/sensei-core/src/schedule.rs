//! The schedule view — a date-scoped, time-ordered projection of lessons.
//!
//! Never stored, always derived: a pure function of the lesson collection,
//! the student directory, and the selected calendar day. This module reads
//! both stores and mutates neither.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
  lesson::{Lesson, LessonStatus},
  student::StudentLookup,
};

/// Display value substituted when a lesson's student id has no directory
/// record (removed elsewhere, or recorded before the student existed).
pub const UNKNOWN_STUDENT: &str = "(unknown student)";

/// One row of the day view: a lesson joined with its student's display name.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleEntry {
  pub lesson:       Lesson,
  pub student_name: String,
}

/// Derived completion stats for one day's entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DaySummary {
  pub total:     usize,
  pub completed: usize,
  /// Whole percent, rounded; 0 for an empty day.
  pub completion_pct: u32,
}

/// Every lesson whose `starts_at` falls on `day`, ascending by start
/// instant, joined with student names.
///
/// Selection is a calendar-day comparison (same year/month/day), not a
/// 24-hour window. The sort is stable, so lessons starting at the same
/// instant keep their collection order — an arbitrary tiebreak, not a
/// semantic one.
pub fn day_schedule(
  lessons: &[Lesson],
  directory: &impl StudentLookup,
  day: NaiveDate,
) -> Vec<ScheduleEntry> {
  let mut entries: Vec<ScheduleEntry> = lessons
    .iter()
    .filter(|l| l.starts_at.date() == day)
    .map(|l| ScheduleEntry {
      lesson:       l.clone(),
      student_name: directory
        .display_name(&l.student_id)
        .map(str::to_owned)
        .unwrap_or_else(|| UNKNOWN_STUDENT.to_owned()),
    })
    .collect();

  entries.sort_by_key(|e| e.lesson.starts_at);
  entries
}

/// Completion stats over one day's entries.
pub fn day_summary(entries: &[ScheduleEntry]) -> DaySummary {
  let total = entries.len();
  let completed = entries
    .iter()
    .filter(|e| e.lesson.status == LessonStatus::Done)
    .count();
  let completion_pct = if total == 0 {
    0
  } else {
    ((completed * 100 + total / 2) / total) as u32
  };

  DaySummary { total, completed, completion_pct }
}
