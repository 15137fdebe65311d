//! Lesson types — the unit records of the schedule subsystem.
//!
//! A lesson is created once and then mutated only through the repository's
//! status and attendance operations. There is no delete operation.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Enums ───────────────────────────────────────────────────────────────────

/// How `rate` is interpreted when charging for a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateType {
  /// `rate` is the price of one hour; the charge scales with duration.
  Hourly,
  /// `rate` is the price of the whole lesson regardless of duration.
  Fixed,
}

/// The completion lifecycle state of a lesson.
///
/// `toggle_done` moves between `Scheduled` and `Done` in both directions.
/// `Canceled` is valid but only reachable through a direct `set_status`;
/// no toggle leads into it.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LessonStatus {
  #[default]
  Scheduled,
  Done,
  Canceled,
}

/// Whether the student was present, independent of [`LessonStatus`].
/// Transitions among the three values are unrestricted.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Attendance {
  #[default]
  Show,
  Late,
  Absent,
}

impl LessonStatus {
  /// The lowercase token used on the wire and in displays.
  /// Must match the `rename_all = "lowercase"` serde tags above.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Scheduled => "scheduled",
      Self::Done => "done",
      Self::Canceled => "canceled",
    }
  }
}

impl Attendance {
  /// The lowercase token used on the wire and in displays.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Show => "show",
      Self::Late => "late",
      Self::Absent => "absent",
    }
  }
}

// ─── Lesson ──────────────────────────────────────────────────────────────────

/// A scheduled tutoring session with one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
  pub lesson_id:    Uuid,
  /// Directory id of the student. Not validated against the directory at
  /// write time — a lesson may outlive or precede its student record.
  pub student_id:   String,
  pub subject:      String,
  /// Wall-clock start, timezone-naive. Treated as a precise instant.
  pub starts_at:    NaiveDateTime,
  pub duration_min: u32,
  pub rate_type:    RateType,
  /// Whole currency units; meaning depends on `rate_type`.
  pub rate:         u32,
  #[serde(default)]
  pub status:       LessonStatus,
  #[serde(default)]
  pub attendance:   Attendance,
  pub memo:         Option<String>,
  /// Repository-assigned; never changes after creation. Used only for
  /// audit and sort tie-breaking.
  pub created_at:   DateTime<Utc>,
}

impl Lesson {
  /// The billable amount. Integer arithmetic; hourly charges truncate.
  pub fn charge(&self) -> u64 {
    match self.rate_type {
      RateType::Fixed => u64::from(self.rate),
      RateType::Hourly => {
        u64::from(self.rate) * u64::from(self.duration_min) / 60
      }
    }
  }
}

// ─── NewLesson ───────────────────────────────────────────────────────────────

/// Input to [`add`](crate::repository::LessonRepository::add).
/// `lesson_id` and `created_at` are always assigned by the repository.
///
/// Fields are taken as-is: the repository does not reject empty subjects,
/// zero durations, or malformed dates. Callers validate before building one.
#[derive(Debug, Clone)]
pub struct NewLesson {
  pub student_id:   String,
  pub subject:      String,
  pub starts_at:    NaiveDateTime,
  pub duration_min: u32,
  pub rate_type:    RateType,
  pub rate:         u32,
  /// Overrides the `Scheduled` default when set.
  pub status:       Option<LessonStatus>,
  pub memo:         Option<String>,
}
