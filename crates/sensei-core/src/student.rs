//! Student records mirrored from the remote directory.
//!
//! The directory service is the source of truth; a local [`Student`] only
//! ever holds what the last successful server operation returned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A student record as held locally.
///
/// A well-formed minor record carries guardian contact fields; that is
/// enforced at the input-validation boundary, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
  pub id:             String,
  pub name:           String,
  pub is_adult:       bool,
  pub birthdate:      Option<String>,
  pub grade:          Option<String>,
  pub guardian_name:  Option<String>,
  pub guardian_phone: Option<String>,
  pub email:          Option<String>,
  pub note:           Option<String>,
  /// Parsed from the wire timestamp string; held locally as an instant.
  pub created_at:     DateTime<Utc>,
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Input for creating a student on the remote directory.
#[derive(Debug, Clone)]
pub struct NewStudent {
  pub name:           String,
  pub is_adult:       bool,
  pub birthdate:      Option<String>,
  pub grade:          Option<String>,
  pub guardian_name:  Option<String>,
  pub guardian_phone: Option<String>,
  pub email:          Option<String>,
  pub note:           Option<String>,
}

/// Partial update for an existing student; `None` fields are not sent and
/// stay untouched on the server.
#[derive(Debug, Clone, Default)]
pub struct StudentPatch {
  pub name:           Option<String>,
  pub is_adult:       Option<bool>,
  pub birthdate:      Option<String>,
  pub grade:          Option<String>,
  pub guardian_name:  Option<String>,
  pub guardian_phone: Option<String>,
  pub email:          Option<String>,
  pub note:           Option<String>,
}

// ─── Lookup seam ─────────────────────────────────────────────────────────────

/// Read-only name resolution used by the schedule view builder.
///
/// Implemented by the directory cache; tests substitute a plain map.
pub trait StudentLookup {
  /// Display name for `student_id`, or `None` when the directory has no
  /// matching record.
  fn display_name(&self, student_id: &str) -> Option<&str>;
}

impl StudentLookup for std::collections::HashMap<String, String> {
  fn display_name(&self, student_id: &str) -> Option<&str> {
    self.get(student_id).map(String::as_str)
  }
}
