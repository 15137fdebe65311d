//! Wire representation of directory records and the field-mapping contract.
//!
//! The wire format is snake_case JSON with nullable optionals and timestamp
//! strings; locally `created_at` is an instant. The translation is exact
//! and symmetric: every wire field has exactly one local counterpart.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use sensei_core::student::{NewStudent, Student, StudentPatch};

use crate::{Error, Result};

// ─── DTO ─────────────────────────────────────────────────────────────────────

/// A student record exactly as the directory sends it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentDto {
  pub id:             String,
  pub name:           String,
  pub is_adult:       bool,
  #[serde(default)]
  pub birthdate:      Option<String>,
  #[serde(default)]
  pub grade:          Option<String>,
  #[serde(default)]
  pub guardian_name:  Option<String>,
  #[serde(default)]
  pub guardian_phone: Option<String>,
  #[serde(default)]
  pub email:          Option<String>,
  #[serde(default)]
  pub note:           Option<String>,
  pub created_at:     String,
}

impl StudentDto {
  /// Map into the local representation. Fails only when `created_at` is
  /// not a parseable timestamp.
  pub fn into_student(self) -> Result<Student> {
    let created_at = parse_timestamp(&self.created_at)?;
    Ok(Student {
      id:             self.id,
      name:           self.name,
      is_adult:       self.is_adult,
      birthdate:      self.birthdate,
      grade:          self.grade,
      guardian_name:  self.guardian_name,
      guardian_phone: self.guardian_phone,
      email:          self.email,
      note:           self.note,
      created_at,
    })
  }
}

/// The directory emits both offset timestamps and naive ones (treated as
/// UTC); accept either.
fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Ok(dt.with_timezone(&Utc));
  }
  s.parse::<NaiveDateTime>()
    .map(|naive| naive.and_utc())
    .map_err(|_| Error::Timestamp(s.to_owned()))
}

// ─── Outbound bodies ─────────────────────────────────────────────────────────

/// Request body for `POST /students`.
///
/// Unset optionals are omitted, not sent as null. Guardian contact fields
/// are sent only for minors; an adult record never carries them.
pub fn create_body(input: &NewStudent) -> Value {
  let mut body = Map::new();
  body.insert("name".to_owned(), json!(input.name));
  body.insert("is_adult".to_owned(), json!(input.is_adult));
  insert_opt(&mut body, "birthdate", &input.birthdate);
  insert_opt(&mut body, "grade", &input.grade);
  if !input.is_adult {
    insert_opt(&mut body, "guardian_name", &input.guardian_name);
    insert_opt(&mut body, "guardian_phone", &input.guardian_phone);
  }
  insert_opt(&mut body, "email", &input.email);
  insert_opt(&mut body, "note", &input.note);
  Value::Object(body)
}

/// Request body for `PATCH /students/{id}` — only the fields being changed.
///
/// Guardian fields are suppressed when the patch itself switches the
/// student to adult.
pub fn update_body(patch: &StudentPatch) -> Value {
  let mut body = Map::new();
  insert_opt(&mut body, "name", &patch.name);
  if let Some(is_adult) = patch.is_adult {
    body.insert("is_adult".to_owned(), json!(is_adult));
  }
  insert_opt(&mut body, "birthdate", &patch.birthdate);
  insert_opt(&mut body, "grade", &patch.grade);
  if patch.is_adult != Some(true) {
    insert_opt(&mut body, "guardian_name", &patch.guardian_name);
    insert_opt(&mut body, "guardian_phone", &patch.guardian_phone);
  }
  insert_opt(&mut body, "email", &patch.email);
  insert_opt(&mut body, "note", &patch.note);
  Value::Object(body)
}

fn insert_opt(body: &mut Map<String, Value>, key: &str, value: &Option<String>) {
  if let Some(v) = value {
    body.insert(key.to_owned(), json!(v));
  }
}
