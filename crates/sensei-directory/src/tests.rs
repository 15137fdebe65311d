//! Tests for the student-directory cache against a scriptable stub
//! transport, plus the wire-mapping contract.

use std::{
  future::Future,
  sync::{
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
  },
};

use sensei_core::student::{NewStudent, StudentPatch};

use crate::{
  Error, Result, StudentDirectory,
  api::DirectoryApi,
  client::status_message,
  wire::{StudentDto, create_body, update_body},
};

// ─── Stub transport ──────────────────────────────────────────────────────────

#[derive(Default)]
struct StubApi {
  students: Mutex<Vec<StudentDto>>,
  next_id:  AtomicUsize,
  fail:     AtomicBool,
}

impl StubApi {
  fn with_students(dtos: Vec<StudentDto>) -> Self {
    Self { students: Mutex::new(dtos), ..Self::default() }
  }

  fn fail_next_calls(&self) {
    self.fail.store(true, Ordering::SeqCst);
  }

  fn check_fail(&self) -> Result<()> {
    if self.fail.load(Ordering::SeqCst) {
      Err(Error::Http { status: 500, message: "server exploded".into() })
    } else {
      Ok(())
    }
  }
}

fn dto(id: &str, name: &str) -> StudentDto {
  StudentDto {
    id:             id.into(),
    name:           name.into(),
    is_adult:       true,
    birthdate:      None,
    grade:          None,
    guardian_name:  None,
    guardian_phone: None,
    email:          None,
    note:           None,
    created_at:     "2025-01-15T09:30:00Z".into(),
  }
}

impl DirectoryApi for StubApi {
  fn list(&self) -> impl Future<Output = Result<Vec<StudentDto>>> + Send + '_ {
    async move {
      self.check_fail()?;
      Ok(self.students.lock().unwrap().clone())
    }
  }

  fn fetch<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<StudentDto>> + Send + 'a {
    async move {
      self.check_fail()?;
      self
        .students
        .lock()
        .unwrap()
        .iter()
        .find(|d| d.id == id)
        .cloned()
        .ok_or_else(|| Error::Http {
          status:  404,
          message: "student not found".into(),
        })
    }
  }

  fn create<'a>(
    &'a self,
    input: &'a NewStudent,
  ) -> impl Future<Output = Result<StudentDto>> + Send + 'a {
    async move {
      self.check_fail()?;
      let n = self.next_id.fetch_add(1, Ordering::SeqCst);
      let mut d = dto(&format!("srv-{n}"), &input.name);
      d.is_adult = input.is_adult;
      d.guardian_name = input.guardian_name.clone();
      d.guardian_phone = input.guardian_phone.clone();
      self.students.lock().unwrap().push(d.clone());
      Ok(d)
    }
  }

  fn update<'a>(
    &'a self,
    id: &'a str,
    patch: &'a StudentPatch,
  ) -> impl Future<Output = Result<StudentDto>> + Send + 'a {
    async move {
      self.check_fail()?;
      let mut students = self.students.lock().unwrap();
      let d = students
        .iter_mut()
        .find(|d| d.id == id)
        .ok_or_else(|| Error::Http {
          status:  404,
          message: "student not found".into(),
        })?;
      if let Some(name) = &patch.name {
        d.name = name.clone();
      }
      if let Some(grade) = &patch.grade {
        d.grade = Some(grade.clone());
      }
      Ok(d.clone())
    }
  }

  fn delete<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<()>> + Send + 'a {
    async move {
      self.check_fail()?;
      self.students.lock().unwrap().retain(|d| d.id != id);
      Ok(())
    }
  }
}

// ─── Cache semantics ─────────────────────────────────────────────────────────

#[tokio::test]
async fn load_replaces_the_whole_mirror() {
  let api = StubApi::with_students(vec![dto("s1", "Alice"), dto("s2", "Bob")]);
  let mut dir = StudentDirectory::new(api);

  dir.load_from_server().await.unwrap();
  assert_eq!(dir.students().len(), 2);
  assert_eq!(dir.get("s1").unwrap().name, "Alice");
}

#[tokio::test]
async fn failed_load_leaves_mirror_unchanged() {
  let api = StubApi::with_students(vec![dto("s1", "Alice")]);
  let mut dir = StudentDirectory::new(api);
  dir.load_from_server().await.unwrap();

  dir.api().fail_next_calls();
  let err = dir.load_from_server().await.unwrap_err();
  assert!(matches!(err, Error::Http { status: 500, .. }));
  assert_eq!(dir.students().len(), 1);
  assert_eq!(dir.get("s1").unwrap().name, "Alice");
}

#[tokio::test]
async fn create_prepends_confirmed_record_and_returns_id() {
  let api = StubApi::with_students(vec![dto("s1", "Alice")]);
  let mut dir = StudentDirectory::new(api);
  dir.load_from_server().await.unwrap();

  let id = dir
    .create_on_server(&new_student("Bob", true))
    .await
    .unwrap();

  assert_eq!(id, "srv-0");
  assert_eq!(dir.students()[0].id, id);
  assert_eq!(dir.students().len(), 2);
}

#[tokio::test]
async fn failed_create_is_atomic() {
  let api = StubApi::with_students(vec![dto("s1", "Alice")]);
  let mut dir = StudentDirectory::new(api);
  dir.load_from_server().await.unwrap();
  let before = dir.students().to_vec();

  dir.api().fail_next_calls();
  let result = dir.create_on_server(&new_student("Bob", true)).await;

  assert!(result.is_err());
  assert_eq!(dir.students(), &before[..]);
}

#[tokio::test]
async fn update_replaces_the_matching_record() {
  let api = StubApi::with_students(vec![dto("s1", "Alice"), dto("s2", "Bob")]);
  let mut dir = StudentDirectory::new(api);
  dir.load_from_server().await.unwrap();

  let patch = StudentPatch { name: Some("Alicia".into()), ..Default::default() };
  dir.update_on_server("s1", &patch).await.unwrap();

  assert_eq!(dir.get("s1").unwrap().name, "Alicia");
  assert_eq!(dir.get("s2").unwrap().name, "Bob");
}

#[tokio::test]
async fn failed_update_leaves_mirror_unchanged() {
  let api = StubApi::with_students(vec![dto("s1", "Alice")]);
  let mut dir = StudentDirectory::new(api);
  dir.load_from_server().await.unwrap();

  dir.api().fail_next_calls();
  let patch = StudentPatch { name: Some("Alicia".into()), ..Default::default() };
  assert!(dir.update_on_server("s1", &patch).await.is_err());
  assert_eq!(dir.get("s1").unwrap().name, "Alice");
}

#[tokio::test]
async fn delete_removes_the_record() {
  let api = StubApi::with_students(vec![dto("s1", "Alice"), dto("s2", "Bob")]);
  let mut dir = StudentDirectory::new(api);
  dir.load_from_server().await.unwrap();

  dir.delete_on_server("s1").await.unwrap();
  assert!(dir.get("s1").is_none());
  assert_eq!(dir.students().len(), 1);
}

#[tokio::test]
async fn fetch_from_server_bypasses_the_mirror() {
  let api = StubApi::with_students(vec![dto("s1", "Alice")]);
  let dir = StudentDirectory::new(api);

  // Mirror never loaded; the fetch still resolves.
  let student = dir.fetch_from_server("s1").await.unwrap();
  assert_eq!(student.name, "Alice");
  assert!(dir.students().is_empty());
}

fn new_student(name: &str, is_adult: bool) -> NewStudent {
  NewStudent {
    name: name.into(),
    is_adult,
    birthdate: None,
    grade: None,
    guardian_name: None,
    guardian_phone: None,
    email: None,
    note: None,
  }
}

// ─── Wire mapping ────────────────────────────────────────────────────────────

#[test]
fn dto_maps_nullable_fields_to_none() {
  let student = dto("s1", "Alice").into_student().unwrap();
  assert!(student.birthdate.is_none());
  assert!(student.guardian_name.is_none());
  assert_eq!(student.created_at.to_rfc3339(), "2025-01-15T09:30:00+00:00");
}

#[test]
fn dto_accepts_naive_timestamps_as_utc() {
  let mut d = dto("s1", "Alice");
  d.created_at = "2025-01-15T09:30:00".into();
  let student = d.into_student().unwrap();
  assert_eq!(student.created_at.to_rfc3339(), "2025-01-15T09:30:00+00:00");
}

#[test]
fn dto_rejects_garbage_timestamps() {
  let mut d = dto("s1", "Alice");
  d.created_at = "yesterday".into();
  assert!(matches!(d.into_student(), Err(Error::Timestamp(_))));
}

#[test]
fn create_body_omits_guardian_fields_for_adults() {
  let mut input = new_student("Alice", true);
  input.guardian_name = Some("ignored".into());
  input.guardian_phone = Some("ignored".into());

  let body = create_body(&input);
  let obj = body.as_object().unwrap();
  assert!(!obj.contains_key("guardian_name"));
  assert!(!obj.contains_key("guardian_phone"));
  assert_eq!(obj["is_adult"], serde_json::json!(true));
}

#[test]
fn create_body_sends_guardian_fields_for_minors() {
  let mut input = new_student("Minji", false);
  input.guardian_name = Some("Mrs Kim".into());
  input.guardian_phone = Some("010-1234-5678".into());

  let body = create_body(&input);
  let obj = body.as_object().unwrap();
  assert_eq!(obj["guardian_name"], serde_json::json!("Mrs Kim"));
  assert_eq!(obj["guardian_phone"], serde_json::json!("010-1234-5678"));
}

#[test]
fn update_body_carries_only_set_fields() {
  let patch = StudentPatch { grade: Some("11".into()), ..Default::default() };
  let body = update_body(&patch);
  let obj = body.as_object().unwrap();

  assert_eq!(obj.len(), 1);
  assert_eq!(obj["grade"], serde_json::json!("11"));
}

#[test]
fn update_body_suppresses_guardians_when_switching_to_adult() {
  let patch = StudentPatch {
    is_adult:      Some(true),
    guardian_name: Some("stale".into()),
    ..Default::default()
  };
  let body = update_body(&patch);
  assert!(!body.as_object().unwrap().contains_key("guardian_name"));
}

// ─── Error message contract ──────────────────────────────────────────────────

#[test]
fn status_message_prefers_body_text() {
  assert_eq!(
    status_message(422, "name is required".into()),
    "name is required"
  );
}

#[test]
fn status_message_falls_back_to_http_status() {
  assert_eq!(status_message(404, String::new()), "HTTP 404");
}
