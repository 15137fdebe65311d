//! [`StudentDirectory`] — the in-memory mirror of the remote student list.
//!
//! Every mutation is server-confirmed before the mirror changes: on failure
//! the error propagates and the local list is exactly as it was. The mirror
//! has no independent source of truth; a stale list is corrected only by
//! the next full [`load_from_server`](StudentDirectory::load_from_server).

use sensei_core::student::{NewStudent, Student, StudentLookup, StudentPatch};

use crate::{Result, api::DirectoryApi, wire::StudentDto};

/// In-memory mirror of the remote student list.
///
/// Constructed once at process start and passed by reference to consumers;
/// the schedule view only ever reads it through [`StudentLookup`].
pub struct StudentDirectory<A> {
  api:      A,
  students: Vec<Student>,
}

impl<A> StudentDirectory<A> {
  /// An empty mirror; populate it with
  /// [`load_from_server`](Self::load_from_server).
  pub fn new(api: A) -> Self {
    Self { api, students: Vec::new() }
  }

  /// The underlying transport.
  pub fn api(&self) -> &A { &self.api }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// The mirrored list, newest-created first (server order).
  pub fn students(&self) -> &[Student] { &self.students }

  /// Look up a single student by id.
  pub fn get(&self, id: &str) -> Option<&Student> {
    self.students.iter().find(|s| s.id == id)
  }
}

impl<A: DirectoryApi> StudentDirectory<A> {
  // ── Server-backed operations ──────────────────────────────────────────────

  /// Fetch the full remote list and replace the whole mirror with it.
  /// On failure the mirror keeps its previous contents — there is no
  /// partial overwrite.
  pub async fn load_from_server(&mut self) -> Result<()> {
    let dtos = self.api.list().await?;
    let students = dtos
      .into_iter()
      .map(StudentDto::into_student)
      .collect::<Result<Vec<_>>>()?;

    tracing::debug!(count = students.len(), "student directory loaded");
    self.students = students;
    Ok(())
  }

  /// Create on the server; prepend the server-confirmed record and return
  /// its id. No optimistic insert — a failed call leaves the mirror
  /// untouched.
  pub async fn create_on_server(&mut self, input: &NewStudent) -> Result<String> {
    let student = self.api.create(input).await?.into_student()?;
    let id = student.id.clone();
    self.students.insert(0, student);
    Ok(id)
  }

  /// Send a partial update; replace the matching local record with the
  /// full record the server returns. A record missing locally (stale
  /// mirror) is left for the next full reload.
  pub async fn update_on_server(
    &mut self,
    id: &str,
    patch: &StudentPatch,
  ) -> Result<()> {
    let updated = self.api.update(id, patch).await?.into_student()?;
    if let Some(slot) = self.students.iter_mut().find(|s| s.id == id) {
      *slot = updated;
    }
    Ok(())
  }

  /// Delete on the server, then drop the record from the mirror.
  pub async fn delete_on_server(&mut self, id: &str) -> Result<()> {
    self.api.delete(id).await?;
    self.students.retain(|s| s.id != id);
    Ok(())
  }

  /// Fetch one record straight from the server, bypassing the mirror.
  pub async fn fetch_from_server(&self, id: &str) -> Result<Student> {
    self.api.fetch(id).await?.into_student()
  }
}

impl<A> StudentLookup for StudentDirectory<A> {
  fn display_name(&self, student_id: &str) -> Option<&str> {
    self.get(student_id).map(|s| s.name.as_str())
  }
}
