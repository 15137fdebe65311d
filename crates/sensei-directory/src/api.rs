//! The `DirectoryApi` trait — the remote student-directory protocol.
//!
//! Implemented by [`HttpDirectory`](crate::client::HttpDirectory). The
//! cache depends on this abstraction so it can be exercised against a stub
//! transport in tests.

use std::future::Future;

use sensei_core::student::{NewStudent, StudentPatch};

use crate::{Result, wire::StudentDto};

pub trait DirectoryApi: Send + Sync {
  /// `GET /students` — the full remote list.
  fn list(
    &self,
  ) -> impl Future<Output = Result<Vec<StudentDto>>> + Send + '_;

  /// `GET /students/{id}` — one record.
  fn fetch<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<StudentDto>> + Send + 'a;

  /// `POST /students` — returns the created, server-confirmed record.
  fn create<'a>(
    &'a self,
    input: &'a NewStudent,
  ) -> impl Future<Output = Result<StudentDto>> + Send + 'a;

  /// `PATCH /students/{id}` — returns the full updated record.
  fn update<'a>(
    &'a self,
    id: &'a str,
    patch: &'a StudentPatch,
  ) -> impl Future<Output = Result<StudentDto>> + Send + 'a;

  /// `DELETE /students/{id}` — no response body.
  fn delete<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<()>> + Send + 'a;
}
