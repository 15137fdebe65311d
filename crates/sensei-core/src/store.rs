//! The `BlobStore` trait — durable storage for a single serialized document.
//!
//! The trait is implemented by storage backends (e.g. `sensei-store-sqlite`).
//! The lesson repository depends on this abstraction, not on any concrete
//! backend.

use std::future::Future;

/// Asynchronous get/put of one serialized document keyed by store name.
///
/// Writes always carry a whole document; there is no partial update. All
/// methods return `Send` futures so write-through can run on a background
/// task.
pub trait BlobStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the document stored under `name`. `None` if nothing has ever
  /// been written there.
  fn get<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  /// Durably replace the document stored under `name`.
  fn put<'a>(
    &'a self,
    name: &'a str,
    body: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
