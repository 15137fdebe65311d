//! Error types for `sensei-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The blob store failed while restoring the lesson collection.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// The persisted lesson snapshot no longer parses. There is no
  /// versioning scheme; a schema change needs a manual compatibility shim.
  #[error("snapshot error: {0}")]
  Snapshot(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
