//! Error type for `sensei-directory`.
//!
//! A failed directory call is the only error channel that crosses component
//! boundaries in this system; it is always awaitable and catchable by the
//! caller. No retries happen at this layer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Non-2xx response. The message is the response body text, or an
  /// `HTTP <status>` fallback when the body was empty.
  #[error("{message}")]
  Http { status: u16, message: String },

  #[error("transport error: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("unparseable directory timestamp: {0:?}")]
  Timestamp(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
