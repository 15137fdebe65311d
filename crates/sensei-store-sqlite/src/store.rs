//! [`SqliteBlobStore`] — the SQLite implementation of [`BlobStore`].

use std::{future::Future, path::Path};

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use sensei_core::store::BlobStore;

use crate::{Error, Result, schema::SCHEMA};

/// A blob store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteBlobStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteBlobStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

impl BlobStore for SqliteBlobStore {
  type Error = Error;

  fn get<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Error>> + Send + 'a {
    async move {
      let name = name.to_owned();
      let body: Option<String> = self
        .conn
        .call(move |conn| {
          Ok(
            conn
              .query_row(
                "SELECT body FROM blobs WHERE name = ?1",
                rusqlite::params![name],
                |row| row.get(0),
              )
              .optional()?,
          )
        })
        .await?;
      Ok(body)
    }
  }

  fn put<'a>(
    &'a self,
    name: &'a str,
    body: String,
  ) -> impl Future<Output = Result<(), Error>> + Send + 'a {
    async move {
      let name = name.to_owned();
      let at_str = Utc::now().to_rfc3339();
      self
        .conn
        .call(move |conn| {
          conn.execute(
            "INSERT INTO blobs (name, body, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(name) DO UPDATE
               SET body = excluded.body, updated_at = excluded.updated_at",
            rusqlite::params![name, body, at_str],
          )?;
          Ok(())
        })
        .await?;
      Ok(())
    }
  }
}
