//! SQL schema for the blob store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One serialized document per store name; writes replace the whole body.
CREATE TABLE IF NOT EXISTS blobs (
    name       TEXT PRIMARY KEY,
    body       TEXT NOT NULL,
    updated_at TEXT NOT NULL    -- ISO 8601 UTC; informational only
);

PRAGMA user_version = 1;
";
