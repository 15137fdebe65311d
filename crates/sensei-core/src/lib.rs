//! Core types and component definitions for the Sensei lesson book.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::BlobStore`]; the directory client
//! lives in `sensei-directory`; both depend on this crate, never the other
//! way around.

pub mod error;
pub mod lesson;
pub mod repository;
pub mod schedule;
pub mod store;
pub mod student;

pub use error::{Error, Result};
