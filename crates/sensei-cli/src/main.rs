//! `sensei` — command-line front end for the tutoring book.
//!
//! # Usage
//!
//! ```
//! sensei students list
//! sensei lessons add --student s1 --subject Math \
//!     --date 2025-11-06 --time 16:00 --duration 90 --rate 50000
//! sensei schedule 2025-11-06
//! ```

mod commands;
mod input;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "sensei", about = "Tutoring schedule and student book")]
struct Args {
  /// Path to a TOML config file (data_path, directory_url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// SQLite file holding the local lesson book (default: sensei.db).
  #[arg(long, env = "SENSEI_DATA")]
  data: Option<PathBuf>,

  /// Base URL of the student directory service
  /// (default: http://127.0.0.1:8000).
  #[arg(long, env = "SENSEI_DIRECTORY_URL")]
  directory_url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Remote student directory.
  #[command(subcommand)]
  Students(StudentsCmd),

  /// The local lesson book.
  #[command(subcommand)]
  Lessons(LessonsCmd),

  /// Day view: every lesson on a calendar day, in start order.
  Schedule {
    /// Calendar day (YYYY-MM-DD); defaults to today.
    date: Option<String>,
  },
}

#[derive(Subcommand, Debug)]
pub enum StudentsCmd {
  /// Fetch the remote list and print it.
  List,

  /// Show one student, fetched straight from the server.
  Show { id: String },

  /// Create a student on the directory.
  Add {
    #[arg(long)]
    name: String,
    /// Adult student; guardian contact is neither required nor sent.
    #[arg(long)]
    adult: bool,
    #[arg(long)]
    birthdate: Option<String>,
    #[arg(long)]
    grade: Option<String>,
    #[arg(long)]
    guardian_name: Option<String>,
    #[arg(long)]
    guardian_phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    note: Option<String>,
  },

  /// Update fields on an existing student.
  Edit {
    id: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    adult: Option<bool>,
    #[arg(long)]
    birthdate: Option<String>,
    #[arg(long)]
    grade: Option<String>,
    #[arg(long)]
    guardian_name: Option<String>,
    #[arg(long)]
    guardian_phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    note: Option<String>,
  },

  /// Delete a student from the directory.
  Rm { id: String },
}

#[derive(Subcommand, Debug)]
pub enum LessonsCmd {
  /// Add a lesson to the local book and print its id.
  Add {
    /// Directory id of the student.
    #[arg(long)]
    student: String,
    #[arg(long)]
    subject: String,
    /// Lesson date (YYYY-MM-DD).
    #[arg(long)]
    date: String,
    /// Start time (HH:MM, 24h).
    #[arg(long)]
    time: String,
    /// Lesson length in minutes.
    #[arg(long, default_value_t = 60)]
    duration: u32,
    /// `hourly` or `fixed`.
    #[arg(long, default_value = "hourly")]
    rate_type: String,
    /// Whole currency units.
    #[arg(long, default_value_t = 50_000)]
    rate: u32,
    #[arg(long)]
    memo: Option<String>,
  },

  /// Toggle a lesson between done and scheduled.
  Done { id: Uuid },

  /// Set the lifecycle status directly (scheduled|done|canceled).
  Status { id: Uuid, status: String },

  /// Record attendance (show|late|absent).
  Attendance { id: Uuid, attendance: String },

  /// Print the whole book, newest first.
  List,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  data_path:     String,
  #[serde(default)]
  directory_url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let data_path = args
    .data
    .or_else(|| (!file_cfg.data_path.is_empty()).then(|| file_cfg.data_path.clone().into()))
    .unwrap_or_else(|| PathBuf::from("sensei.db"));

  let directory_url = args
    .directory_url
    .or_else(|| (!file_cfg.directory_url.is_empty()).then(|| file_cfg.directory_url.clone()))
    .unwrap_or_else(|| "http://127.0.0.1:8000".to_string());

  commands::run(args.command, data_path, directory_url).await
}

#[cfg(test)]
mod tests;
