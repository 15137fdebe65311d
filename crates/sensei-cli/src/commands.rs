//! Subcommand handlers.
//!
//! Repositories are constructed once here and passed down by reference —
//! there are no ambient globals. The lesson book is flushed before exit so
//! a short-lived process keeps its own writes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use sensei_core::{
  lesson::NewLesson,
  repository::LessonRepository,
  schedule::{day_schedule, day_summary},
  student::{NewStudent, Student, StudentPatch},
};
use sensei_directory::{DirectoryConfig, HttpDirectory, StudentDirectory};
use sensei_store_sqlite::SqliteBlobStore;

use crate::{Command, LessonsCmd, StudentsCmd, input};

pub async fn run(
  command: Command,
  data_path: PathBuf,
  directory_url: String,
) -> Result<()> {
  match command {
    Command::Students(cmd) => students(cmd, directory_url).await,
    Command::Lessons(cmd) => lessons(cmd, &data_path).await,
    Command::Schedule { date } => schedule(date, &data_path, directory_url).await,
  }
}

async fn open_book(data_path: &Path) -> Result<LessonRepository> {
  let store = SqliteBlobStore::open(data_path)
    .await
    .with_context(|| format!("opening lesson store at {}", data_path.display()))?;
  LessonRepository::restore(store)
    .await
    .context("restoring lesson book")
}

fn open_directory(url: String) -> Result<StudentDirectory<HttpDirectory>> {
  let api = HttpDirectory::new(DirectoryConfig { base_url: url })
    .context("building directory client")?;
  Ok(StudentDirectory::new(api))
}

// ─── students ─────────────────────────────────────────────────────────────────

async fn students(cmd: StudentsCmd, directory_url: String) -> Result<()> {
  let mut directory = open_directory(directory_url)?;

  match cmd {
    StudentsCmd::List => {
      directory.load_from_server().await?;
      for student in directory.students() {
        print_student(student);
      }
    }

    StudentsCmd::Show { id } => {
      let student = directory.fetch_from_server(&id).await?;
      print_student(&student);
    }

    StudentsCmd::Add {
      name,
      adult,
      birthdate,
      grade,
      guardian_name,
      guardian_phone,
      email,
      note,
    } => {
      let input = NewStudent {
        name,
        is_adult: adult,
        birthdate,
        grade,
        guardian_name,
        guardian_phone,
        email,
        note,
      };
      input::check_guardian(&input)?;
      let id = directory.create_on_server(&input).await?;
      println!("{id}");
    }

    StudentsCmd::Edit {
      id,
      name,
      adult,
      birthdate,
      grade,
      guardian_name,
      guardian_phone,
      email,
      note,
    } => {
      let patch = StudentPatch {
        name,
        is_adult: adult,
        birthdate,
        grade,
        guardian_name,
        guardian_phone,
        email,
        note,
      };
      directory.update_on_server(&id, &patch).await?;
      println!("updated {id}");
    }

    StudentsCmd::Rm { id } => {
      directory.delete_on_server(&id).await?;
      println!("deleted {id}");
    }
  }

  Ok(())
}

fn print_student(student: &Student) {
  let grade = student.grade.as_deref().unwrap_or("-");
  let kind = if student.is_adult { "adult" } else { "minor" };
  println!("{}  {}  {kind}  grade {grade}", student.id, student.name);
}

// ─── lessons ──────────────────────────────────────────────────────────────────

async fn lessons(cmd: LessonsCmd, data_path: &Path) -> Result<()> {
  let mut book = open_book(data_path).await?;

  match cmd {
    LessonsCmd::Add {
      student,
      subject,
      date,
      time,
      duration,
      rate_type,
      rate,
      memo,
    } => {
      let input = NewLesson {
        student_id:   student,
        subject:      input::subject(&subject)?,
        starts_at:    input::parse_starts_at(&date, &time)?,
        duration_min: input::duration(duration)?,
        rate_type:    input::parse_rate_type(&rate_type)?,
        rate,
        status:       None,
        memo:         memo.filter(|m| !m.trim().is_empty()),
      };
      let id = book.add(input);
      println!("{id}");
    }

    LessonsCmd::Done { id } => {
      book.toggle_done(id);
      match book.get(id) {
        Some(lesson) => println!("{id} is now {}", lesson.status.as_str()),
        None => println!("no lesson {id}"),
      }
    }

    LessonsCmd::Status { id, status } => {
      book.set_status(id, input::parse_status(&status)?);
    }

    LessonsCmd::Attendance { id, attendance } => {
      book.set_attendance(id, input::parse_attendance(&attendance)?);
    }

    LessonsCmd::List => {
      for lesson in book.lessons() {
        println!(
          "{}  {}  {}  {}min  {}/{}",
          lesson.lesson_id,
          lesson.starts_at.format("%Y-%m-%d %H:%M"),
          lesson.subject,
          lesson.duration_min,
          lesson.status.as_str(),
          lesson.attendance.as_str(),
        );
      }
    }
  }

  book.flush().await;
  Ok(())
}

// ─── schedule ─────────────────────────────────────────────────────────────────

async fn schedule(
  date: Option<String>,
  data_path: &Path,
  directory_url: String,
) -> Result<()> {
  let day = match date {
    Some(s) => input::parse_day(&s)?,
    None => Local::now().date_naive(),
  };

  let book = open_book(data_path).await?;
  let mut directory = open_directory(directory_url)?;

  // The view degrades to placeholder names when the directory is down;
  // lessons themselves are local and always available.
  if let Err(error) = directory.load_from_server().await {
    tracing::warn!(%error, "directory unavailable, showing lessons without student names");
  }

  let entries = day_schedule(book.lessons(), &directory, day);
  let summary = day_summary(&entries);

  println!("{day}");
  for entry in &entries {
    let lesson = &entry.lesson;
    println!(
      "  {}  {:<12}  {:<16}  {}/{}  {}",
      lesson.starts_at.format("%H:%M"),
      lesson.subject,
      entry.student_name,
      lesson.status.as_str(),
      lesson.attendance.as_str(),
      lesson.charge(),
    );
  }
  println!(
    "{} lessons, {} done ({}%)",
    summary.total, summary.completed, summary.completion_pct
  );

  Ok(())
}
