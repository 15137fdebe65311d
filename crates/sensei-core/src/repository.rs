//! [`LessonRepository`] — the authoritative local set of lessons.
//!
//! The repository owns the collection, applies the status/attendance state
//! machine, and writes the full collection through a [`BlobStore`] after
//! every mutation. Mutations return as soon as the in-memory update is
//! applied; a dedicated writer task applies the snapshots to the store
//! strictly in mutation order, logging failures instead of surfacing them.

use chrono::Utc;
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

use crate::{
  Error, Result,
  lesson::{Attendance, Lesson, LessonStatus, NewLesson},
  store::BlobStore,
};

/// Fixed store name the lesson collection is persisted under.
pub const STORE_NAME: &str = "lessons";

enum WriterMsg {
  Write(String),
  Flush(oneshot::Sender<()>),
}

// ─── Repository ──────────────────────────────────────────────────────────────

/// The authoritative local lesson collection.
///
/// Constructed once at process start via [`LessonRepository::restore`] and
/// passed by reference to consumers; there is no ambient global instance.
pub struct LessonRepository {
  lessons: Vec<Lesson>,
  writer:  mpsc::UnboundedSender<WriterMsg>,
}

impl LessonRepository {
  /// Restore the collection from `store` and spawn the writer task that
  /// handles all subsequent write-through.
  ///
  /// A missing blob yields an empty repository. A blob that no longer
  /// parses is an error — this is the one persistence failure that is
  /// surfaced, since it happens at startup rather than on a mutation.
  pub async fn restore<B>(store: B) -> Result<Self>
  where
    B: BlobStore + 'static,
  {
    let blob = store
      .get(STORE_NAME)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;

    let lessons: Vec<Lesson> = match blob {
      Some(body) => serde_json::from_str(&body)?,
      None => Vec::new(),
    };

    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(run_writer(store, rx));

    Ok(Self { lessons, writer: tx })
  }

  // ── Mutations ─────────────────────────────────────────────────────────────

  /// Insert a new lesson at the head of the collection and return its id.
  ///
  /// `status` defaults to `Scheduled` and `attendance` to `Show` when the
  /// input does not supply them. No validation happens here; see
  /// [`NewLesson`].
  pub fn add(&mut self, input: NewLesson) -> Uuid {
    let lesson = Lesson {
      lesson_id:    Uuid::new_v4(),
      student_id:   input.student_id,
      subject:      input.subject,
      starts_at:    input.starts_at,
      duration_min: input.duration_min,
      rate_type:    input.rate_type,
      rate:         input.rate,
      status:       input.status.unwrap_or_default(),
      attendance:   Attendance::default(),
      memo:         input.memo,
      created_at:   Utc::now(),
    };

    let id = lesson.lesson_id;
    self.lessons.insert(0, lesson);
    self.persist();
    id
  }

  /// Replace the status of the lesson with `id`.
  ///
  /// An unknown id is a silent no-op: the collection is left untouched and
  /// no error is raised.
  pub fn set_status(&mut self, id: Uuid, status: LessonStatus) {
    self.mutate(id, |l| l.status = status);
  }

  /// Flip completion: a `Done` lesson goes back to `Scheduled`, anything
  /// else becomes `Done`. Same unknown-id semantics as
  /// [`set_status`](Self::set_status).
  pub fn toggle_done(&mut self, id: Uuid) {
    self.mutate(id, |l| {
      l.status = if l.status == LessonStatus::Done {
        LessonStatus::Scheduled
      } else {
        LessonStatus::Done
      };
    });
  }

  /// Replace the attendance of the lesson with `id`. Independent of status.
  pub fn set_attendance(&mut self, id: Uuid, attendance: Attendance) {
    self.mutate(id, |l| l.attendance = attendance);
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// The full collection, in insertion order (newest first). Callers that
  /// need chronological order must sort.
  pub fn lessons(&self) -> &[Lesson] { &self.lessons }

  /// Look up a single lesson by id.
  pub fn get(&self, id: Uuid) -> Option<&Lesson> {
    self.lessons.iter().find(|l| l.lesson_id == id)
  }

  // ── Durability ────────────────────────────────────────────────────────────

  /// Wait until every snapshot enqueued so far has been written (or had its
  /// failure logged). Mutations never wait on this; a short-lived process
  /// calls it once before exit.
  pub async fn flush(&self) {
    let (tx, rx) = oneshot::channel();
    if self.writer.send(WriterMsg::Flush(tx)).is_ok() {
      let _ = rx.await;
    }
  }

  fn mutate(&mut self, id: Uuid, apply: impl FnOnce(&mut Lesson)) {
    match self.lessons.iter_mut().find(|l| l.lesson_id == id) {
      Some(lesson) => {
        apply(lesson);
        self.persist();
      }
      None => tracing::debug!(%id, "mutation for unknown lesson id ignored"),
    }
  }

  /// Snapshot the collection and hand it to the writer task. Persistence
  /// never panics or fails a mutation.
  fn persist(&self) {
    match serde_json::to_string(&self.lessons) {
      Ok(body) => {
        // Send only fails once the writer is gone, i.e. at shutdown.
        let _ = self.writer.send(WriterMsg::Write(body));
      }
      Err(error) => {
        tracing::warn!(%error, "failed to serialize lesson snapshot");
      }
    }
  }
}

/// Applies snapshots in the order they were sent. Failed writes are logged
/// and dropped; no retry.
async fn run_writer<B: BlobStore>(
  store: B,
  mut rx: mpsc::UnboundedReceiver<WriterMsg>,
) {
  while let Some(msg) = rx.recv().await {
    match msg {
      WriterMsg::Write(body) => {
        if let Err(error) = store.put(STORE_NAME, body).await {
          tracing::warn!(%error, "lesson snapshot write failed");
        }
      }
      WriterMsg::Flush(ack) => {
        let _ = ack.send(());
      }
    }
  }
}
