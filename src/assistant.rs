//! Chat assistant turn logic.
//!
//! One turn: run extraction over the message, fold the signals into a
//! patch for today's record, write it through the store, and produce a
//! reply. Tasks are surfaced to the caller only; they are never written
//! into day records.

use chrono::NaiveDate;

use crate::extractor::{extract, ExtractionResult};
use crate::models::{DayPatch, DayRecord, WorkoutEntry, WorkoutStatus};
use crate::responder::{CannedResponder, Responder};
use crate::store::DayStore;

/// ---------------------------------------------------------------------------
/// Types
/// ---------------------------------------------------------------------------

/// Everything one chat turn produced.
pub struct ChatTurn {
  pub reply: String,
  /// Today's record after the turn's write (or the current one when the
  /// message was empty)
  pub record: DayRecord,
  pub extraction: ExtractionResult,
}

pub struct Assistant<'a> {
  store: &'a DayStore,
  responder: Box<dyn Responder>,
}

/// ---------------------------------------------------------------------------
/// Assistant
/// ---------------------------------------------------------------------------

impl<'a> Assistant<'a> {
  pub fn new(store: &'a DayStore) -> Self {
    Self {
      store,
      responder: Box::new(CannedResponder),
    }
  }

  pub fn with_responder(store: &'a DayStore, responder: Box<dyn Responder>) -> Self {
    Self { store, responder }
  }

  /// Handle one user message addressed to `today`.
  pub async fn handle_message(&self, today: NaiveDate, message: &str) -> ChatTurn {
    let message = message.trim();
    let extraction = extract(message);

    let record = if message.is_empty() {
      // Nothing to log, just look at the day
      self.store.load_day(today).await.unwrap_or_default()
    } else {
      let patch = self.build_patch(today, &extraction, message).await;
      self.store.upsert(today, patch).await
    };

    let reply = self.responder.reply(message, &extraction);

    ChatTurn {
      reply,
      record,
      extraction,
    }
  }

  /// Fold extraction signals into a patch. Reads today's record first so
  /// notes accumulate and a planned workout keeps its time.
  async fn build_patch(
    &self,
    today: NaiveDate,
    extraction: &ExtractionResult,
    message: &str,
  ) -> DayPatch {
    let current = self.store.load_day(today).await.unwrap_or_default();

    let workout = if extraction.habit_signals.workout_intended {
      let time = current
        .workout
        .as_ref()
        .map(|w| w.time.clone())
        .unwrap_or_else(|| current.effective_goals().workout_goal);
      Some(WorkoutEntry {
        time,
        status: WorkoutStatus::Intended,
      })
    } else {
      None
    };

    DayPatch {
      wake_time: extraction.habit_signals.wake_time.clone(),
      workout,
      // The extractor only emits low or high, so a quiet message leaves
      // the stored mood untouched
      mood: extraction.habit_signals.mood,
      notes: Some(append_note(current.notes.as_deref(), message)),
      ..Default::default()
    }
  }
}

fn append_note(existing: Option<&str>, message: &str) -> String {
  match existing {
    Some(prior) if !prior.trim().is_empty() => format!("{}\n{}", prior, message),
    _ => message.to_string(),
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::Mood;
  use crate::responder::TemplateResponder;
  use crate::test_utils::{august, mood_patch, workout_patch};
  use tempfile::TempDir;

  fn today() -> NaiveDate {
    august(23)
  }

  fn assistant(store: &DayStore) -> Assistant<'_> {
    Assistant::with_responder(store, Box::new(TemplateResponder))
  }

  #[tokio::test]
  async fn test_wake_time_is_normalized_into_the_record() {
    let dir = TempDir::new().unwrap();
    let store = DayStore::local(dir.path());

    let turn = assistant(&store).handle_message(today(), "I woke up at 7:30 am").await;

    assert_eq!(turn.record.wake_time.as_deref(), Some("07:30"));
    assert!(!turn.reply.is_empty());

    // Durable, not just in the returned copy
    let stored = store.load_day(today()).await.unwrap();
    assert_eq!(stored.wake_time.as_deref(), Some("07:30"));
  }

  #[tokio::test]
  async fn test_workout_intention_defaults_to_goal_time() {
    let dir = TempDir::new().unwrap();
    let store = DayStore::local(dir.path());

    let turn = assistant(&store).handle_message(today(), "hitting the gym later").await;

    let workout = turn.record.workout.unwrap();
    assert_eq!(workout.status, WorkoutStatus::Intended);
    assert_eq!(workout.time, "18:00");
  }

  #[tokio::test]
  async fn test_workout_intention_keeps_planned_time() {
    let dir = TempDir::new().unwrap();
    let store = DayStore::local(dir.path());
    store
      .upsert(today(), workout_patch("17:00", WorkoutStatus::Pending))
      .await;

    let turn = assistant(&store).handle_message(today(), "gym tonight for sure").await;

    let workout = turn.record.workout.unwrap();
    assert_eq!(workout.time, "17:00");
    assert_eq!(workout.status, WorkoutStatus::Intended);
  }

  #[tokio::test]
  async fn test_quiet_message_leaves_stored_mood_alone() {
    let dir = TempDir::new().unwrap();
    let store = DayStore::local(dir.path());
    store.upsert(today(), mood_patch(Mood::High)).await;

    let turn = assistant(&store).handle_message(today(), "ate lunch at my desk").await;

    assert_eq!(turn.record.mood, Some(Mood::High));
  }

  #[tokio::test]
  async fn test_notes_accumulate_in_order() {
    let dir = TempDir::new().unwrap();
    let store = DayStore::local(dir.path());
    let assistant = assistant(&store);

    assistant.handle_message(today(), "first entry").await;
    let turn = assistant.handle_message(today(), "second entry").await;

    assert_eq!(turn.record.notes.as_deref(), Some("first entry\nsecond entry"));
  }

  #[tokio::test]
  async fn test_tasks_surface_in_turn_but_are_not_persisted() {
    let dir = TempDir::new().unwrap();
    let store = DayStore::local(dir.path());

    let turn = assistant(&store)
      .handle_message(today(), "need to finish the project report")
      .await;

    assert!(!turn.extraction.tasks.is_empty());
    assert!(turn.reply.contains("Tasks spotted:"));

    let stored = store.load_day(today()).await.unwrap();
    let json = serde_json::to_string(&stored).unwrap();
    assert!(!json.contains("tasks"));
  }

  #[tokio::test]
  async fn test_empty_message_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let store = DayStore::local(dir.path());

    let turn = assistant(&store).handle_message(today(), "   ").await;

    assert!(store.load_all().await.is_empty());
    assert_eq!(turn.record, DayRecord::default());
    assert_eq!(turn.reply, "Logged.");
  }
}
