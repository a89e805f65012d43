use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------
/// Goal Defaults
/// ---------------------------------------------------------------------------

const DEFAULT_WAKE_GOAL: &str = "07:00";
const DEFAULT_WORKOUT_GOAL: &str = "18:00";
const DEFAULT_LUNCH_TIME: &str = "12:30";
const DEFAULT_DINNER_TIME: &str = "19:30";

/// ---------------------------------------------------------------------------
/// Field Enums
/// ---------------------------------------------------------------------------

/// Mood bucket for a day. `Neutral` is the no-signal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
  Low,
  Neutral,
  High,
}

impl Mood {
  pub fn as_str(&self) -> &'static str {
    match self {
      Mood::Low => "low",
      Mood::Neutral => "neutral",
      Mood::High => "high",
    }
  }
}

/// Workout lifecycle for a day: planned, reported, or declared in chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutStatus {
  Pending,
  Done,
  Skipped,
  Intended,
}

impl WorkoutStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      WorkoutStatus::Pending => "pending",
      WorkoutStatus::Done => "done",
      WorkoutStatus::Skipped => "skipped",
      WorkoutStatus::Intended => "intended",
    }
  }
}

/// ---------------------------------------------------------------------------
/// Record Components
/// ---------------------------------------------------------------------------

/// A scheduled or reported workout. Times are 24-hour `HH:MM` strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutEntry {
  pub time: String,
  pub status: WorkoutStatus,
}

/// A meal slot (lunch or dinner) with an optional free-text description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct MealEntry {
  pub time: String,
  pub details: String,
}

/// Per-day target times. Absent goals fall back to the documented defaults
/// via [`DayRecord::effective_goals`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DayGoals {
  pub wake_goal: String,
  pub workout_goal: String,
  pub lunch_time: String,
  pub dinner_time: String,
}

impl Default for DayGoals {
  fn default() -> Self {
    Self {
      wake_goal: DEFAULT_WAKE_GOAL.to_string(),
      workout_goal: DEFAULT_WORKOUT_GOAL.to_string(),
      lunch_time: DEFAULT_LUNCH_TIME.to_string(),
      dinner_time: DEFAULT_DINNER_TIME.to_string(),
    }
  }
}

/// ---------------------------------------------------------------------------
/// DayRecord
/// ---------------------------------------------------------------------------

/// One life-log entry per calendar date. The date itself is the store key,
/// not a field. Serialized with camelCase keys to stay byte-compatible with
/// payloads written by earlier clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DayRecord {
  /// Wake time, normalized 24-hour `HH:MM`
  #[serde(skip_serializing_if = "Option::is_none")]
  pub wake_time: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub workout: Option<WorkoutEntry>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub lunch: Option<MealEntry>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub dinner: Option<MealEntry>,

  /// Free text, append-only by caller convention
  #[serde(skip_serializing_if = "Option::is_none")]
  pub notes: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub mood: Option<Mood>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub goals: Option<DayGoals>,
}

impl DayRecord {
  /// Goals with defaults substituted when the record carries none.
  pub fn effective_goals(&self) -> DayGoals {
    self.goals.clone().unwrap_or_default()
  }

  /// Shallow merge: fields present in `patch` overwrite, absent fields are
  /// preserved. Nested structs are replaced whole, not merged field-by-field.
  pub fn merge(&mut self, patch: DayPatch) {
    if let Some(wake_time) = patch.wake_time {
      self.wake_time = Some(wake_time);
    }
    if let Some(workout) = patch.workout {
      self.workout = Some(workout);
    }
    if let Some(lunch) = patch.lunch {
      self.lunch = Some(lunch);
    }
    if let Some(dinner) = patch.dinner {
      self.dinner = Some(dinner);
    }
    if let Some(notes) = patch.notes {
      self.notes = Some(notes);
    }
    if let Some(mood) = patch.mood {
      self.mood = Some(mood);
    }
    if let Some(goals) = patch.goals {
      self.goals = Some(goals);
    }
  }

  /// Merge into a copy, leaving `self` untouched.
  pub fn merged(&self, patch: DayPatch) -> DayRecord {
    let mut merged = self.clone();
    merged.merge(patch);
    merged
  }

  /// The record synthesized for the current date when the store is empty,
  /// so a first run has something to show.
  pub fn placeholder() -> DayRecord {
    let goals = DayGoals::default();
    DayRecord {
      wake_time: None,
      workout: Some(WorkoutEntry {
        time: goals.workout_goal.clone(),
        status: WorkoutStatus::Pending,
      }),
      lunch: None,
      dinner: None,
      notes: Some("Welcome to your life log. Tell the assistant about your day to fill this in.".to_string()),
      mood: None,
      goals: Some(goals),
    }
  }
}

/// ---------------------------------------------------------------------------
/// DayPatch
/// ---------------------------------------------------------------------------

/// Partial update for a day (the upsert delta). Every field optional;
/// `None` means "leave the stored value alone".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DayPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub wake_time: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub workout: Option<WorkoutEntry>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub lunch: Option<MealEntry>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub dinner: Option<MealEntry>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub notes: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub mood: Option<Mood>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub goals: Option<DayGoals>,
}

impl DayPatch {
  pub fn is_empty(&self) -> bool {
    self.wake_time.is_none()
      && self.workout.is_none()
      && self.lunch.is_none()
      && self.dinner.is_none()
      && self.notes.is_none()
      && self.mood.is_none()
      && self.goals.is_none()
  }
}

/// A whole record viewed as a patch, for seeding through the upsert path.
impl From<DayRecord> for DayPatch {
  fn from(record: DayRecord) -> Self {
    DayPatch {
      wake_time: record.wake_time,
      workout: record.workout,
      lunch: record.lunch,
      dinner: record.dinner,
      notes: record.notes,
      mood: record.mood,
      goals: record.goals,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
