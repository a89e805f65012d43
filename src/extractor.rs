//! Keyword-driven message analysis.
//!
//! Turns one chat message into structured signals (wake time, workout
//! intention, mood, tasks, PARA category) plus human-readable insight
//! lines. Pure and total: the same message always produces the same
//! result and no input can make it fail.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::models::Mood;

/// ---------------------------------------------------------------------------
/// Keyword Tables
/// ---------------------------------------------------------------------------

/// Matching is lowercase substring containment, so entries must be chosen
/// to avoid swallowing unrelated words.
const WAKE_KEYWORDS: [&str; 5] = ["woke", "wake", "got up", "out of bed", "morning"];

const EXERCISE_KEYWORDS: [&str; 7] =
  ["workout", "gym", "exercise", "training", "yoga", "jog", "cardio"];

const TASK_TRIGGERS: [&str; 6] = ["task", "remind", "need to", "have to", "todo", "to-do"];

const TASK_VERBS: [&str; 11] = [
  "finish", "complete", "submit", "review", "email", "call", "buy", "schedule", "write", "clean",
  "pay",
];

const LEARNING_KEYWORDS: [&str; 5] = ["learn", "study", "course", "tutorial", "research"];

const PROJECT_KEYWORDS: [&str; 6] =
  ["project", "deadline", "milestone", "client", "sprint", "launch"];

const NEGATIVE_MOOD_KEYWORDS: [&str; 9] = [
  "tired",
  "exhausted",
  "stressed",
  "anxious",
  "sad",
  "overwhelmed",
  "drained",
  "awful",
  "terrible",
];

const POSITIVE_MOOD_KEYWORDS: [&str; 9] = [
  "great",
  "excited",
  "happy",
  "amazing",
  "energized",
  "productive",
  "fantastic",
  "wonderful",
  "good",
];

/// Clock times in prose: `7:30`, `7:30 am`, `18:00`, `9pm`.
const TIME_PATTERN: &str = r"(?i)\b\d{1,2}:\d{2}(?:\s?[ap]m)?\b|\b\d{1,2}\s?[ap]m\b";

/// ---------------------------------------------------------------------------
/// Result Types
/// ---------------------------------------------------------------------------

/// PARA-method bucket a message or task is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParaCategory {
  Projects,
  Areas,
  Resources,
  Archives,
}

impl std::fmt::Display for ParaCategory {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let label = match self {
      ParaCategory::Projects => "Projects",
      ParaCategory::Areas => "Areas",
      ParaCategory::Resources => "Resources",
      ParaCategory::Archives => "Archives",
    };
    write!(f, "{label}")
  }
}

/// An action item surfaced from a message. Never persisted to day records;
/// callers decide what to do with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskItem {
  pub text: String,
  pub category: ParaCategory,
}

/// Habit-tracking signals pulled from a message. Times are already
/// normalized to 24-hour `HH:MM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct HabitSignals {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub wake_time: Option<String>,
  pub workout_intended: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub mood: Option<Mood>,
}

/// Everything [`extract`] learned from one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractionResult {
  pub insights: Vec<String>,
  pub tasks: Vec<TaskItem>,
  pub habit_signals: HabitSignals,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub para_category: Option<ParaCategory>,
}

impl ExtractionResult {
  pub fn is_empty(&self) -> bool {
    self.insights.is_empty()
      && self.tasks.is_empty()
      && self.habit_signals == HabitSignals::default()
      && self.para_category.is_none()
  }
}

/// ---------------------------------------------------------------------------
/// Extraction
/// ---------------------------------------------------------------------------

/// Analyze one chat message. Rules are cumulative: a single message can
/// produce a wake time, a workout intention, tasks, a category and a mood
/// at once. Only the PARA category is single-valued, with project wording
/// outranking learning wording.
pub fn extract(message: &str) -> ExtractionResult {
  let lower = message.to_lowercase();
  let mut result = ExtractionResult::default();

  // Wake time: needs both a wake word and a parseable clock time.
  if contains_any(&lower, &WAKE_KEYWORDS) {
    if let Some(raw) = find_time(message) {
      if let Some(normalized) = clock::normalize(raw) {
        result.insights.push(format!("Logged your wake time as {raw}."));
        result.habit_signals.wake_time = Some(normalized);
      }
    }
  }

  // Workout intention
  if contains_any(&lower, &EXERCISE_KEYWORDS) {
    result.habit_signals.workout_intended = true;
    result
      .insights
      .push("Noted a workout intention for today.".to_string());
  }

  // Tasks: a trigger word opens the scan, each action verb becomes an item.
  if contains_any(&lower, &TASK_TRIGGERS) {
    for verb in TASK_VERBS {
      if lower.contains(verb) {
        result.tasks.push(TaskItem {
          text: format!("Complete task related to: {verb}"),
          category: ParaCategory::Projects,
        });
      }
    }
    if !result.tasks.is_empty() {
      result
        .insights
        .push(format!("Captured {} task(s) from your message.", result.tasks.len()));
    }
  }

  // PARA filing: learning first, project wording overrides it.
  if contains_any(&lower, &LEARNING_KEYWORDS) {
    result.para_category = Some(ParaCategory::Resources);
    result
      .insights
      .push("Sounds like study material. Filed under Resources.".to_string());
  }
  if contains_any(&lower, &PROJECT_KEYWORDS) {
    result.para_category = Some(ParaCategory::Projects);
    result
      .insights
      .push("Project activity detected. Filed under Projects.".to_string());
  }

  // Mood: negative wording wins over positive when both appear.
  if contains_any(&lower, &NEGATIVE_MOOD_KEYWORDS) {
    result.habit_signals.mood = Some(Mood::Low);
    result
      .insights
      .push("Mood reads low. Take it easy where you can.".to_string());
  } else if contains_any(&lower, &POSITIVE_MOOD_KEYWORDS) {
    result.habit_signals.mood = Some(Mood::High);
    result
      .insights
      .push("Mood reads high. Good momentum.".to_string());
  }

  result
}

fn contains_any(lower: &str, keywords: &[&str]) -> bool {
  keywords.iter().any(|keyword| lower.contains(keyword))
}

/// First clock time appearing in the message, as written by the user.
fn find_time(message: &str) -> Option<&str> {
  // A literal pattern that fails to compile just means no match.
  if let Ok(re) = Regex::new(TIME_PATTERN) {
    return re.find(message).map(|m| m.as_str());
  }
  None
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
