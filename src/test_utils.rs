//! Test utilities and helpers
//!
//! Shared factories for day records and patches so individual test
//! modules do not rebuild the same fixtures.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{
  DayGoals, DayPatch, DayRecord, MealEntry, Mood, WorkoutEntry, WorkoutStatus,
};

/// ---------------------------------------------------------------------------
/// Date Helpers
/// ---------------------------------------------------------------------------

/// A fixed month keeps fixtures stable regardless of when tests run.
pub fn august(day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(2026, 8, day).expect("valid August day")
}

/// ---------------------------------------------------------------------------
/// Patch Factories
/// ---------------------------------------------------------------------------

pub fn wake_patch(hhmm: &str) -> DayPatch {
  DayPatch {
    wake_time: Some(hhmm.to_string()),
    ..Default::default()
  }
}

pub fn mood_patch(mood: Mood) -> DayPatch {
  DayPatch {
    mood: Some(mood),
    ..Default::default()
  }
}

pub fn workout_patch(time: &str, status: WorkoutStatus) -> DayPatch {
  DayPatch {
    workout: Some(WorkoutEntry {
      time: time.to_string(),
      status,
    }),
    ..Default::default()
  }
}

/// ---------------------------------------------------------------------------
/// Record Factories
/// ---------------------------------------------------------------------------

/// Apply a patch to the empty record.
pub fn record_with(patch: DayPatch) -> DayRecord {
  let mut record = DayRecord::default();
  record.merge(patch);
  record
}

/// A record with every field populated.
pub fn full_record() -> DayRecord {
  DayRecord {
    wake_time: Some("06:45".to_string()),
    workout: Some(WorkoutEntry {
      time: "18:00".to_string(),
      status: WorkoutStatus::Done,
    }),
    lunch: Some(MealEntry {
      time: "12:30".to_string(),
      details: "salad".to_string(),
    }),
    dinner: Some(MealEntry {
      time: "19:30".to_string(),
      details: "stir fry".to_string(),
    }),
    notes: Some("solid day".to_string()),
    mood: Some(Mood::High),
    goals: Some(DayGoals::default()),
  }
}

/// A week of mixed records ending on the given day: workouts done on the
/// first three days, skipped once, moods alternating.
pub fn sample_week(ending: NaiveDate) -> BTreeMap<NaiveDate, DayRecord> {
  let mut days = BTreeMap::new();
  for offset in 0..7 {
    let date = ending - chrono::Duration::days(offset);
    let status = match offset {
      0..=2 => WorkoutStatus::Done,
      3 => WorkoutStatus::Skipped,
      _ => WorkoutStatus::Pending,
    };
    let mood = if offset % 2 == 0 { Mood::High } else { Mood::Low };
    let mut record = record_with(workout_patch("18:00", status));
    record.merge(mood_patch(mood));
    record.merge(wake_patch("07:00"));
    days.insert(date, record);
  }
  days
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_factories_create_valid_data() {
    let record = full_record();
    assert!(record.wake_time.is_some());
    assert!(record.goals.is_some());

    let patched = record_with(wake_patch("07:15"));
    assert_eq!(patched.wake_time.as_deref(), Some("07:15"));
    assert!(patched.workout.is_none());
  }

  #[test]
  fn test_sample_week_spans_seven_consecutive_days() {
    let days = sample_week(august(23));

    assert_eq!(days.len(), 7);
    assert!(days.contains_key(&august(17)));
    assert!(days.contains_key(&august(23)));

    let done = days
      .values()
      .filter(|r| r.workout.as_ref().map(|w| w.status) == Some(WorkoutStatus::Done))
      .count();
    assert_eq!(done, 3);
  }
}
