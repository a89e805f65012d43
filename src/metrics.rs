//! Deterministic dashboard metrics over stored day records.
//!
//! Everything here is computed from a full day map in one pass so the
//! dashboard never needs a second store round-trip.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::models::{DayRecord, Mood, WorkoutStatus};

/// ---------------------------------------------------------------------------
/// Summary Types
/// ---------------------------------------------------------------------------

/// Workout status counts across all recorded days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WorkoutTally {
  pub pending: usize,
  pub done: usize,
  pub skipped: usize,
  pub intended: usize,
}

impl WorkoutTally {
  pub fn total(&self) -> usize {
    self.pending + self.done + self.skipped + self.intended
  }
}

/// Mood counts across days that recorded one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MoodTally {
  pub low: usize,
  pub neutral: usize,
  pub high: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
  /// Number of days with any record
  pub days_logged: usize,

  /// Consecutive logged days ending at today (0 when today has no record)
  pub streak_days: usize,

  pub workouts: WorkoutTally,

  /// Share of recorded workouts marked done, None when none recorded
  pub workout_completion_pct: Option<f64>,

  pub moods: MoodTally,

  /// Mean wake time over days that logged one, as `HH:MM`
  pub average_wake_time: Option<String>,
}

/// ---------------------------------------------------------------------------
/// Computation
/// ---------------------------------------------------------------------------

impl DashboardSummary {
  pub fn compute(days: &BTreeMap<NaiveDate, DayRecord>, today: NaiveDate) -> Self {
    // Workout tally
    let mut workouts = WorkoutTally::default();
    for record in days.values() {
      if let Some(workout) = &record.workout {
        match workout.status {
          WorkoutStatus::Pending => workouts.pending += 1,
          WorkoutStatus::Done => workouts.done += 1,
          WorkoutStatus::Skipped => workouts.skipped += 1,
          WorkoutStatus::Intended => workouts.intended += 1,
        }
      }
    }

    let workout_completion_pct = if workouts.total() > 0 {
      Some((workouts.done as f64 / workouts.total() as f64) * 100.0)
    } else {
      None
    };

    // Mood tally
    let mut moods = MoodTally::default();
    for record in days.values() {
      match record.mood {
        Some(Mood::Low) => moods.low += 1,
        Some(Mood::Neutral) => moods.neutral += 1,
        Some(Mood::High) => moods.high += 1,
        None => {}
      }
    }

    Self {
      days_logged: days.len(),
      streak_days: compute_streak(days, today),
      workouts,
      workout_completion_pct,
      moods,
      average_wake_time: compute_average_wake(days),
    }
  }
}

/// Walk backwards from today until the first missing day.
fn compute_streak(days: &BTreeMap<NaiveDate, DayRecord>, today: NaiveDate) -> usize {
  let mut streak = 0;
  let mut cursor = today;
  while days.contains_key(&cursor) {
    streak += 1;
    match cursor.pred_opt() {
      Some(previous) => cursor = previous,
      None => break,
    }
  }
  streak
}

/// Mean of all logged wake times, rounded to the nearest minute.
fn compute_average_wake(days: &BTreeMap<NaiveDate, DayRecord>) -> Option<String> {
  let minutes: Vec<u32> = days
    .values()
    .filter_map(|record| record.wake_time.as_deref())
    .filter_map(clock::minutes_of_day)
    .collect();

  if minutes.is_empty() {
    return None;
  }

  let sum: u32 = minutes.iter().sum();
  let mean = (sum as f64 / minutes.len() as f64).round() as u32;
  Some(clock::from_minutes(mean))
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::{august as date, mood_patch, record_with, sample_week, wake_patch, workout_patch};

  fn workout_record(status: WorkoutStatus) -> DayRecord {
    record_with(workout_patch("18:00", status))
  }

  fn wake_record(hhmm: &str) -> DayRecord {
    record_with(wake_patch(hhmm))
  }

  #[test]
  fn test_empty_store_yields_zeroed_summary() {
    let summary = DashboardSummary::compute(&BTreeMap::new(), date(23));

    assert_eq!(summary.days_logged, 0);
    assert_eq!(summary.streak_days, 0);
    assert_eq!(summary.workouts.total(), 0);
    assert_eq!(summary.workout_completion_pct, None);
    assert_eq!(summary.average_wake_time, None);
  }

  #[test]
  fn test_streak_counts_back_from_today() {
    let mut days = BTreeMap::new();
    days.insert(date(19), DayRecord::default());
    // Gap on the 20th
    days.insert(date(21), DayRecord::default());
    days.insert(date(22), DayRecord::default());
    days.insert(date(23), DayRecord::default());

    let summary = DashboardSummary::compute(&days, date(23));

    assert_eq!(summary.days_logged, 4);
    assert_eq!(summary.streak_days, 3);
  }

  #[test]
  fn test_streak_is_zero_without_a_record_today() {
    let mut days = BTreeMap::new();
    days.insert(date(21), DayRecord::default());
    days.insert(date(22), DayRecord::default());

    let summary = DashboardSummary::compute(&days, date(23));
    assert_eq!(summary.streak_days, 0);
  }

  #[test]
  fn test_workout_tally_and_completion() {
    let mut days = BTreeMap::new();
    days.insert(date(19), workout_record(WorkoutStatus::Done));
    days.insert(date(20), workout_record(WorkoutStatus::Done));
    days.insert(date(21), workout_record(WorkoutStatus::Skipped));
    days.insert(date(22), workout_record(WorkoutStatus::Pending));
    // No workout recorded on the 23rd
    days.insert(date(23), DayRecord::default());

    let summary = DashboardSummary::compute(&days, date(23));

    assert_eq!(summary.workouts.done, 2);
    assert_eq!(summary.workouts.skipped, 1);
    assert_eq!(summary.workouts.pending, 1);
    assert_eq!(summary.workouts.total(), 4);
    assert_eq!(summary.workout_completion_pct, Some(50.0));
  }

  #[test]
  fn test_mood_breakdown_ignores_unrecorded_days() {
    let mut days = BTreeMap::new();
    days.insert(date(20), record_with(mood_patch(Mood::High)));
    days.insert(date(21), record_with(mood_patch(Mood::Low)));
    days.insert(date(22), DayRecord::default());

    let summary = DashboardSummary::compute(&days, date(23));

    assert_eq!(summary.moods.high, 1);
    assert_eq!(summary.moods.low, 1);
    assert_eq!(summary.moods.neutral, 0);
  }

  #[test]
  fn test_sample_week_summary() {
    let days = sample_week(date(23));
    let summary = DashboardSummary::compute(&days, date(23));

    assert_eq!(summary.days_logged, 7);
    assert_eq!(summary.streak_days, 7);
    assert_eq!(summary.workouts.done, 3);
    assert_eq!(summary.workouts.skipped, 1);
    assert_eq!(summary.workouts.pending, 3);
    // 3 done of 7 recorded workouts
    let pct = summary.workout_completion_pct.unwrap();
    assert!((pct - 42.857).abs() < 0.01);
    assert_eq!(summary.moods.high, 4);
    assert_eq!(summary.moods.low, 3);
    assert_eq!(summary.average_wake_time.as_deref(), Some("07:00"));
  }

  #[test]
  fn test_average_wake_time_rounds_to_minute() {
    let mut days = BTreeMap::new();
    days.insert(date(20), wake_record("07:00"));
    days.insert(date(21), wake_record("08:00"));
    // Days without a wake time are excluded from the mean
    days.insert(date(22), DayRecord::default());

    let summary = DashboardSummary::compute(&days, date(23));
    assert_eq!(summary.average_wake_time.as_deref(), Some("07:30"));
  }

  #[test]
  fn test_unparseable_wake_times_are_skipped() {
    let mut days = BTreeMap::new();
    days.insert(date(20), wake_record("07:00"));
    days.insert(date(21), wake_record("sunrise"));

    let summary = DashboardSummary::compute(&days, date(23));
    assert_eq!(summary.average_wake_time.as_deref(), Some("07:00"));
  }
}
