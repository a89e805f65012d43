pub mod day;

pub use day::{DayGoals, DayPatch, DayRecord, MealEntry, Mood, WorkoutEntry, WorkoutStatus};
