//! Chat-based life organizer: day records, keyword insights and dashboards.
//!
//! The store keeps one record per calendar date in a local JSON document
//! or a hosted table, the extractor turns chat messages into structured
//! signals, and the assistant ties the two together one turn at a time.

pub mod assistant;
pub mod clock;
pub mod config;
pub mod extractor;
pub mod metrics;
pub mod models;
pub mod responder;
pub mod store;

#[cfg(test)]
pub mod test_utils;

pub use assistant::{Assistant, ChatTurn};
pub use config::{AppConfig, BackendSelection};
pub use extractor::{extract, ExtractionResult, HabitSignals, ParaCategory, TaskItem};
pub use metrics::DashboardSummary;
pub use models::{DayGoals, DayPatch, DayRecord, MealEntry, Mood, WorkoutEntry, WorkoutStatus};
pub use responder::{CannedResponder, Responder, TemplateResponder};
pub use store::{BackendKind, DayStore, StoreError, StoreOutcome};
