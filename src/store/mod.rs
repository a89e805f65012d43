//! Day-record storage.
//!
//! One [`DayStore`] handle per process fronts two interchangeable
//! backends: a local JSON document and a hosted PostgREST table. The
//! handle keeps an in-memory cache of every day it has seen, mirrors
//! remote writes into the local file, and degrades to the local copy
//! instead of failing when the remote side is unreachable. Days whose
//! backing write failed keep serving from the cache, so a read on the
//! same handle always sees an acknowledged upsert. Reads and writes
//! therefore never surface an error to callers; the `_outcome`
//! variants report whether a result came from the primary backend.

pub mod local;
pub mod remote;

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

use chrono::NaiveDate;
use thiserror::Error;

use crate::config::{AppConfig, BackendSelection};
use crate::models::{DayPatch, DayRecord};
use local::LocalStore;
use remote::RemoteStore;

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("HTTP request failed: {0}")]
  Request(String),

  #[error("Remote API error: {0}")]
  Api(String),

  #[error("I/O error: {0}")]
  Io(String),

  #[error("Serialization error: {0}")]
  Serde(String),
}

// Convert transport and file errors into StoreError
impl From<reqwest::Error> for StoreError {
  fn from(e: reqwest::Error) -> Self {
    StoreError::Request(e.to_string())
  }
}

impl From<std::io::Error> for StoreError {
  fn from(e: std::io::Error) -> Self {
    StoreError::Io(e.to_string())
  }
}

impl From<serde_json::Error> for StoreError {
  fn from(e: serde_json::Error) -> Self {
    StoreError::Serde(e.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Outcomes
/// ---------------------------------------------------------------------------

/// Which backend a handle is writing to first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
  Local,
  Remote,
}

impl std::fmt::Display for BackendKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      BackendKind::Local => write!(f, "local"),
      BackendKind::Remote => write!(f, "remote"),
    }
  }
}

/// Result of a store operation that always yields a value. `Degraded`
/// carries the error that forced the local fallback.
#[derive(Debug)]
pub enum StoreOutcome<T> {
  Primary(T),
  Degraded { value: T, cause: StoreError },
}

impl<T> StoreOutcome<T> {
  pub fn value(&self) -> &T {
    match self {
      StoreOutcome::Primary(value) => value,
      StoreOutcome::Degraded { value, .. } => value,
    }
  }

  pub fn into_value(self) -> T {
    match self {
      StoreOutcome::Primary(value) => value,
      StoreOutcome::Degraded { value, .. } => value,
    }
  }

  pub fn is_degraded(&self) -> bool {
    matches!(self, StoreOutcome::Degraded { .. })
  }
}

/// ---------------------------------------------------------------------------
/// DayStore
/// ---------------------------------------------------------------------------

pub struct DayStore {
  kind: BackendKind,
  local: LocalStore,
  // Present exactly when kind is Remote
  remote: Option<RemoteStore>,
  cache: Mutex<BTreeMap<NaiveDate, DayRecord>>,
}

impl DayStore {
  pub fn local(data_dir: &Path) -> Self {
    Self {
      kind: BackendKind::Local,
      local: LocalStore::new(data_dir),
      remote: None,
      cache: Mutex::new(BTreeMap::new()),
    }
  }

  /// Remote-first store. The local file under `data_dir` doubles as the
  /// offline mirror and fallback source.
  pub fn remote(base_url: &str, api_key: &str, data_dir: &Path) -> Self {
    Self {
      kind: BackendKind::Remote,
      local: LocalStore::new(data_dir),
      remote: Some(RemoteStore::new(base_url, api_key)),
      cache: Mutex::new(BTreeMap::new()),
    }
  }

  pub fn from_config(config: &AppConfig) -> Self {
    match &config.backend {
      BackendSelection::Local => Self::local(&config.data_dir),
      BackendSelection::Remote { url, key } => Self::remote(url, key, &config.data_dir),
    }
  }

  pub fn backend(&self) -> BackendKind {
    self.kind
  }

  /// Where the local document (primary store or remote mirror) lives.
  pub fn local_path(&self) -> &Path {
    self.local.path()
  }

  /// ---------------------------------------------------------------------------
  /// Reads
  /// ---------------------------------------------------------------------------

  pub async fn load_all_outcome(&self) -> StoreOutcome<BTreeMap<NaiveDate, DayRecord>> {
    match &self.remote {
      Some(remote) => match remote.fetch_all().await {
        Ok(days) => StoreOutcome::Primary(self.reconcile_all(days)),
        Err(cause) => {
          log::warn!("Remote day fetch failed, serving the local copy: {}", cause);
          let days = self.reconcile_all(self.local.load_all());
          StoreOutcome::Degraded { value: days, cause }
        }
      },
      None => StoreOutcome::Primary(self.reconcile_all(self.local.load_all())),
    }
  }

  pub async fn load_all(&self) -> BTreeMap<NaiveDate, DayRecord> {
    self.load_all_outcome().await.into_value()
  }

  pub async fn load_day_outcome(&self, date: NaiveDate) -> StoreOutcome<Option<DayRecord>> {
    match &self.remote {
      Some(remote) => match remote.fetch_day(date).await {
        Ok(record) => StoreOutcome::Primary(self.reconcile_day(date, record)),
        Err(cause) => {
          log::warn!(
            "Remote read for {} failed, serving the local copy: {}",
            date,
            cause
          );
          let record = self.reconcile_day(date, self.local.load_day(date));
          StoreOutcome::Degraded { value: record, cause }
        }
      },
      None => StoreOutcome::Primary(self.reconcile_day(date, self.local.load_day(date))),
    }
  }

  pub async fn load_day(&self, date: NaiveDate) -> Option<DayRecord> {
    self.load_day_outcome(date).await.into_value()
  }

  /// ---------------------------------------------------------------------------
  /// Writes
  /// ---------------------------------------------------------------------------

  /// Merge `patch` over the current record for `date` (an absent day
  /// merges over the empty record) and write the result through the
  /// active backend. The merged record is always returned and cached,
  /// even when every write path fails.
  pub async fn upsert_outcome(&self, date: NaiveDate, patch: DayPatch) -> StoreOutcome<DayRecord> {
    let base = self.base_record(date).await;
    let merged = base.merged(patch);

    let outcome = match &self.remote {
      Some(remote) => match remote.push_day(date, &merged).await {
        Ok(()) => {
          // Keep the offline mirror current; a mirror miss is not a write failure
          if let Err(e) = self.local.save_day(date, &merged) {
            log::warn!("Local mirror write for {} failed: {}", date, e);
          }
          StoreOutcome::Primary(merged.clone())
        }
        Err(cause) => {
          log::warn!("Remote write for {} failed, keeping the day locally: {}", date, cause);
          if let Err(e) = self.local.save_day(date, &merged) {
            log::warn!("Fallback local write for {} also failed: {}", date, e);
          }
          StoreOutcome::Degraded {
            value: merged.clone(),
            cause,
          }
        }
      },
      None => match self.local.save_day(date, &merged) {
        Ok(()) => StoreOutcome::Primary(merged.clone()),
        Err(cause) => {
          log::warn!("Local write for {} failed: {}", date, cause);
          StoreOutcome::Degraded {
            value: merged.clone(),
            cause,
          }
        }
      },
    };

    self.cache.lock().unwrap().insert(date, merged);
    outcome
  }

  pub async fn upsert(&self, date: NaiveDate, patch: DayPatch) -> DayRecord {
    self.upsert_outcome(date, patch).await.into_value()
  }

  /// First-run seed: when the store holds no records at all, create a
  /// starter entry for `today` through the normal upsert path. Returns
  /// whether a seed happened.
  pub async fn seed_if_empty(&self, today: NaiveDate) -> bool {
    if !self.load_all().await.is_empty() {
      return false;
    }
    log::info!("Store is empty, seeding a starter record for {}", today);
    self.upsert(today, DayRecord::placeholder().into()).await;
    true
  }

  /// ---------------------------------------------------------------------------
  /// Internals
  /// ---------------------------------------------------------------------------

  /// Fold one backing read into the cache. The backing wins when it has
  /// the day; a backing miss serves the cached copy instead, which may
  /// hold an upsert whose write failed.
  fn reconcile_day(&self, date: NaiveDate, backing: Option<DayRecord>) -> Option<DayRecord> {
    let mut cache = self.cache.lock().unwrap();
    match backing {
      Some(record) => {
        cache.insert(date, record.clone());
        Some(record)
      }
      None => cache.get(&date).cloned(),
    }
  }

  /// Same policy as [`Self::reconcile_day`] over a whole backing map:
  /// the backing wins per date, cached days it lacks are kept. The union
  /// becomes the new cache.
  fn reconcile_all(&self, mut days: BTreeMap<NaiveDate, DayRecord>) -> BTreeMap<NaiveDate, DayRecord> {
    let mut cache = self.cache.lock().unwrap();
    for (date, record) in cache.iter() {
      days.entry(*date).or_insert_with(|| record.clone());
    }
    *cache = days.clone();
    days
  }

  /// Merge base for an upsert: the cache wins, a cold cache falls back to
  /// a backend read, an absent day starts from the empty record.
  async fn base_record(&self, date: NaiveDate) -> DayRecord {
    let cached = self.cache.lock().unwrap().get(&date).cloned();
    if let Some(record) = cached {
      return record;
    }
    self.load_day(date).await.unwrap_or_default()
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
