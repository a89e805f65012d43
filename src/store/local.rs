use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::StoreError;
use crate::models::DayRecord;

/// ---------------------------------------------------------------------------
/// Local JSON Backend
/// ---------------------------------------------------------------------------

/// File name of the on-disk day document inside the data directory.
pub const STORE_FILE: &str = "life-log.json";

/// Whole-document JSON store: one object keyed by ISO date. Reads are
/// forgiving (missing or corrupt files act as an empty store), writes
/// replace the document.
pub struct LocalStore {
  path: PathBuf,
}

impl LocalStore {
  pub fn new(data_dir: &Path) -> Self {
    Self {
      path: data_dir.join(STORE_FILE),
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Read the whole document. A missing file is an empty store; a corrupt
  /// one is discarded with a warning rather than surfaced as an error.
  pub fn load_all(&self) -> BTreeMap<NaiveDate, DayRecord> {
    match fs::read_to_string(&self.path) {
      Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
        log::warn!(
          "Ignoring unreadable day document at {}: {}",
          self.path.display(),
          e
        );
        BTreeMap::new()
      }),
      Err(_) => BTreeMap::new(),
    }
  }

  pub fn load_day(&self, date: NaiveDate) -> Option<DayRecord> {
    self.load_all().remove(&date)
  }

  /// Replace the document on disk, creating the data directory on demand.
  pub fn save_all(&self, days: &BTreeMap<NaiveDate, DayRecord>) -> Result<(), StoreError> {
    if let Some(parent) = self.path.parent() {
      fs::create_dir_all(parent)?;
    }
    let serialized = serde_json::to_string_pretty(days)?;
    fs::write(&self.path, serialized)?;
    Ok(())
  }

  /// Read-modify-write for a single day.
  pub fn save_day(&self, date: NaiveDate, record: &DayRecord) -> Result<(), StoreError> {
    let mut days = self.load_all();
    days.insert(date, record.clone());
    self.save_all(&days)
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
