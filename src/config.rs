//! Environment-driven configuration.
//!
//! Configuration can never abort a run: every unusable value logs a
//! warning and falls back to the local backend or the default data
//! directory. Variables are read once at startup, after `.env` loading.

use std::env;
use std::path::PathBuf;

/// ---------------------------------------------------------------------------
/// Environment Variables
/// ---------------------------------------------------------------------------

const BACKEND_VAR: &str = "LIFELOG_BACKEND";
const REMOTE_URL_VAR: &str = "LIFELOG_REMOTE_URL";
const REMOTE_KEY_VAR: &str = "LIFELOG_REMOTE_KEY";
const DATA_DIR_VAR: &str = "LIFELOG_DATA_DIR";

const DEFAULT_DATA_DIR: &str = "~/.life-log";

/// ---------------------------------------------------------------------------
/// Types
/// ---------------------------------------------------------------------------

/// Backend the store should talk to first. Remote carries its own
/// credentials so a selected remote is always a usable one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendSelection {
  Local,
  Remote { url: String, key: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub backend: BackendSelection,
  pub data_dir: PathBuf,
}

impl AppConfig {
  /// Read configuration from the environment. Infallible: anything that
  /// cannot be honored degrades to the local defaults with a warning.
  pub fn from_env() -> Self {
    let data_dir = env::var(DATA_DIR_VAR)
      .ok()
      .filter(|raw| !raw.trim().is_empty())
      .map(|raw| PathBuf::from(shellexpand::tilde(raw.trim()).into_owned()))
      .unwrap_or_else(default_data_dir);

    let requested = env::var(BACKEND_VAR).unwrap_or_else(|_| "local".to_string());
    let backend = match requested.trim().to_lowercase().as_str() {
      "" | "local" => BackendSelection::Local,
      "remote" => resolve_remote(),
      other => {
        log::warn!(
          "Unknown {} value {:?}, using the local backend",
          BACKEND_VAR,
          other
        );
        BackendSelection::Local
      }
    };

    Self { backend, data_dir }
  }
}

fn default_data_dir() -> PathBuf {
  PathBuf::from(shellexpand::tilde(DEFAULT_DATA_DIR).into_owned())
}

/// A remote selection needs a well-formed URL and a key, otherwise the
/// run stays local.
fn resolve_remote() -> BackendSelection {
  let url = env::var(REMOTE_URL_VAR)
    .ok()
    .map(|v| v.trim().to_string())
    .filter(|v| !v.is_empty());
  let key = env::var(REMOTE_KEY_VAR)
    .ok()
    .map(|v| v.trim().to_string())
    .filter(|v| !v.is_empty());

  let (url, key) = match (url, key) {
    (Some(url), Some(key)) => (url, key),
    _ => {
      log::warn!(
        "{}=remote needs both {} and {}, using the local backend",
        BACKEND_VAR,
        REMOTE_URL_VAR,
        REMOTE_KEY_VAR
      );
      return BackendSelection::Local;
    }
  };

  match url::Url::parse(&url) {
    Ok(_) => BackendSelection::Remote {
      url: url.trim_end_matches('/').to_string(),
      key,
    },
    Err(e) => {
      log::warn!("Unusable {} {:?} ({}), using the local backend", REMOTE_URL_VAR, url, e);
      BackendSelection::Local
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
