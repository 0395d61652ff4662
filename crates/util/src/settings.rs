//! Runner settings persistence.
//!
//! This module provides a tiny JSON-backed store holding the runtime base
//! URL the management API is reached at. The file lives in the standard
//! configuration directory (`~/.config/logicapp-runner/settings.json` on
//! most platforms) and is re-read at every command invocation so edits take
//! effect without restarting anything. The store is safe to read/write from
//! multiple threads thanks to the internal `Mutex`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dirs_next::config_dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Environment variable allowing callers to override the settings file path.
pub const SETTINGS_PATH_ENV: &str = "LAR_SETTINGS_PATH";

/// Environment variable supplying the base URL directly, taking precedence
/// over the settings file.
pub const BASE_URL_ENV: &str = "LAR_BASE_URL";

/// Default filename for the JSON payload.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Error surfaced when reading, writing, or resolving settings fails.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// I/O failure (for example, permissions or missing directory).
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failure.
    #[error("settings serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// No base URL is configured anywhere.
    #[error("no runtime base URL configured; set {BASE_URL_ENV} or run `lar set-url <URL>`")]
    MissingBaseUrl,
}

/// Persisted setting values.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SettingsPayload {
    /// Base URL of the Logic Apps runtime management API.
    pub base_url: Option<String>,
}

/// Thread-safe settings store backed by a JSON file.
#[derive(Debug, Default)]
pub struct RunnerSettings {
    path: PathBuf,
    payload: Mutex<SettingsPayload>,
    persist_to_disk: bool,
}

impl RunnerSettings {
    /// Create a store rooted at the default (or env-overridden) path and
    /// load whatever is currently on disk.
    pub fn load() -> Result<Self, SettingsError> {
        let resolved_path = default_settings_path();
        let payload = load_payload(&resolved_path)?;
        Ok(Self {
            path: resolved_path,
            payload: Mutex::new(payload),
            persist_to_disk: true,
        })
    }

    /// Build an in-memory store that never touches the filesystem.
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            payload: Mutex::new(SettingsPayload::default()),
            persist_to_disk: false,
        }
    }

    /// Path to the underlying JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The persisted base URL, if one was saved.
    pub fn base_url(&self) -> Option<String> {
        self.payload.lock().expect("settings lock poisoned").base_url.clone()
    }

    /// Persist a new base URL.
    pub fn set_base_url(&self, base_url: Option<String>) -> Result<(), SettingsError> {
        {
            let mut payload = self.payload.lock().expect("settings lock poisoned");
            payload.base_url = base_url;
            if self.persist_to_disk {
                self.save_locked(&payload)?;
            }
        }
        Ok(())
    }

    fn save_locked(&self, payload: &SettingsPayload) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(payload)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

/// Resolve the base URL for one command invocation.
///
/// Resolution order: the [`BASE_URL_ENV`] environment variable, then the
/// settings file. Nothing is cached across invocations; the file is read
/// again every time this is called.
pub fn resolve_base_url() -> Result<String, SettingsError> {
    if let Ok(url) = env::var(BASE_URL_ENV) {
        let trimmed = url.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }

    let store = RunnerSettings::load()?;
    store.base_url().ok_or(SettingsError::MissingBaseUrl)
}

fn default_settings_path() -> PathBuf {
    if let Ok(path) = env::var(SETTINGS_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("logicapp-runner")
        .join(SETTINGS_FILE_NAME)
}

fn load_payload(path: &Path) -> Result<SettingsPayload, SettingsError> {
    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(payload) => Ok(payload),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse settings file; using defaults"
                );
                Ok(SettingsPayload::default())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(SettingsPayload::default()),
        Err(error) => Err(SettingsError::Io(error)),
    }
}
