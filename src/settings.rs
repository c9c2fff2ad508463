//! Durable settings storage under the config directory.
//!
//! Two independent records, one JSON file each: `filters.json` for the
//! filter/source settings and `theme.json` for the theme preference. There is
//! no schema versioning — a future incompatible schema gets a new file name.
//! Missing or corrupt files are treated as "no settings saved yet" and never
//! surface an error to the caller.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::feed::Period;

/// File name of the filter/source settings record.
const FILTERS_FILE: &str = "filters.json";
/// File name of the theme preference record.
const THEME_FILE: &str = "theme.json";

// ============================================================================
// Persisted Records
// ============================================================================

/// The durable filter/source settings record.
///
/// All fields use `#[serde(default)]` so records written by older builds
/// still deserialize. Callers mutate the in-memory copy loaded at startup and
/// save the whole record, so a save never drops fields it didn't touch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Saved source selection. `None` means the user never chose — the
    /// selection is then derived from each source's `enabled` flag.
    pub sources: Option<Vec<String>>,
    /// Keyword filter, stored trimmed. Empty means no keyword.
    pub keyword: String,
    /// Auto-refresh interval in minutes. 0 = manual refresh only.
    pub refresh_minutes: u64,
    /// Time-window filter mode.
    pub period: Period,
    /// Lower date bound, used only when `period` is `Custom`.
    pub from_date: Option<NaiveDate>,
    /// Upper date bound, used only when `period` is `Custom`.
    pub to_date: Option<NaiveDate>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            sources: None,
            keyword: String::new(),
            refresh_minutes: 0,
            period: Period::Today,
            from_date: None,
            to_date: None,
        }
    }
}

/// The durable theme preference record, independent of [`FilterSettings`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    /// Theme variant name: "dark" or "light".
    pub variant: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            variant: "dark".to_string(),
        }
    }
}

// ============================================================================
// SettingsStore
// ============================================================================

/// Reads and writes the settings records in a config directory.
///
/// Loads never fail: a missing or unparseable file yields the default record
/// (logged at debug level). Saves write the full record through a
/// write-temp-then-rename step so a crash mid-write cannot truncate a
/// previously valid file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    dir: PathBuf,
}

impl SettingsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load the filter settings, defaulting on missing/corrupt data.
    pub fn load_filters(&self) -> FilterSettings {
        self.read_record(FILTERS_FILE)
    }

    /// Persist the full filter settings record.
    pub fn save_filters(&self, settings: &FilterSettings) -> Result<()> {
        self.write_record(FILTERS_FILE, settings)
    }

    /// Load the theme preference, defaulting on missing/corrupt data.
    pub fn load_theme(&self) -> ThemeSettings {
        self.read_record(THEME_FILE)
    }

    /// Persist the theme preference record.
    pub fn save_theme(&self, settings: &ThemeSettings) -> Result<()> {
        self.write_record(THEME_FILE, settings)
    }

    /// Delete both records. Used by `--reset-settings`.
    pub fn reset(&self) -> Result<()> {
        for name in [FILTERS_FILE, THEME_FILE] {
            let path = self.dir.join(name);
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Failed to remove {}", path.display()));
                }
            }
        }
        Ok(())
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    fn read_record<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.dir.join(name);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::debug!(path = %path.display(), error = %e, "Settings file unreadable, using defaults");
                }
                return T::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                // Corruption is treated as "no settings", never surfaced.
                tracing::debug!(path = %path.display(), error = %e, "Settings file corrupt, using defaults");
                T::default()
            }
        }
    }

    fn write_record<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        let path = self.dir.join(name);
        let json = serde_json::to_string_pretty(value).context("Failed to serialize settings")?;
        atomic_write(&path, json.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// Write a file using the write-to-temp-then-rename pattern so the
/// destination is never left in a partial state.
fn atomic_write(dst: &Path, content: &[u8]) -> Result<()> {
    // Randomized temp filename so concurrent writers cannot collide on it.
    use std::time::{SystemTime, UNIX_EPOCH};
    let random_suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let temp_path = dst.with_extension(format!("tmp.{:016x}", random_suffix));

    let mut temp_file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .with_context(|| format!("Failed to create temporary file {}", temp_path.display()))?;

    if let Err(e) = temp_file.write_all(content).and_then(|_| temp_file.sync_all()) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e).with_context(|| format!("Failed to write {}", temp_path.display()));
    }
    drop(temp_file);

    // Rename fails on Windows when the destination exists, so remove it first.
    #[cfg(windows)]
    if dst.exists() {
        if let Err(e) = std::fs::remove_file(dst) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e).with_context(|| format!("Failed to replace {}", dst.display()));
        }
    }

    std::fs::rename(&temp_path, dst).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        anyhow::anyhow!(
            "Failed to rename {} to {}: {}",
            temp_path.display(),
            dst.display(),
            e
        )
    })
}

// ============================================================================
// Tests
// ============================================================================
