//! Persisted settings
//!
//! Two scalar preferences survive between sessions: the last known device
//! latitude and longitude. They live behind `SettingsStore` so the picker
//! can be given a file-backed store or an in-memory one.
//! File location: ~/.local/share/postcode-picker/settings.json

use crate::config::defaults::APP_DIR_NAME;
use crate::constants::settings::{LAT_KEY, LNG_KEY, SETTINGS_FILE_NAME};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Key/value store for scalar preferences
pub trait SettingsStore {
    /// Read a value, None if it was never written
    fn get_f64(&self, key: &str) -> Option<f64>;

    /// Write a value, replacing any previous one
    fn set_f64(&mut self, key: &str, value: f64) -> Result<()>;
}

/// Settings held in memory only
#[derive(Debug, Default, Clone)]
pub struct MemorySettings {
    values: HashMap<String, f64>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn get_f64(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    fn set_f64(&mut self, key: &str, value: f64) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// On-disk representation
#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    values: BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

/// Settings stored as a JSON file, rewritten on every write
#[derive(Debug)]
pub struct FileSettings {
    data: SettingsFile,
    path: PathBuf,
}

impl FileSettings {
    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Settings("Could not determine data directory".to_string()))
    }

    /// Get the default settings file path
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join(SETTINGS_FILE_NAME))
    }

    /// Open the settings file at the default path
    pub fn load() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    /// Open a settings file at a specific path
    ///
    /// A missing file is an empty store; it is created on the first write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let data = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Settings(format!("Failed to read settings file: {}", e))
            })?;
            serde_json::from_str(&content).map_err(|e| {
                Error::Settings(format!("Failed to parse settings file: {}", e))
            })?
        } else {
            SettingsFile::default()
        };

        Ok(Self { data, path })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// When the file was last written
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.data.updated_at
    }

    /// Remove all stored values and the backing file
    pub fn clear(&mut self) -> Result<()> {
        self.data = SettingsFile::default();
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Settings(format!("Failed to create data directory: {}", e))
            })?;
        }

        let content = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, content).map_err(|e| {
            Error::Settings(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

impl SettingsStore for FileSettings {
    fn get_f64(&self, key: &str) -> Option<f64> {
        self.data.values.get(key).copied()
    }

    fn set_f64(&mut self, key: &str, value: f64) -> Result<()> {
        self.data.values.insert(key.to_string(), value);
        self.data.updated_at = Some(Utc::now());
        self.save()
    }
}

/// Write `fallback` for whichever of lat/lng is missing
pub fn seed_defaults<S: SettingsStore + ?Sized>(store: &mut S, fallback: Coordinates) -> Result<()> {
    if store.get_f64(LAT_KEY).is_none() {
        debug!("Seeding default latitude {}", fallback.lat);
        store.set_f64(LAT_KEY, fallback.lat)?;
    }
    if store.get_f64(LNG_KEY).is_none() {
        debug!("Seeding default longitude {}", fallback.lng);
        store.set_f64(LNG_KEY, fallback.lng)?;
    }
    Ok(())
}

/// Last persisted coordinate, each component falling back independently
pub fn last_known<S: SettingsStore + ?Sized>(store: &S, fallback: Coordinates) -> Coordinates {
    Coordinates::new(
        store.get_f64(LAT_KEY).unwrap_or(fallback.lat),
        store.get_f64(LNG_KEY).unwrap_or(fallback.lng),
    )
}

/// Persist a coordinate as two independent writes (latitude first)
pub fn remember<S: SettingsStore + ?Sized>(store: &mut S, coords: Coordinates) -> Result<()> {
    store.set_f64(LAT_KEY, coords.lat)?;
    store.set_f64(LNG_KEY, coords.lng)
}
