//! Persistent key-value preferences.
//!
//! The widget only ever stores one value here, the temperature unit, but
//! goes through [`PreferenceStore`] so tests can swap in [`MemoryStore`].

use anyhow::{Context, Result};
use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

use crate::model::TemperatureUnit;

/// Key holding the JSON-encoded unit flag (`true` means Celsius).
pub const UNIT_CELSIUS_KEY: &str = "unitCelsius";

pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A JSON object of string values on disk, rewritten on every `set`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let values = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read preferences: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse preferences: {}", path.display()))?
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create preferences directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(&self.values)
            .context("Failed to serialize preferences")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write preferences: {}", self.path.display()))
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// Read the persisted unit. Missing or unreadable values mean Celsius.
pub fn load_unit(store: &dyn PreferenceStore) -> TemperatureUnit {
    let Some(raw) = store.get(UNIT_CELSIUS_KEY) else {
        return TemperatureUnit::default();
    };

    match serde_json::from_str::<bool>(&raw) {
        Ok(true) => TemperatureUnit::Celsius,
        Ok(false) => TemperatureUnit::Fahrenheit,
        Err(err) => {
            tracing::warn!(value = %raw, error = %err, "Ignoring unreadable unit preference");
            TemperatureUnit::default()
        }
    }
}

pub fn save_unit(store: &mut dyn PreferenceStore, unit: TemperatureUnit) -> Result<()> {
    let raw = serde_json::to_string(&unit.is_celsius())
        .context("Failed to encode unit preference")?;
    store.set(UNIT_CELSIUS_KEY, &raw)
}
