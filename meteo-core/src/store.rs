//! Last search and last successful reading, kept across runs.
//!
//! The orchestrator never touches a store; callers decide what to persist.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fs, io::ErrorKind, path::PathBuf};
use tracing::{debug, warn};

use crate::{
    Config,
    model::{SearchRequest, WeatherReading},
};

pub const STORE_VERSION: u32 = 1;

pub trait ResultStore {
    fn last_result(&self) -> Result<Option<WeatherReading>>;
    fn last_search(&self) -> Result<Option<SearchRequest>>;
    /// Replace both the stored search and its reading.
    fn set_last(&mut self, search: &SearchRequest, reading: &WeatherReading) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

/// On-disk envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSearch {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub search: SearchRequest,
    pub weather: WeatherReading,
}

#[derive(Debug, Default)]
pub struct MemoryResultStore {
    entry: Option<(SearchRequest, WeatherReading)>,
}

impl ResultStore for MemoryResultStore {
    fn last_result(&self) -> Result<Option<WeatherReading>> {
        Ok(self.entry.as_ref().map(|(_, r)| r.clone()))
    }

    fn last_search(&self) -> Result<Option<SearchRequest>> {
        Ok(self.entry.as_ref().map(|(s, _)| s.clone()))
    }

    fn set_last(&mut self, search: &SearchRequest, reading: &WeatherReading) -> Result<()> {
        self.entry = Some((search.clone(), reading.clone()));
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.entry = None;
        Ok(())
    }
}

/// JSON file store.
#[derive(Debug, Clone)]
pub struct FileResultStore {
    path: PathBuf,
}

impl FileResultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Config::project_dirs()?.data_dir().join("last-search.json")))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Missing file or another version reads as empty.
    pub fn load(&self) -> Result<Option<StoredSearch>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read store file: {}", self.path.display()));
            }
        };

        let stored: StoredSearch = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse store file: {}", self.path.display()))?;

        if stored.version != STORE_VERSION {
            warn!(version = stored.version, "ignoring stored search with unknown version");
            return Ok(None);
        }

        Ok(Some(stored))
    }
}

impl ResultStore for FileResultStore {
    fn last_result(&self) -> Result<Option<WeatherReading>> {
        Ok(self.load()?.map(|s| s.weather))
    }

    fn last_search(&self) -> Result<Option<SearchRequest>> {
        Ok(self.load()?.map(|s| s.search))
    }

    fn set_last(&mut self, search: &SearchRequest, reading: &WeatherReading) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        let stored = StoredSearch {
            version: STORE_VERSION,
            saved_at: Utc::now(),
            search: search.clone(),
            weather: reading.clone(),
        };
        let json =
            serde_json::to_string_pretty(&stored).context("Failed to serialize stored search")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write store file: {}", self.path.display()))?;

        debug!(path = %self.path.display(), "stored last search");
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err)
                .with_context(|| format!("Failed to remove store file: {}", self.path.display())),
        }
    }
}
