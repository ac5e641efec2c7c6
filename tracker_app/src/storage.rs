use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Persistence collaborator. The payload is opaque to the store: a JSON
/// array of workouts, rewritten wholesale on every mutation.
pub trait WorkoutStore {
    fn save(&mut self, payload: &str) -> Result<()>;

    /// Previously saved payload, or `None` when nothing was ever saved.
    fn load(&mut self) -> Option<String>;

    fn clear(&mut self) -> Result<()>;
}

/// Single file JSON store, the local storage of a desktop deployment.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl WorkoutStore for JsonFileStore {
    fn save(&mut self, payload: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create data directory: {:?}", parent))?;
            }
        }

        fs::write(&self.path, payload)
            .with_context(|| format!("Failed to write workout data to {:?}", self.path))
    }

    fn load(&mut self) -> Option<String> {
        fs::read_to_string(&self.path).ok()
    }

    fn clear(&mut self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }

        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove workout data at {:?}", self.path))
    }
}

/// In memory store for tests and embedders without a filesystem.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start out holding an already serialized collection.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
        }
    }
}

impl WorkoutStore for MemoryStore {
    fn save(&mut self, payload: &str) -> Result<()> {
        self.blob = Some(payload.to_string());
        Ok(())
    }

    fn load(&mut self) -> Option<String> {
        self.blob.clone()
    }

    fn clear(&mut self) -> Result<()> {
        self.blob = None;
        Ok(())
    }
}
