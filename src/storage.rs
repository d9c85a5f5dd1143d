use anyhow::*;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::bank::QuestionBank;
use crate::game::player::Player;

/// Fixed key under which the whole session document is stored.
pub const STORAGE_KEY: &str = "plateau-state";

/// The persisted document: active level, roster and the full question bank.
/// Session-local settings (mode, timer, public mode) are deliberately absent.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Snapshot {
    pub level: String,
    pub players: Vec<Player>,
    #[serde(rename = "questionsMap")]
    pub questions_map: QuestionBank,
}

/// Storage seam injected into the session. Implementations overwrite the
/// whole document on every save; there is no partial update or versioning.
pub trait SnapshotStore {
    fn load(&self) -> Result<Option<Snapshot>>;
    fn save(&self, snapshot: &Snapshot) -> Result<()>;
}

/// JSON file in the platform data directory.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new() -> Result<Self> {
        let directories = directories_next::ProjectDirs::from("", "", "plateau")
            .context("Could not locate a data directory")?;
        let path = directories
            .data_dir()
            .join(format!("{}.json", STORAGE_KEY));
        Ok(FileStore { path })
    }

    pub fn at(path: PathBuf) -> Self {
        FileStore { path }
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {:?}", self.path))?;
        let snapshot = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse {:?}", self.path))?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }
        let data = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, data).with_context(|| format!("Failed to write {:?}", self.path))?;
        Ok(())
    }
}

/// Keeps the snapshot in memory. Clones share the same slot, which lets tests
/// observe what the session persisted.
#[derive(Clone, Default)]
pub struct MemoryStore {
    snapshot: Arc<RwLock<Option<Snapshot>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        self.snapshot.read().clone()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        Ok(self.snapshot.read().clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        *self.snapshot.write() = Some(snapshot.clone());
        Ok(())
    }
}
