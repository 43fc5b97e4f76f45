//! Chat history persistence.
//!
//! The store is kept as pretty JSON. Reads take a shared advisory lock and
//! writes an exclusive one, both on a sibling `.lock` file, so the history
//! file itself can be replaced by rename while the lock is held.

use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use super::store::ConversationStore;
use crate::error::{FloatChatError, FloatChatResult};

/// Default history file name, relative to the working directory.
pub const DEFAULT_HISTORY_FILE: &str = "chat_history.json";

/// Advisory lock guard. The lock is released when the guard is dropped, on
/// every exit path.
#[derive(Debug)]
pub struct HistoryLock {
    file: File,
    path: PathBuf,
}

impl HistoryLock {
    fn open(path: &Path) -> FloatChatResult<File> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?)
    }

    pub fn exclusive(path: &Path) -> FloatChatResult<Self> {
        let file = Self::open(path)?;
        file.lock_exclusive().map_err(|source| FloatChatError::Lock {
            path: path.display().to_string(),
            source,
        })?;
        log::debug!("Acquired exclusive history lock {}", path.display());
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn shared(path: &Path) -> FloatChatResult<Self> {
        let file = Self::open(path)?;
        file.lock_shared().map_err(|source| FloatChatError::Lock {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }
}

impl Drop for HistoryLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            log::warn!("Failed to release history lock {}: {}", self.path.display(), e);
        }
    }
}

/// Handle to a JSON history file.
#[derive(Debug, Clone)]
pub struct HistoryFile {
    path: PathBuf,
}

impl HistoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_HISTORY_FILE.to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }

    fn read_unlocked(&self) -> FloatChatResult<Option<ConversationStore>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn write_unlocked(&self, store: &ConversationStore) -> FloatChatResult<()> {
        let json = serde_json::to_string_pretty(store)?;
        let tmp_path = self.temp_path();
        let mut tmp = File::create(&tmp_path)?;
        tmp.write_all(json.as_bytes())?;
        tmp.sync_all()?;
        drop(tmp);
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Stored history, or `None` when the file is missing or empty.
    pub fn load(&self) -> FloatChatResult<Option<ConversationStore>> {
        let _lock = HistoryLock::shared(&self.lock_path())?;
        self.read_unlocked()
    }

    /// Stored history, falling back to an empty store when the file is
    /// missing or unreadable.
    pub fn load_or_default(&self) -> ConversationStore {
        match self.load() {
            Ok(Some(store)) => store,
            Ok(None) => ConversationStore::new(),
            Err(e) => {
                log::warn!("Could not read chat history {}: {}", self.path.display(), e);
                ConversationStore::new()
            }
        }
    }

    pub fn save(&self, store: &ConversationStore) -> FloatChatResult<()> {
        let _lock = HistoryLock::exclusive(&self.lock_path())?;
        self.write_unlocked(store)?;
        log::debug!(
            "Saved {} conversation(s) to {}",
            store.conversations.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Write the store produced by `snapshot`, which runs only once the
    /// exclusive lock is held. Concurrent writers therefore land in lock
    /// order, each with the state current at that point.
    pub fn save_with<F>(&self, snapshot: F) -> FloatChatResult<()>
    where
        F: FnOnce() -> ConversationStore,
    {
        let _lock = HistoryLock::exclusive(&self.lock_path())?;
        let store = snapshot();
        self.write_unlocked(&store)?;
        log::debug!(
            "Saved {} conversation(s) to {}",
            store.conversations.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Read-modify-write under one exclusive lock. Nothing is written when `f`
    /// fails.
    pub fn update<F>(&self, f: F) -> FloatChatResult<ConversationStore>
    where
        F: FnOnce(&mut ConversationStore) -> FloatChatResult<()>,
    {
        let _lock = HistoryLock::exclusive(&self.lock_path())?;
        let mut store = self.read_unlocked()?.unwrap_or_default();
        f(&mut store)?;
        self.write_unlocked(&store)?;
        Ok(store)
    }

    /// Replace the stored history with an empty store.
    pub fn clear(&self) -> FloatChatResult<()> {
        self.update(|store| {
            store.clear();
            Ok(())
        })
        .map(|_| ())
    }
}
