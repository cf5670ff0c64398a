//! Pluggable storage backends.
//!
//! The store reads and writes whole collections as JSON text under fixed
//! string keys. [`Storage`] is the seam between the record store and
//! whatever actually holds that text: an in-memory map for tests, or one
//! file per key in the platform data directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;

use crate::error::{Result, StoreError};

/// A key-value text store holding one JSON document per collection.
///
/// Implementations must be safe to share across threads; each call is a
/// single atomic read or write of one key. No atomicity is guaranteed across
/// a read-modify-write cycle.
pub trait Storage: Send + Sync {
    /// Read the document stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write (or overwrite) the document stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// MemoryStorage
// ---------------------------------------------------------------------------

/// Volatile in-memory backend. Used in tests and as a scratch store.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStorage
// ---------------------------------------------------------------------------

/// Durable backend storing one `<key>.json` file per key inside a directory.
pub struct FileStorage {
    dir: PathBuf,
    // Serializes file writes from concurrent handles.
    lock: Mutex<()>,
}

impl FileStorage {
    /// Open (or create) the default application storage directory.
    ///
    /// The directory is placed in the platform-appropriate data location:
    /// - Linux:   `~/.local/share/hemolink/`
    /// - macOS:   `~/Library/Application Support/com.hemolink.hemolink/`
    /// - Windows: `{FOLDERID_RoamingAppData}\hemolink\hemolink\data\`
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "hemolink", "hemolink").ok_or(StoreError::NoDataDir)?;

        Self::open_at(project_dirs.data_dir())
    }

    /// Open (or create) a storage directory at an explicit path.
    ///
    /// This is useful for tests and for embedding the store inside custom
    /// directory layouts.
    pub fn open_at(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;

        tracing::info!(path = %dir.display(), "opening storage directory");

        Ok(Self {
            dir: dir.to_path_buf(),
            lock: Mutex::new(()),
        })
    }

    /// Filesystem path backing this storage.
    pub fn path(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        match std::fs::read_to_string(self.file_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        std::fs::write(self.file_for(key), value)?;
        Ok(())
    }
}
