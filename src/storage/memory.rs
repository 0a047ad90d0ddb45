//! In-memory store.

use std::collections::{
    BTreeMap,
    HashSet,
};
use std::io;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::{
    Mutex,
    MutexGuard,
    PoisonError,
};

use super::LocaleStore;

/// Keeps files in a map. Used to drive the runner without touching the disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Path → contents
    files: Mutex<BTreeMap<PathBuf, String>>,
    /// Paths whose writes fail with `PermissionDenied`
    read_only: Mutex<HashSet<PathBuf>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files().insert(path.into(), contents.into());
    }

    #[must_use]
    pub fn get(&self, path: &Path) -> Option<String> {
        self.files().get(path).cloned()
    }

    /// Makes subsequent writes to `path` fail.
    pub fn set_read_only(&self, path: impl Into<PathBuf>) {
        self.read_only.lock().unwrap_or_else(PoisonError::into_inner).insert(path.into());
    }

    /// Locks the file map, recovering from a poisoned lock.
    fn files(&self) -> MutexGuard<'_, BTreeMap<PathBuf, String>> {
        self.files.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LocaleStore for MemoryStore {
    fn read(&self, path: &Path) -> io::Result<Option<String>> {
        Ok(self.get(path))
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if self.read_only.lock().unwrap_or_else(PoisonError::into_inner).contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("read-only: {}", path.display()),
            ));
        }
        self.insert(path, contents);
        Ok(())
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let files: Vec<PathBuf> =
            self.files().keys().filter(|path| path.parent() == Some(dir)).cloned().collect();
        if files.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory not found: {}", dir.display()),
            ));
        }
        Ok(files)
    }
}
