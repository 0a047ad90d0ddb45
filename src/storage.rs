//! Whole-file access to locale and patch files.
mod fs;
mod memory;

use std::io;
use std::path::{
    Path,
    PathBuf,
};

pub use fs::FsStore;
pub use memory::MemoryStore;

/// Read/write/list collaborator used by the runner.
///
/// Implementations must be shareable across the blocking worker threads.
pub trait LocaleStore: Send + Sync {
    /// Reads a whole file. `Ok(None)` means the file does not exist.
    ///
    /// # Errors
    /// Any I/O error other than "not found".
    fn read(&self, path: &Path) -> io::Result<Option<String>>;

    /// Replaces the file contents.
    ///
    /// # Errors
    /// Any I/O error; the previous contents stay intact on failure.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Lists the regular files directly inside `dir`.
    ///
    /// # Errors
    /// `NotFound` if `dir` does not exist, or any I/O error.
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
}
