//! Filesystem store with atomic replacement.

use std::io::{
    self,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};

use ignore::{
    DirEntry,
    WalkBuilder,
};
use tempfile::NamedTempFile;

use super::LocaleStore;

/// Reads and writes real files.
///
/// Writes go to a temporary file next to the target which is then renamed over
/// it, so readers never observe a half-written document.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl FsStore {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl LocaleStore for FsStore {
    fn read(&self, path: &Path) -> io::Result<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        let path = resolve_link(path)?;
        let path = path.as_path();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.as_file().sync_all()?;

        // temp files are created 0600; keep the mode of the file being replaced
        if let Ok(metadata) = std::fs::metadata(path) {
            tmp.as_file().set_permissions(metadata.permissions())?;
        }

        tmp.persist(path).map_err(|e| e.error)?;
        tracing::trace!(path = %path.display(), bytes = contents.len(), "Wrote file");
        Ok(())
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory not found: {}", dir.display()),
            ));
        }

        let mut found_files: Vec<PathBuf> = WalkBuilder::new(dir)
            .max_depth(Some(1))
            .hidden(false)
            .git_ignore(true)
            .git_exclude(true)
            .follow_links(false)
            .build()
            .filter_map(|result| file_entry(dir, result))
            .collect();

        found_files.sort();
        Ok(found_files)
    }
}

/// Path of a regular file from the walk. Unreadable entries are logged and skipped.
fn file_entry(dir: &Path, result: Result<DirEntry, ignore::Error>) -> Option<PathBuf> {
    match result {
        Ok(entry) => {
            // follows symlinks, so linked locale files are listed too
            let path = entry.into_path();
            path.is_file().then_some(path)
        }
        Err(err) => {
            tracing::warn!(dir = %dir.display(), error = %err, "Skipping unreadable directory entry");
            None
        }
    }
}

/// The file a write should replace. A symlinked locale file is written
/// through to its target so the link itself survives.
fn resolve_link(path: &Path) -> io::Result<PathBuf> {
    match std::fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => std::fs::canonicalize(path),
        _ => Ok(path.to_path_buf()),
    }
}
