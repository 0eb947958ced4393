use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::TaskStore;

/// Path of the offline cache inside the data dir
pub fn cache_path(data_dir: &Path) -> PathBuf {
    data_dir.join("cache.json")
}

/// Read the last-known-good document. Missing or corrupt cache reads as
/// absent — the caller falls back to an empty store.
pub fn read_cache(data_dir: &Path) -> Option<TaskStore> {
    let content = fs::read_to_string(cache_path(data_dir)).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write `content` to `path` atomically using a temp file + rename
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Persist the full document to the offline cache, atomically, so a crash
/// mid-write never loses the previous good copy.
pub fn write_cache(data_dir: &Path, store: &TaskStore) -> io::Result<()> {
    let content = serde_json::to_string_pretty(store)?;
    atomic_write(&cache_path(data_dir), content.as_bytes())
}
