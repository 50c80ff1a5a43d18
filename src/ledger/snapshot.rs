//! Snapshot file I/O
//!
//! The snapshot is a flat JSON object mapping user id to total XP, written
//! after every grant. Loads distinguish a missing file (empty ledger) from
//! a corrupt one (error the caller must surface). Saves go through a temp
//! file, fsync and rename under an exclusive lock, so a crash mid-write
//! never destroys the previous snapshot.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use fs2::FileExt;
use indexmap::IndexMap;

use crate::domain::UserId;

/// Read the snapshot; a missing file yields an empty mapping.
pub fn read_snapshot(path: &Path) -> Result<IndexMap<UserId, u64>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(IndexMap::new()),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to read snapshot file: {}", path.display()));
        }
    };

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse snapshot file: {}", path.display()))
}

/// Write the full snapshot with atomic rename and file locking.
pub fn write_snapshot(path: &Path, entries: &IndexMap<UserId, u64>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create snapshot directory: {}", parent.display())
            })?;
        }
    }

    let content = serde_json::to_string(entries).context("Failed to serialize snapshot")?;

    // Lock file is separate from the snapshot so the rename below never
    // swaps the file a peer process is holding the lock on
    let lock_path = path.with_extension("json.lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

    lock_file
        .lock_exclusive()
        .context("Failed to acquire snapshot lock")?;

    let temp_path = path.with_extension("json.tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write snapshot content")?;

    temp_file.sync_all().context("Failed to sync snapshot file")?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename snapshot file: {}", path.display()))?;

    // Lock released when lock_file drops
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_snapshot_is_empty() {
        let dir = tempdir().expect("Failed to create temp dir");
        let entries = read_snapshot(&dir.path().join("xp.json")).expect("read should succeed");
        assert!(entries.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("xp.json");

        let mut entries = IndexMap::new();
        entries.insert(UserId::new("1001"), 250);
        entries.insert(UserId::new("1002"), 50);

        write_snapshot(&path, &entries).expect("write should succeed");
        let loaded = read_snapshot(&path).expect("read should succeed");
        assert_eq!(loaded, entries);
    }

    #[test]
    fn test_flat_json_object_loads() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("xp.json");
        std::fs::write(&path, r#"{"111": 250, "222": 50}"#).expect("Failed to write file");

        let entries = read_snapshot(&path).expect("read should succeed");
        assert_eq!(entries.get(&UserId::new("111")), Some(&250));
        assert_eq!(entries.get(&UserId::new("222")), Some(&50));
    }

    #[test]
    fn test_malformed_snapshot_is_an_error() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("xp.json");
        std::fs::write(&path, "not json at all").expect("Failed to write file");

        let err = read_snapshot(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse snapshot file"));
    }

    #[test]
    fn test_write_replaces_previous_snapshot() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("xp.json");

        let mut first = IndexMap::new();
        first.insert(UserId::new("1001"), 50);
        write_snapshot(&path, &first).expect("write should succeed");

        let mut second = IndexMap::new();
        second.insert(UserId::new("1001"), 100);
        write_snapshot(&path, &second).expect("write should succeed");

        let loaded = read_snapshot(&path).expect("read should succeed");
        assert_eq!(loaded.get(&UserId::new("1001")), Some(&100));
    }
}
