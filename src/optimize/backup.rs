use anyhow::{Context, Result};
use fs_err as fs;
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupStatus {
    /// The source tree was copied during this run
    Created { files: u64 },
    /// A backup directory was already present and was left untouched
    AlreadyPresent,
}

/// Recursively copies `src` into `dst`, following symlinks.
///
/// Returns the number of files copied.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<u64> {
    let mut files = 0;

    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.with_context(|| format!("Failed to walk {}", src.display()))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .with_context(|| format!("{} is outside {}", entry.path().display(), src.display()))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            files += 1;
        }
    }

    Ok(files)
}

/// Makes sure a copy of `source` exists at `backup` before anything in
/// `source` is modified.
///
/// An existing `backup` path is trusted as-is: its contents are not compared
/// against `source`, so an incomplete backup from an earlier run goes
/// unnoticed.
pub fn ensure_backup(source: &Path, backup: &Path) -> Result<BackupStatus> {
    if backup.exists() {
        log::warn!(
            "Backup folder {} already exists, skipping the copy so the old backup is not overwritten",
            backup.display()
        );
        return Ok(BackupStatus::AlreadyPresent);
    }

    log::info!("Creating backup in {}", backup.display());
    let files = copy_dir_recursive(source, backup).with_context(|| {
        format!(
            "Failed to back up {} to {}",
            source.display(),
            backup.display()
        )
    })?;
    log::info!("Backup created: {} files copied", files);

    Ok(BackupStatus::Created { files })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_copies_files_and_subdirectories() {
        let root = tempdir().unwrap();
        let source = root.path().join("assets");
        fs::create_dir_all(source.join("icons")).unwrap();
        fs::write(source.join("a.jpg"), b"aaa").unwrap();
        fs::write(source.join("icons/b.png"), b"bbb").unwrap();

        let backup = root.path().join("assets_BACKUP");
        let status = ensure_backup(&source, &backup).unwrap();

        assert_eq!(status, BackupStatus::Created { files: 2 });
        assert_eq!(fs::read(backup.join("a.jpg")).unwrap(), b"aaa");
        assert_eq!(fs::read(backup.join("icons/b.png")).unwrap(), b"bbb");
    }

    #[test]
    fn test_copies_empty_directory() {
        let root = tempdir().unwrap();
        let source = root.path().join("assets");
        fs::create_dir_all(&source).unwrap();

        let backup = root.path().join("assets_BACKUP");
        let status = ensure_backup(&source, &backup).unwrap();

        assert_eq!(status, BackupStatus::Created { files: 0 });
        assert!(backup.is_dir());
    }

    #[test]
    fn test_existing_backup_is_left_alone() {
        let root = tempdir().unwrap();
        let source = root.path().join("assets");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("new.jpg"), b"new").unwrap();

        let backup = root.path().join("assets_BACKUP");
        fs::create_dir_all(&backup).unwrap();
        fs::write(backup.join("old.jpg"), b"old").unwrap();

        let status = ensure_backup(&source, &backup).unwrap();

        assert_eq!(status, BackupStatus::AlreadyPresent);
        assert!(!backup.join("new.jpg").exists());
        assert_eq!(fs::read(backup.join("old.jpg")).unwrap(), b"old");
    }

    #[test]
    fn test_copy_failure_is_reported() {
        let root = tempdir().unwrap();
        let source = root.path().join("assets");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("a.jpg"), b"aaa").unwrap();

        // A regular file where a parent directory is needed
        let blocker = root.path().join("blocker");
        fs::write(&blocker, b"").unwrap();

        let err = ensure_backup(&source, &blocker.join("backup")).unwrap_err();

        assert!(err.to_string().contains("Failed to back up"));
    }
}
