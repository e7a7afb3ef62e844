use crate::{
    config::Settings,
    progress_bar::ProgressBar,
    util::optimize::{ImageKind, downscale, encode},
};
use anyhow::{Context, Result, bail};
use fs_err as fs;
use image::ImageReader;
use indicatif::MultiProgress;
use std::{
    fmt,
    path::{Path, PathBuf},
};

pub mod backup;

pub use backup::{BackupStatus, ensure_backup};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeChange {
    pub old_size: u64,
    pub new_size: u64,
}

impl SizeChange {
    /// Bytes saved; negative when re-encoding made the file larger.
    pub fn saved(&self) -> i64 {
        self.old_size as i64 - self.new_size as i64
    }
}

#[derive(Debug, Clone)]
pub struct FileFailure {
    pub file_name: String,
    pub error: String,
}

#[derive(Debug)]
pub struct OptimizeReport {
    pub backup: BackupStatus,
    pub backup_dir: PathBuf,
    pub processed: usize,
    pub failures: Vec<FileFailure>,
    pub saved_bytes: i64,
}

impl OptimizeReport {
    pub fn saved_mb(&self) -> f64 {
        self.saved_bytes as f64 / BYTES_PER_MB
    }
}

impl fmt::Display for OptimizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Done! Processed: {}. Saved: {:.2} MB",
            self.processed,
            self.saved_mb()
        )?;
        if !self.failures.is_empty() {
            writeln!(f, "Skipped because of errors: {}", self.failures.len())?;
        }
        match self.backup {
            BackupStatus::Created { files } => write!(
                f,
                "Originals ({files} files) are kept in {}",
                self.backup_dir.display()
            ),
            BackupStatus::AlreadyPresent => write!(
                f,
                "Originals are kept in {} (backup from an earlier run)",
                self.backup_dir.display()
            ),
        }
    }
}

/// Resizes and re-encodes a single image in place, keeping its format.
pub fn optimize_file(path: &Path, settings: &Settings) -> Result<SizeChange> {
    let kind = ImageKind::from_path(path)
        .with_context(|| format!("{} is not a JPEG or PNG file", path.display()))?;

    let old_size = fs::metadata(path)?.len();

    let image = ImageReader::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("Failed to read {}", path.display()))?
        .decode()
        .with_context(|| format!("Failed to decode {}", path.display()))?;

    let image = downscale(image, settings.max_width);
    let data = encode(image, kind, settings.jpeg_quality)?;
    fs::write(path, &data)?;

    let new_size = fs::metadata(path)?.len();
    Ok(SizeChange { old_size, new_size })
}

/// Top-level JPEG and PNG files of `dir`, in directory order.
fn image_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let path = entry.path();
        if path.is_file() && ImageKind::from_path(&path).is_some() {
            files.push(path);
        }
    }

    Ok(files)
}

/// Backs up the asset directory, then optimizes every image in it.
///
/// The backup must succeed (or already exist) before any image is touched.
/// Per-file failures are logged and skipped.
pub fn run(settings: &Settings, multi_progress: MultiProgress) -> Result<OptimizeReport> {
    let source = &settings.source_dir;
    if !source.is_dir() {
        bail!("Asset directory not found: {}", source.display());
    }

    let backup = ensure_backup(source, &settings.backup_dir)
        .context("Stopping before any image is modified to avoid data loss")?;

    log::info!("Optimizing images in {}", source.display());

    let files = image_files(source)?;
    let pb = ProgressBar::new(multi_progress, "Optimizing", files.len());

    let mut processed = 0;
    let mut saved_bytes = 0;
    let mut failures = Vec::new();

    for path in files {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        pb.set_msg(&file_name);

        match optimize_file(&path, settings) {
            Ok(change) => {
                log::info!(
                    "Ok: {} ({} -> {} bytes)",
                    file_name,
                    change.old_size,
                    change.new_size
                );
                saved_bytes += change.saved();
                processed += 1;
            }
            Err(err) => {
                log::warn!("Skipping file {file_name} because it failed processing: {err:#}");
                failures.push(FileFailure {
                    file_name,
                    error: format!("{err:#}"),
                });
            }
        }

        pb.inc(1);
    }

    pb.finish();

    Ok(OptimizeReport {
        backup,
        backup_dir: settings.backup_dir.clone(),
        processed,
        failures,
        saved_bytes,
    })
}
