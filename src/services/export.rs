//! Copy bitmaps and ledgers to a USB drive for the printer.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::error::TemplateError;
use crate::models::AppConfig;
use crate::services::workspace::{scan_bitmaps, BitmapScan};

/// FAT stores modification times with 2 s resolution.
const MTIME_TOLERANCE: Duration = Duration::from_secs(2);

/// Where an export goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    /// Root of a Windows drive, e.g. `E:/`
    Drive(char),
    Directory(PathBuf),
}

impl ExportTarget {
    /// Parse a drive letter such as `e`, `E:` or `E:\`.
    pub fn drive(raw: &str) -> Result<Self, TemplateError> {
        let letters: Vec<char> = raw
            .to_uppercase()
            .chars()
            .filter(|c| c.is_ascii_uppercase())
            .collect();

        match letters.as_slice() {
            [letter] => Ok(ExportTarget::Drive(*letter)),
            [] => Err(TemplateError::InvalidParameter(
                "drive letter is required".to_string(),
            )),
            _ => Err(TemplateError::InvalidParameter(format!(
                "invalid drive letter {raw:?} (A-Z)"
            ))),
        }
    }

    pub fn path(&self) -> PathBuf {
        match self {
            ExportTarget::Drive(letter) => PathBuf::from(format!("{letter}:/")),
            ExportTarget::Directory(dir) => dir.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub copied: usize,
    pub skipped: usize,
    /// One message per file that could not be copied
    pub errors: Vec<String>,
}

pub struct UsbExporter {
    config: Arc<AppConfig>,
}

impl UsbExporter {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    /// Files to copy: exportable bitmaps, both ledgers, then the extra files.
    pub fn manifest(&self) -> Result<Vec<String>, TemplateError> {
        let config = &self.config;
        let mut files = scan_bitmaps(config, BitmapScan::Export)?;
        files.push(config.autorun_ledger.clone());
        files.push(config.program_ledger.clone());
        files.extend(config.export.extra_files.iter().cloned());
        Ok(files)
    }

    pub fn export(&self, target: &ExportTarget) -> Result<ExportReport, TemplateError> {
        let dest = target.path();
        ensure_writable_dir(&dest)?;

        let mut report = ExportReport::default();
        for file in self.manifest()? {
            let src = self.config.path(&file);
            if !src.exists() {
                tracing::debug!(file = %file, "Not in working directory, skipped");
                continue;
            }

            match copy_if_modified(&src, &dest.join(&file)) {
                Ok(true) => {
                    tracing::debug!(file = %file, "Copied");
                    report.copied += 1;
                }
                Ok(false) => report.skipped += 1,
                Err(e) => {
                    tracing::warn!(file = %file, error = %e, "Copy failed");
                    report.errors.push(format!("{file}: {e}"));
                }
            }
        }

        tracing::info!(
            dest = %dest.display(),
            copied = report.copied,
            skipped = report.skipped,
            errors = report.errors.len(),
            "USB export finished"
        );
        Ok(report)
    }
}

fn ensure_writable_dir(dest: &Path) -> Result<(), TemplateError> {
    let unusable = || {
        TemplateError::InvalidParameter(format!(
            "{} is not accessible or not writable",
            dest.display()
        ))
    };

    if !dest.is_dir() {
        return Err(unusable());
    }
    tempfile::tempfile_in(dest).map_err(|_| unusable())?;
    Ok(())
}

/// Copy unless `dest` has the same size and `src` is not newer.
fn copy_if_modified(src: &Path, dest: &Path) -> std::io::Result<bool> {
    if let Ok(dest_meta) = fs::metadata(dest) {
        let src_meta = fs::metadata(src)?;
        let newer = match src_meta.modified()?.duration_since(dest_meta.modified()?) {
            Ok(ahead) => ahead > MTIME_TOLERANCE,
            Err(_) => false,
        };
        if src_meta.len() == dest_meta.len() && !newer {
            return Ok(false);
        }
    }

    fs::copy(src, dest)?;
    Ok(true)
}
