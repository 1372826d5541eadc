//! File access inside the working directory.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::TemplateError;
use crate::models::AppConfig;

/// Which bitmaps a scan returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitmapScan {
    /// Templates shown to the user: hidden and ignored files left out.
    Templates,
    /// Everything the printer needs: only ignored files left out.
    Export,
}

/// Bitmap file names in `work_dir`, sorted.
pub fn scan_bitmaps(config: &AppConfig, scan: BitmapScan) -> Result<Vec<String>, TemplateError> {
    let dir = config.work_dir();
    let entries = fs::read_dir(dir).map_err(|e| TemplateError::io(dir, e))?;

    let mut files: Vec<String> = entries
        .flatten()
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.to_lowercase().ends_with(".bmp"))
        .filter(|name| !config.is_ignored(name))
        .filter(|name| scan == BitmapScan::Export || !config.is_hidden(name))
        .collect();

    files.sort();
    Ok(files)
}

/// Uppercase template code for a bitmap file name.
pub fn code_of(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_uppercase())
        .unwrap_or_default()
}

/// Read a text file, `None` when it does not exist.
pub fn read_optional(path: &Path) -> Result<Option<String>, TemplateError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(TemplateError::io(path, e)),
    }
}

/// Replace `path` with `contents` through a temp file in the same directory.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), TemplateError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| TemplateError::io(dir, e))?;
    tmp.write_all(contents)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| TemplateError::io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| TemplateError::io(path, e.error))?;
    Ok(())
}

/// Rewrite a ledger with `edit`.
///
/// A missing ledger is left alone. `edit` returns `None` when there is
/// nothing to change. Returns whether the file was written.
pub fn update_ledger<F>(path: &Path, edit: F) -> Result<bool, TemplateError>
where
    F: FnOnce(&str) -> Option<String>,
{
    let Some(current) = read_optional(path)? else {
        tracing::debug!(path = %path.display(), "Ledger missing, skipped");
        return Ok(false);
    };

    match edit(&current) {
        Some(updated) if updated != current => {
            write_atomic(path, updated.as_bytes())?;
            Ok(true)
        }
        _ => {
            tracing::debug!(path = %path.display(), "Ledger unchanged");
            Ok(false)
        }
    }
}
