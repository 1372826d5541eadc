//! Template persistence: bitmap files plus both ledgers.
//!
//! A save writes `<code>.bmp`, then refreshes the code's block pair in the
//! program ledger and its copy directive in the auto-run ledger. Steps are
//! not rolled back: if a ledger write fails after the bitmap was written, the
//! error is returned and logged and the bitmap stays.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::borrow::Cow;
use std::fs;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::TemplateError;
use crate::ledger;
use crate::models::{AppConfig, Placement, TemplateCode, TemplateSummary};
use crate::services::categories::category_for;
use crate::services::workspace::{
    code_of, read_optional, scan_bitmaps, update_ledger, write_atomic, BitmapScan,
};
use mono_bmp::MonoEncoder;

/// Input of [`TemplateStore::save`].
#[derive(Debug, Clone, Default)]
pub struct SaveTemplate {
    pub code: String,
    /// Encoded source image (PNG, JPEG, GIF, BMP, WebP). `None` keeps the
    /// bitmap already on disk. An image of exactly the label size is taken
    /// as already cropped: `crop_top` is then only recorded.
    pub image: Option<Vec<u8>>,
    pub position_x: Option<u32>,
    pub position_y: Option<u32>,
    pub crop_top: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct SaveReport {
    pub code: TemplateCode,
    pub placement: Placement,
    pub bitmap_written: bool,
    pub program_ledger_updated: bool,
    pub autorun_ledger_updated: bool,
}

#[derive(Debug, Clone)]
pub struct DeleteReport {
    pub code: TemplateCode,
    pub bitmap_removed: bool,
    pub program_ledger_updated: bool,
    pub autorun_ledger_updated: bool,
}

/// Decode the `imageData` field sent by the editor.
///
/// A `data:image/...;base64,` URL yields the decoded bytes. Anything else
/// (typically the current file name echoed back) yields `None`.
pub fn decode_image_payload(raw: &str) -> Result<Option<Vec<u8>>, TemplateError> {
    if !raw.starts_with("data:image") {
        return Ok(None);
    }

    let (_, data) = raw.split_once(";base64,").ok_or_else(|| {
        TemplateError::InvalidParameter("image data URL is not base64 encoded".to_string())
    })?;

    STANDARD
        .decode(data.trim())
        .map(Some)
        .map_err(|e| TemplateError::InvalidParameter(format!("invalid base64 image data: {e}")))
}

pub struct TemplateStore {
    config: Arc<AppConfig>,
    encoder: MonoEncoder,
    write_lock: Mutex<()>,
}

impl TemplateStore {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            encoder: MonoEncoder::new(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Create or update a template.
    pub fn save(&self, request: SaveTemplate) -> Result<SaveReport, TemplateError> {
        let code = TemplateCode::parse(&request.code)?;
        let defaults = self.config.placement_defaults;
        let placement = Placement {
            position_x: request.position_x.unwrap_or(defaults.x),
            position_y: request.position_y.unwrap_or(defaults.y),
            crop_top: request.crop_top.unwrap_or(0),
        };
        let file_name = code.file_name();

        // Decode and quantize before taking the lock
        let bitmap = match request.image {
            Some(bytes) => {
                let source = image::load_from_memory(&bytes).map_err(|e| {
                    TemplateError::InvalidParameter(format!("unreadable image: {e}"))
                })?;
                // A label-sized upload was cropped by the editor already
                let crop_top = if (source.width(), source.height()) == self.encoder.canvas_size() {
                    tracing::debug!(
                        code = %code,
                        crop_top = placement.crop_top,
                        "Image already label-sized, crop not reapplied"
                    );
                    0
                } else {
                    placement.crop_top
                };
                Some(self.encoder.encode(&source, crop_top)?)
            }
            None => None,
        };

        let _guard = self.lock();

        let bitmap_written = match bitmap {
            Some(bytes) => {
                let path = self.config.path(&file_name);
                write_atomic(&path, &bytes)?;
                tracing::info!(code = %code, path = %path.display(), bytes = bytes.len(), "Saved bitmap");
                true
            }
            None => false,
        };

        let program = ledger::program_block(code.as_str(), placement.position_x, placement.position_y);
        let init = ledger::init_block(code.as_str(), placement.crop_top);

        let program_ledger_updated = self
            .update_ledger_logged(&code, self.config.program_ledger_path(), |text| {
                Some(ledger::upsert_block(text, code.as_str(), &program, &init))
            })?;

        let autorun_ledger_updated = self
            .update_ledger_logged(&code, self.config.autorun_ledger_path(), |text| {
                ledger::add_copy_directive(text, &file_name)
            })?;

        tracing::info!(
            code = %code,
            x = placement.position_x,
            y = placement.position_y,
            crop_top = placement.crop_top,
            bitmap_written,
            program_ledger_updated,
            autorun_ledger_updated,
            "Template saved"
        );

        Ok(SaveReport {
            code,
            placement,
            bitmap_written,
            program_ledger_updated,
            autorun_ledger_updated,
        })
    }

    /// Remove a template's bitmap and every ledger entry referencing it.
    pub fn delete(&self, raw_code: &str) -> Result<DeleteReport, TemplateError> {
        let code = TemplateCode::parse(raw_code)?;
        let file_name = code.file_name();

        let _guard = self.lock();

        let path = self.config.path(&file_name);
        let bitmap_removed = match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Deleted bitmap");
                true
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No bitmap to delete");
                false
            }
            Err(e) => return Err(TemplateError::io(path, e)),
        };

        let program_ledger_updated = self
            .update_ledger_logged(&code, self.config.program_ledger_path(), |text| {
                match ledger::remove_block(text, code.as_str()) {
                    Cow::Borrowed(_) => None,
                    Cow::Owned(updated) => Some(updated),
                }
            })?;

        let autorun_ledger_updated = self
            .update_ledger_logged(&code, self.config.autorun_ledger_path(), |text| {
                ledger::remove_copy_directive(text, &file_name)
            })?;

        tracing::info!(
            code = %code,
            bitmap_removed,
            program_ledger_updated,
            autorun_ledger_updated,
            "Template deleted"
        );

        Ok(DeleteReport {
            code,
            bitmap_removed,
            program_ledger_updated,
            autorun_ledger_updated,
        })
    }

    /// Templates on disk with the placement recorded in the program ledger.
    pub fn list(&self) -> Result<Vec<TemplateSummary>, TemplateError> {
        let files = scan_bitmaps(&self.config, BitmapScan::Templates)?;
        let recorded = read_optional(&self.config.program_ledger_path())?
            .map(|text| ledger::recorded_placements(&text))
            .unwrap_or_default();
        let defaults = Placement::from_defaults(self.config.placement_defaults);

        let mut templates: Vec<TemplateSummary> = files
            .into_iter()
            .map(|file| {
                let code = code_of(&file);
                let category = category_for(&self.config, &code);
                let meta = recorded.get(&code).copied().unwrap_or_default();
                let (position_x, position_y) = meta
                    .position
                    .unwrap_or((defaults.position_x, defaults.position_y));

                TemplateSummary {
                    name: format!("{category} {code}"),
                    category,
                    image_data: file,
                    position_x,
                    position_y,
                    crop_top: meta.crop_top.unwrap_or(defaults.crop_top),
                    is_existing: true,
                    code,
                }
            })
            .collect();

        templates.sort_by(|a, b| a.code.cmp(&b.code));
        tracing::debug!(count = templates.len(), "Listed templates");
        Ok(templates)
    }

    fn update_ledger_logged<F>(
        &self,
        code: &TemplateCode,
        path: std::path::PathBuf,
        edit: F,
    ) -> Result<bool, TemplateError>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        update_ledger(&path, edit).inspect_err(|e| {
            tracing::warn!(code = %code, error = %e, "Ledger update failed, earlier steps kept");
        })
    }
}
