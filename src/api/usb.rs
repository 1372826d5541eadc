use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::services::{ExportTarget, UsbExporter};

/// Request body for USB preparation
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrepareUsbRequest {
    /// Drive letter such as `E` or `e:`
    #[serde(default)]
    pub drive_letter: Option<String>,
    /// Explicit destination directory, takes precedence over the drive letter
    #[serde(default)]
    pub destination: Option<String>,
}

/// Response from USB preparation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PrepareUsbResponse {
    pub success: bool,
    pub message: String,
    pub copied: usize,
    pub skipped: usize,
    /// Per-file copy errors, `null` when there were none
    pub details: Option<Vec<String>>,
}

/// Copy templates and ledgers to a USB drive
///
/// Files already present with the same size and an equal or newer timestamp
/// are skipped.
#[utoipa::path(
    post,
    path = "/prepare-usb",
    request_body = PrepareUsbRequest,
    responses(
        (status = 200, description = "Export finished", body = PrepareUsbResponse),
        (status = 400, description = "Missing, invalid or unwritable destination"),
    ),
    tag = "Export"
)]
pub async fn handle_prepare_usb(
    State(exporter): State<Arc<UsbExporter>>,
    Json(request): Json<PrepareUsbRequest>,
) -> Result<Json<PrepareUsbResponse>, ApiError> {
    let target = match request.destination.filter(|d| !d.trim().is_empty()) {
        Some(dir) => ExportTarget::Directory(PathBuf::from(dir)),
        None => ExportTarget::drive(request.drive_letter.as_deref().unwrap_or_default())?,
    };

    let report = tokio::task::spawn_blocking(move || exporter.export(&target)).await??;

    Ok(Json(PrepareUsbResponse {
        success: true,
        message: format!(
            "Clé USB mise à jour ! ({} copiés, {} ignorés)",
            report.copied, report.skipped
        ),
        copied: report.copied,
        skipped: report.skipped,
        details: (!report.errors.is_empty()).then_some(report.errors),
    }))
}
