use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::services::CatalogBuilder;

/// Response from catalog generation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateManualResponse {
    pub success: bool,
    pub message: String,
    /// Generated document, relative to the working directory
    pub file_path: String,
    pub total_templates: usize,
}

/// Regenerate the template catalog
///
/// Rebuilds the catalogue section of the manual from the bitmaps on disk.
#[utoipa::path(
    post,
    path = "/api/generate-manual",
    responses(
        (status = 200, description = "Catalog written", body = GenerateManualResponse),
        (status = 404, description = "Manual source document missing"),
    ),
    tag = "Catalog"
)]
pub async fn handle_generate_manual(
    State(catalog): State<Arc<CatalogBuilder>>,
) -> Result<Json<GenerateManualResponse>, ApiError> {
    let report = tokio::task::spawn_blocking(move || catalog.generate()).await??;

    Ok(Json(GenerateManualResponse {
        success: true,
        message: format!(
            "Manuel généré avec succès : {} templates",
            report.total_templates
        ),
        file_path: report.file_path,
        total_templates: report.total_templates,
    }))
}
