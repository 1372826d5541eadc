use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::TemplateSummary;
use crate::services::{decode_image_payload, SaveTemplate, TemplateStore};

/// Request body for saving a template
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveTemplateRequest {
    /// Template code, letters and digits
    pub code: String,
    /// Display name (informational)
    #[serde(default)]
    pub name: Option<String>,
    /// `data:image/...;base64,...` to replace the bitmap, or the current
    /// file name to keep it
    #[serde(default)]
    pub image_data: Option<String>,
    #[serde(default)]
    pub position_x: Option<u32>,
    #[serde(default)]
    pub position_y: Option<u32>,
    /// Rows removed from the top of the source image
    #[serde(default)]
    pub crop_top: Option<u32>,
}

/// Request body for deleting a template
#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteTemplateRequest {
    pub code: String,
}

/// Outcome of a template mutation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

/// Create or update a template
///
/// Quantizes the uploaded image to a 320x300 1-bit BMP and refreshes the
/// template's entries in both printer ledgers.
#[utoipa::path(
    post,
    path = "/api/save-template",
    request_body = SaveTemplateRequest,
    responses(
        (status = 200, description = "Template saved", body = ActionResponse),
        (status = 400, description = "Invalid code, image or crop value"),
        (status = 500, description = "Write failure"),
    ),
    tag = "Templates"
)]
pub async fn handle_save_template(
    State(store): State<Arc<TemplateStore>>,
    Json(request): Json<SaveTemplateRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    tracing::debug!(
        code = %request.code,
        name = ?request.name,
        has_image = request.image_data.as_deref().is_some_and(|d| d.starts_with("data:")),
        "Save template request"
    );

    let report = tokio::task::spawn_blocking(move || {
        let image = match request.image_data.as_deref() {
            Some(raw) => decode_image_payload(raw)?,
            None => None,
        };
        store.save(SaveTemplate {
            code: request.code,
            image,
            position_x: request.position_x,
            position_y: request.position_y,
            crop_top: request.crop_top,
        })
    })
    .await??;

    Ok(Json(ActionResponse {
        success: true,
        message: format!("Template {} integrated successfully.", report.code),
    }))
}

/// Delete a template
///
/// Removes the bitmap and every ledger entry for the code.
#[utoipa::path(
    post,
    path = "/api/delete-template",
    request_body = DeleteTemplateRequest,
    responses(
        (status = 200, description = "Template deleted", body = ActionResponse),
        (status = 400, description = "Invalid code"),
    ),
    tag = "Templates"
)]
pub async fn handle_delete_template(
    State(store): State<Arc<TemplateStore>>,
    Json(request): Json<DeleteTemplateRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let report = tokio::task::spawn_blocking(move || store.delete(&request.code)).await??;

    Ok(Json(ActionResponse {
        success: true,
        message: format!("Template {} deleted completely.", report.code),
    }))
}

/// List templates
///
/// Scans the bitmaps in the working directory and joins the placement
/// recorded in the program ledger.
#[utoipa::path(
    get,
    path = "/api/list-templates",
    responses(
        (status = 200, description = "Templates on disk", body = [TemplateSummary]),
    ),
    tag = "Templates"
)]
pub async fn handle_list_templates(
    State(store): State<Arc<TemplateStore>>,
) -> Result<Json<Vec<TemplateSummary>>, ApiError> {
    let templates = tokio::task::spawn_blocking(move || store.list()).await??;
    Ok(Json(templates))
}
