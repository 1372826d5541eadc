use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::AppConfig;

/// Serve the template editor page from the working directory.
pub async fn handle_index(State(config): State<Arc<AppConfig>>) -> Result<Html<String>, ApiError> {
    let path = config.path(&config.index_page);
    match tokio::fs::read_to_string(&path).await {
        Ok(page) => Ok(Html(page)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ApiError::NotFound(format!("{} not found", config.index_page)))
        }
        Err(e) => Err(ApiError::Internal(format!("{}: {e}", path.display()))),
    }
}
