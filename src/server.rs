//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::api;
use crate::assets::AssetLoader;
use crate::models::AppConfig;
use crate::services::{CatalogBuilder, TemplateStore, UsbExporter};

/// Request body limit for template uploads. Phone photos sent as base64 data
/// URLs easily exceed axum's 2 MB default.
pub const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<TemplateStore>,
    pub catalog: Arc<CatalogBuilder>,
    pub exporter: Arc<UsbExporter>,
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<TemplateStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Arc<CatalogBuilder> {
    fn from_ref(state: &AppState) -> Self {
        state.catalog.clone()
    }
}

impl FromRef<AppState> for Arc<UsbExporter> {
    fn from_ref(state: &AppState) -> Self {
        state.exporter.clone()
    }
}

/// Create application state from an asset loader and a loaded config.
pub fn create_app_state(asset_loader: Arc<AssetLoader>, config: AppConfig) -> AppState {
    let config = Arc::new(config);

    AppState {
        store: Arc::new(TemplateStore::new(config.clone())),
        catalog: Arc::new(CatalogBuilder::new(config.clone(), asset_loader)),
        exporter: Arc::new(UsbExporter::new(config.clone())),
        config,
    }
}

/// Build the router with all endpoints and middleware.
///
/// Paths without a route are served from the working directory, so the
/// editor can load bitmaps and the generated catalog.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    let static_files = ServeDir::new(state.config.work_dir());

    Router::new()
        .route("/", get(api::handle_index))
        .route(
            "/api/save-template",
            post(api::handle_save_template).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/delete-template", post(api::handle_delete_template))
        .route("/api/list-templates", get(api::handle_list_templates))
        .route("/api/generate-manual", post(api::handle_generate_manual))
        .route("/prepare-usb", post(api::handle_prepare_usb))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .fallback_service(static_files)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
