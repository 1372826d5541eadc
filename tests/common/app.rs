//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use labeldeck::assets::AssetLoader;
use labeldeck::models::AppConfig;
use labeldeck::server::{build_router, create_app_state, AppState};

use super::fixtures;

/// Test application backed by a temporary working directory
pub struct TestApp {
    router: axum::Router,
    pub state: AppState,
    /// Dropped (and deleted) with the app
    pub work_dir: TempDir,
}

impl TestApp {
    /// Working directory seeded with both ledgers and the manual source
    pub fn new() -> Self {
        let app = Self::empty();
        app.write(fixtures::PROGRAM_LEDGER_NAME, fixtures::PROGRAM_LEDGER);
        app.write(fixtures::AUTORUN_LEDGER_NAME, fixtures::AUTORUN_LEDGER);
        app.write(fixtures::MANUAL_NAME, fixtures::MANUAL);
        app
    }

    /// Empty working directory, embedded assets only
    pub fn empty() -> Self {
        let work_dir = TempDir::new().expect("Failed to create temp dir");
        let config = AppConfig::default().with_work_dir(work_dir.path());
        let asset_loader = Arc::new(AssetLoader::new(None, None));

        let state = create_app_state(asset_loader, config);
        let router = build_router(state.clone());

        Self {
            router,
            state,
            work_dir,
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.work_dir.path().join(name)
    }

    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) {
        fs::write(self.path(name), contents).expect("Failed to write fixture");
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).expect("Failed to read file")
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path(name).exists()
    }

    pub fn dir(&self) -> &Path {
        self.work_dir.path()
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> TestResponse {
        self.post_raw(path, &body.to_string()).await
    }

    /// Make a POST request with a raw JSON body
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// Send a request to the router
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Save a template through the API with a generated image
    pub async fn save_template(&self, code: &str, width: u32, height: u32) -> TestResponse {
        let body = serde_json::json!({
            "code": code,
            "name": format!("Test {code}"),
            "imageData": fixtures::png_data_url(width, height),
        });
        self.post_json("/api/save-template", &body).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }
}
