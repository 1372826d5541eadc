//! Server integration tests: routing, static files and middleware.

mod common;

use axum::{body::Body, http::Request, http::StatusCode};
use common::TestApp;
use std::sync::Arc;

use labeldeck::assets::AssetLoader;
use labeldeck::models::AppConfig;
use labeldeck::server::{build_router, create_app_state};

#[tokio::test]
async fn test_health() {
    let app = TestApp::empty();
    let response = app.get("/health").await;
    common::assert_ok(&response);
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_index_page_served_from_work_dir() {
    let app = TestApp::empty();
    app.write("template_manager.html", "<html>editor</html>");

    let response = app.get("/").await;
    common::assert_ok(&response);
    assert_eq!(response.text(), "<html>editor</html>");
    let content_type = response.headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
}

#[tokio::test]
async fn test_index_page_missing() {
    let app = TestApp::empty();
    common::assert_error(&app.get("/").await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bitmaps_served_as_static_files() {
    let app = TestApp::new();
    common::assert_ok(&app.save_template("BAR9", 30, 30).await);

    let response = app.get("/bar9.bmp").await;
    common::assert_ok(&response);
    common::assert_printer_bmp(response.bytes());
}

#[tokio::test]
async fn test_unknown_static_file_is_404() {
    let app = TestApp::empty();
    let response = app.get("/missing.bmp").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = TestApp::empty();

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/save-template")
        .header("Origin", "http://localhost:8080")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.request(request).await;

    common::assert_ok(&response);
    assert_eq!(
        response
            .headers
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

/// Start a real server on an ephemeral port and hit it over TCP.
#[tokio::test]
async fn test_real_server_health() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let dir = tempfile::TempDir::new().unwrap();
    let state = create_app_state(
        Arc::new(AssetLoader::new(None, None)),
        AppConfig::default().with_work_dir(dir.path()),
    );
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    let mut stream = tokio::net::TcpStream::connect(("127.0.0.1", port))
        .await
        .expect("Failed to connect");
    stream
        .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    assert!(response.starts_with("HTTP/1.1 200 OK"), "{response}");
    assert!(response.ends_with("OK"));
}
