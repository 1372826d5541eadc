//! End-to-end flow tests covering complete user scenarios.

mod common;

use common::{count, fixtures, TestApp};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn test_complete_template_lifecycle() {
    let app = TestApp::new();

    // Step 1: create two templates
    common::assert_success(&app.save_template("PRO1", 200, 100).await);
    common::assert_success(&app.save_template("PR2", 100, 200).await);

    // Step 2: both listed with defaults
    let list: Vec<serde_json::Value> = app.get("/api/list-templates").await.json();
    let codes: Vec<&str> = list.iter().map(|t| t["code"].as_str().unwrap()).collect();
    assert_eq!(codes, vec!["PR2", "PRO1"]);
    assert!(list.iter().all(|t| t["category"] == "PROMO"));

    // Step 3: move one, the listing reflects the ledger
    let response = app
        .post_json(
            "/api/save-template",
            &json!({ "code": "PRO1", "imageData": "pro1.bmp", "positionX": 5, "positionY": 6 }),
        )
        .await;
    common::assert_success(&response);
    let list: Vec<serde_json::Value> = app.get("/api/list-templates").await.json();
    assert_eq!(list[1]["positionX"], 5);
    assert_eq!(list[1]["positionY"], 6);

    // Step 4: catalog groups PR and PRO under the longer prefix
    let json: serde_json::Value = app.post_raw("/api/generate-manual", "").await.json();
    assert_eq!(json["totalTemplates"], 2);
    let html = app.read(fixtures::CATALOG_NAME);
    assert!(html.contains("💰 PROMO (PRO) - 2 modèles"));

    // Step 5: export
    let usb = TempDir::new().unwrap();
    let json: serde_json::Value = app
        .post_json("/prepare-usb", &json!({ "destination": usb.path() }))
        .await
        .json();
    assert_eq!(json["success"], true);
    assert!(usb.path().join("pro1.bmp").exists());
    assert!(usb.path().join("pr2.bmp").exists());

    // Step 6: delete one, the other survives everywhere
    common::assert_success(
        &app.post_json("/api/delete-template", &json!({ "code": "PRO1" }))
            .await,
    );
    let program = app.read(fixtures::PROGRAM_LEDGER_NAME);
    assert_eq!(count(&program, "PRO1."), 0);
    assert_eq!(count(&program, "DOWNLOAD F,\"PR2.BAS\""), 1);
    let auto = app.read(fixtures::AUTORUN_LEDGER_NAME);
    assert!(!auto.contains("pro1.bmp"));
    assert!(auto.contains("\tCOPY E,\"pr2.bmp\" ,F,\"pr2.bmp\"\r\n"));

    let list: Vec<serde_json::Value> = app.get("/api/list-templates").await.json();
    assert_eq!(list.len(), 1);
}

#[tokio::test]
async fn test_delete_then_save_leaves_latest_only() {
    let app = TestApp::new();

    common::assert_success(
        &app.post_json("/api/delete-template", &json!({ "code": "BAR1" }))
            .await,
    );
    let response = app
        .post_json(
            "/api/save-template",
            &json!({
                "code": "BAR1",
                "imageData": fixtures::png_data_url(10, 10),
                "positionX": 77,
            }),
        )
        .await;
    common::assert_success(&response);

    let program = app.read(fixtures::PROGRAM_LEDGER_NAME);
    assert_eq!(count(&program, "DOWNLOAD F,\"BAR1.BAS\""), 1);
    assert!(program.contains("PUTBMP 77, 22"));
    assert!(!program.contains("PUTBMP 8, 30"));
    assert_eq!(
        count(&app.read(fixtures::AUTORUN_LEDGER_NAME), "\"bar1.bmp\" ,F"),
        1
    );
}
