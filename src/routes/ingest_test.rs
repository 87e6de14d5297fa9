use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;
use uuid::Uuid;

use super::*;
use crate::routes::test_support::{json_request, send};
use crate::state::test_helpers;

const BOUNDARY: &str = "textbook-boundary";

fn upload(auth: &str, field: &str, filename: &str, mime: &str, data: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
         Content-Type: {mime}\r\n\r\n\
         {data}\r\n\
         --{BOUNDARY}--\r\n"
    );
    Request::builder()
        .method("POST")
        .uri("/api/ingest")
        .header(header::AUTHORIZATION, auth)
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

#[test]
fn mime_allow_list() {
    assert!(check_mime("text/markdown").is_ok());
    assert!(check_mime("application/pdf").is_ok());
    assert!(check_mime("image/png").is_err());
}

#[tokio::test]
async fn document_upload_is_stored_as_content() {
    let state = test_helpers::test_app_state();
    let user_id = Uuid::new_v4();
    let auth = test_helpers::bearer(&state, user_id);

    let (status, body) = send(&state, upload(&auth, "file", "notes.md", "text/markdown", "# URDF basics")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Document ingested successfully");
    assert_eq!(body["filename"], "notes.md");
    assert_eq!(body["size"], 13);

    let id: Uuid = body["document_id"].as_str().unwrap().parse().unwrap();
    let stored = content_svc::get_content(&state, id).await.unwrap();
    assert_eq!(stored.content, "# URDF basics");
    assert_eq!(stored.module_type, ModuleType::Document);
    assert_eq!(stored.author_id, Some(user_id));
}

#[tokio::test]
async fn unsupported_mime_is_400() {
    let state = test_helpers::test_app_state();
    let auth = test_helpers::bearer(&state, Uuid::new_v4());
    let (status, body) = send(&state, upload(&auth, "file", "robot.png", "image/png", "PNG")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().starts_with("File type image/png not supported"));
    assert!(state.content.read().await.is_empty());
}

#[tokio::test]
async fn missing_file_field_is_400() {
    let state = test_helpers::test_app_state();
    let auth = test_helpers::bearer(&state, Uuid::new_v4());
    let (status, body) = send(&state, upload(&auth, "attachment", "a.txt", "text/plain", "hi")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Missing file field");
}

#[tokio::test]
async fn text_ingest_requires_token() {
    let state = test_helpers::test_app_state();
    let body = json!({
        "title": "Sensors",
        "content": "LiDAR and IMUs",
        "content_type": "section",
        "module_type": "humanoid",
        "order": 2
    });
    let (status, _) = send(&state, json_request("POST", "/api/ingest/text", None, Some(body.clone()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let auth = test_helpers::bearer(&state, Uuid::new_v4());
    let (status, created) = send(&state, json_request("POST", "/api/ingest/text", Some(&auth), Some(body))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], "Text content ingested successfully");
    assert_eq!(created["title"], "Sensors");
}
