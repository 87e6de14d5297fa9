use std::time::Duration;

use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::routes::test_support::{json_request, send};
use crate::state::test_helpers;

#[tokio::test]
async fn languages_are_public() {
    let state = test_helpers::test_app_state();
    let (status, body) = send(&state, json_request("GET", "/api/translation/languages", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    let codes: Vec<&str> = body.as_array().unwrap().iter().map(|l| l["language_code"].as_str().unwrap()).collect();
    assert_eq!(codes, ["en", "ur"]);
}

#[tokio::test]
async fn direct_translation_defaults_to_urdu() {
    let state = test_helpers::test_app_state();
    let uri = "/api/translation/translate?content=Use%20%60ros2%20run%60%20here.";
    let (status, _) = send(&state, json_request("POST", uri, None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let auth = test_helpers::bearer(&state, Uuid::new_v4());
    let (status, translated) = send(&state, json_request("POST", uri, Some(&auth), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(translated, Value::String("(UR TRANSLATION)\n\nUse `ros2 run` here.".into()));
}

#[tokio::test]
async fn direct_translation_reads_query_parameters() {
    let state = test_helpers::test_app_state();
    let auth = test_helpers::bearer(&state, Uuid::new_v4());
    let uri = "/api/translation/translate?content=Hello&target_lang=fr";
    let (status, translated) = send(&state, json_request("POST", uri, Some(&auth), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(translated, "(FR TRANSLATION) Hello");

    let uri = "/api/translation/translate?content=%60a%60%20%7BINLINE_CODE_0%7D&target_lang=ur&preserve_formatting=false";
    let (_, raw) = send(&state, json_request("POST", uri, Some(&auth), None)).await;
    assert_eq!(raw, "(UR TRANSLATION)\n\n`a` {INLINE_CODE_0}");
}

#[tokio::test]
async fn direct_translation_requires_content() {
    let state = test_helpers::test_app_state();
    let auth = test_helpers::bearer(&state, Uuid::new_v4());
    let (status, _) = send(&state, json_request("POST", "/api/translation/translate?target_lang=ur", Some(&auth), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn request_completes_in_background() {
    let state = test_helpers::test_app_state();
    let auth = test_helpers::bearer(&state, Uuid::new_v4());
    let body = json!({
        "content_id": "ch-1-1",
        "source_language": "en",
        "target_language": "ur",
        "content_type": "text"
    });
    let (status, created) = send(&state, json_request("POST", "/api/translation/requests", Some(&auth), Some(body))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["preserve_formatting"], true);
    let uri = format!("/api/translation/requests/{}", created["id"].as_str().unwrap());

    let mut polled = Value::Null;
    for _ in 0..50 {
        let (_, body) = send(&state, json_request("GET", &uri, Some(&auth), None)).await;
        polled = body;
        if polled["status"] == "completed" {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(polled["status"], "completed");
    assert!(polled["translated_content"].as_str().unwrap().starts_with("(UR TRANSLATION)"));
    assert!(polled["completed_at"].is_string());
}

#[tokio::test]
async fn request_is_private_to_requester() {
    let state = test_helpers::test_app_state();
    let owner = test_helpers::bearer(&state, Uuid::new_v4());
    let other = test_helpers::bearer(&state, Uuid::new_v4());
    let body = json!({
        "content_id": "ch-2-1",
        "source_language": "en",
        "target_language": "de",
        "content_type": "text",
        "preserve_formatting": false
    });
    let (_, created) = send(&state, json_request("POST", "/api/translation/requests", Some(&owner), Some(body))).await;
    let uri = format!("/api/translation/requests/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&state, json_request("GET", &uri, Some(&other), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Translation request not found");

    let (status, _) = send(&state, json_request("GET", "/api/translation/requests/bogus", Some(&owner), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
