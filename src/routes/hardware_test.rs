use axum::http::StatusCode;
use uuid::Uuid;

use crate::routes::test_support::{json_request, send};
use crate::state::test_helpers;

#[tokio::test]
async fn catalog_endpoints_are_public() {
    let state = test_helpers::test_app_state();
    for uri in [
        "/api/hardware/components",
        "/api/hardware/setups",
        "/api/hardware/labs",
        "/api/hardware/latency-considerations",
        "/api/hardware/sim-to-real-warnings",
    ] {
        let (status, body) = send(&state, json_request("GET", uri, None, None)).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert!(!body.as_array().unwrap().is_empty(), "{uri}");
    }
    let (status, body) = send(&state, json_request("GET", "/api/hardware/cloud-vs-on-prem", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_object());
}

#[tokio::test]
async fn recommendations_need_token_and_default_to_beginner() {
    let state = test_helpers::test_app_state();
    let (status, _) = send(&state, json_request("GET", "/api/hardware/recommendations", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let auth = test_helpers::bearer(&state, Uuid::new_v4());
    let (status, beginner) = send(&state, json_request("GET", "/api/hardware/recommendations", Some(&auth), None)).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = beginner.as_array().unwrap().iter().map(|r| r["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["rec-1", "rec-2"]);

    let (_, advanced) =
        send(&state, json_request("GET", "/api/hardware/recommendations?user_experience=advanced", Some(&auth), None)).await;
    assert_eq!(advanced[0]["id"], "rec-3");
}
