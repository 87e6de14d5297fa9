use std::time::Duration;

use super::*;
use crate::state::test_helpers;

fn new_request(target: &str, preserve: bool) -> NewTranslationRequest {
    NewTranslationRequest {
        content_id: "ch-1-2".into(),
        source_language: "en".into(),
        target_language: target.into(),
        content_type: "text".into(),
        preserve_formatting: preserve,
    }
}

#[test]
fn urdu_translation_keeps_code_and_math() {
    let text = "Call `rclpy.init()` then:\n```python\nnode = Node('x')\n```\nwith $v = \\omega r$.";
    let out = translate_text(text, "ur", true);
    assert_eq!(out, format!("(UR TRANSLATION)\n\n{text}"));
}

#[test]
fn other_targets_are_tagged_inline() {
    assert_eq!(translate_text("Hello", "fr", true), "(FR TRANSLATION) Hello");
    assert_eq!(translate_text("Hello", "ur", false), "(UR TRANSLATION)\n\nHello");
}

#[test]
fn direct_translation_defaults() {
    let body: DirectTranslation = serde_json::from_value(serde_json::json!({ "content": "Hi" })).unwrap();
    assert_eq!(body.source_lang, "en");
    assert_eq!(body.target_lang, "ur");
    assert!(body.preserve_formatting);
}

#[test]
fn render_request_texts() {
    assert_eq!(
        render_request("c1", "en", "ur", false),
        "(UR TRANSLATION) This is the translated content for c1. The original content has been translated from en to ur."
    );
    assert!(render_request("c1", "en", "ur", true).ends_with(
        "\n\n(Formatting preserved: Code blocks, equations, and special formatting maintained)"
    ));
    assert_eq!(render_request("c1", "en", "de", true), "(DE TRANSLATION) Translated content for c1 from en to de");
}

#[test]
fn two_languages_supported() {
    let codes: Vec<&str> = supported_languages().iter().map(|l| l.language_code).collect();
    assert_eq!(codes, vec!["en", "ur"]);
}

#[tokio::test]
async fn process_request_completes() {
    let state = test_helpers::test_app_state();
    let user = Uuid::new_v4();
    let created = request_translation(&state, user, new_request("de", true)).await;
    assert_eq!(created.status, TranslationStatus::Pending);

    process_request(&state.translations, created.id).await;
    let done = get_request(&state, user, created.id).await.unwrap();
    assert_eq!(done.status, TranslationStatus::Completed);
    assert!(done.completed_at.is_some());
    assert_eq!(
        done.translated_content.as_deref(),
        Some("(DE TRANSLATION) Translated content for ch-1-2 from en to de")
    );
}

#[tokio::test]
async fn background_task_finishes_request() {
    let state = test_helpers::test_app_state();
    let user = Uuid::new_v4();
    let created = request_translation(&state, user, new_request("ur", false)).await;

    let mut status = TranslationStatus::Pending;
    for _ in 0..100 {
        status = get_request(&state, user, created.id).await.unwrap().status;
        if status == TranslationStatus::Completed {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(status, TranslationStatus::Completed);
}

#[tokio::test]
async fn requests_are_private() {
    let state = test_helpers::test_app_state();
    let created = request_translation(&state, Uuid::new_v4(), new_request("ur", true)).await;
    assert!(get_request(&state, Uuid::new_v4(), created.id).await.is_none());
}

#[tokio::test]
async fn processing_unknown_id_is_noop() {
    let state = test_helpers::test_app_state();
    process_request(&state.translations, Uuid::new_v4()).await;
    assert!(state.translations.read().await.is_empty());
}
