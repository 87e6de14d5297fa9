use super::test_helpers;

#[tokio::test]
async fn tables_start_empty() {
    let state = test_helpers::test_app_state();
    assert!(state.content.read().await.is_empty());
    assert!(state.progress.read().await.is_empty());
    assert!(state.quiz_attempts.read().await.is_empty());
    assert!(state.translations.read().await.is_empty());
    assert!(state.llm.is_none());
    assert!(state.vector.is_none());
}

#[tokio::test]
async fn clones_share_tables() {
    let state = test_helpers::test_app_state();
    let clone = state.clone();
    let id = test_helpers::seed_content(&clone, "Shared", 1).await;
    assert!(state.content.read().await.contains_key(&id));
}
