//! Progress routes — per-content progress, quiz attempts, learning paths.
//!
//! Every handler is scoped to the bearer token's user; ids belonging to
//! another user behave exactly like missing ids.

use axum::extract::{Path, State};
use axum::response::Json;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::error::ApiError;
use crate::routes::auth::AuthUser;
use crate::services::progress::{
    self as progress_svc, CompletionStats, LearningPath, LearningPathUpdate, NewLearningPath, NewQuizAttempt,
    ProgressInput, ProgressUpdate, QuizAttempt, UserProgress,
};
use crate::state::AppState;

const PROGRESS_NOT_FOUND: &str = "Progress not found";
const PATH_NOT_FOUND: &str = "Learning path not found";

fn parse_path_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found(PATH_NOT_FOUND))
}

// =============================================================================
// PROGRESS
// =============================================================================

/// `POST /api/progress` — create or replace the caller's record for a content id.
pub async fn upsert_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<ProgressInput>,
) -> Json<UserProgress> {
    Json(progress_svc::upsert_progress(&state, auth.user_id, body).await)
}

/// `GET /api/progress/` — most recently touched first.
pub async fn list_progress(State(state): State<AppState>, auth: AuthUser) -> Json<Vec<UserProgress>> {
    Json(progress_svc::list_progress(&state, auth.user_id).await)
}

/// `GET /api/progress/{content_id}`.
pub async fn get_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(content_id): Path<String>,
) -> Result<Json<UserProgress>, ApiError> {
    progress_svc::get_progress(&state, auth.user_id, &content_id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found(PROGRESS_NOT_FOUND))
}

/// `PUT /api/progress/{content_id}` — partial update of an existing record.
pub async fn update_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(content_id): Path<String>,
    Json(body): Json<ProgressUpdate>,
) -> Result<Json<UserProgress>, ApiError> {
    progress_svc::update_progress(&state, auth.user_id, &content_id, body)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found(PROGRESS_NOT_FOUND))
}

/// `GET /api/stats/`.
pub async fn completion_stats(State(state): State<AppState>, auth: AuthUser) -> Json<CompletionStats> {
    Json(progress_svc::completion_stats(&state, auth.user_id).await)
}

// =============================================================================
// QUIZ ATTEMPTS
// =============================================================================

/// `POST /api/quiz-attempts`.
pub async fn record_quiz_attempt(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<NewQuizAttempt>,
) -> Json<QuizAttempt> {
    Json(progress_svc::record_quiz_attempt(&state, auth.user_id, body).await)
}

/// `GET /api/quiz-attempts/{content_id}`.
pub async fn list_quiz_attempts(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(content_id): Path<String>,
) -> Json<Vec<QuizAttempt>> {
    Json(progress_svc::list_quiz_attempts(&state, auth.user_id, &content_id).await)
}

// =============================================================================
// LEARNING PATHS
// =============================================================================

/// `POST /api/learning-paths`.
pub async fn create_learning_path(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<NewLearningPath>,
) -> Json<LearningPath> {
    Json(progress_svc::create_learning_path(&state, auth.user_id, body).await)
}

/// `GET /api/learning-paths/`.
pub async fn list_learning_paths(State(state): State<AppState>, auth: AuthUser) -> Json<Vec<LearningPath>> {
    Json(progress_svc::list_learning_paths(&state, auth.user_id).await)
}

/// `GET /api/learning-paths/{path_id}`.
pub async fn get_learning_path(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
) -> Result<Json<LearningPath>, ApiError> {
    let id = parse_path_id(&raw_id)?;
    progress_svc::get_learning_path(&state, auth.user_id, id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found(PATH_NOT_FOUND))
}

/// `PUT /api/learning-paths/{path_id}`.
pub async fn update_learning_path(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
    Json(body): Json<LearningPathUpdate>,
) -> Result<Json<LearningPath>, ApiError> {
    let id = parse_path_id(&raw_id)?;
    progress_svc::update_learning_path(&state, auth.user_id, id, body)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found(PATH_NOT_FOUND))
}

/// `DELETE /api/learning-paths/{path_id}`.
pub async fn delete_learning_path(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_path_id(&raw_id)?;
    if progress_svc::delete_learning_path(&state, auth.user_id, id).await {
        Ok(Json(json!({ "message": "Learning path deleted successfully" })))
    } else {
        Err(ApiError::not_found(PATH_NOT_FOUND))
    }
}

#[cfg(test)]
#[path = "progress_test.rs"]
mod tests;
