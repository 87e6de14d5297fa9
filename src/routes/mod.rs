//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every endpoint is registered here with its full path. Static segments such
//! as `/api/modules/` or `/api/progress` take precedence over the catch-all
//! content route `/api/{content_id}`, so ordering does not matter.

pub mod auth;
pub mod chatbot;
pub mod content;
pub mod hardware;
pub mod ingest;
pub mod personalization;
pub mod progress;
pub mod retrieval;
pub mod translation;

use axum::Router;
use axum::response::Json;
use axum::routing::{get, post};
use serde_json::{Value, json};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full HTTP surface of the textbook backend.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        // auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/profile", get(auth::profile).put(auth::update_profile))
        // content
        .route("/api/", post(content::create_content))
        .route(
            "/api/{content_id}",
            get(content::get_content)
                .put(content::update_content)
                .delete(content::delete_content),
        )
        .route("/api/module/{module_type}", get(content::list_module_content))
        .route("/api/modules/", get(content::list_modules))
        .route("/api/modules/{module_id}/chapters", get(content::list_chapters))
        // ingestion + retrieval
        .route("/api/ingest", post(ingest::ingest_document))
        .route("/api/ingest/text", post(ingest::ingest_text))
        .route("/api/retrieve", post(retrieval::retrieve))
        .route("/api/retrieve/{content_id}", get(retrieval::retrieve_by_id))
        .route("/api/retrieve/module/{module_type}", get(retrieval::retrieve_by_module))
        // progress
        .route("/api/progress", post(progress::upsert_progress))
        .route("/api/progress/", get(progress::list_progress))
        .route(
            "/api/progress/{content_id}",
            get(progress::get_progress).put(progress::update_progress),
        )
        .route("/api/stats/", get(progress::completion_stats))
        .route("/api/quiz-attempts", post(progress::record_quiz_attempt))
        .route("/api/quiz-attempts/{content_id}", get(progress::list_quiz_attempts))
        .route("/api/learning-paths", post(progress::create_learning_path))
        .route("/api/learning-paths/", get(progress::list_learning_paths))
        .route(
            "/api/learning-paths/{path_id}",
            get(progress::get_learning_path)
                .put(progress::update_learning_path)
                .delete(progress::delete_learning_path),
        )
        // chatbot
        .route("/api/chatbot/sessions", post(chatbot::create_session))
        .route("/api/chatbot/sessions/", get(chatbot::list_sessions))
        .route(
            "/api/chatbot/sessions/{session_id}",
            get(chatbot::get_session).put(chatbot::update_session),
        )
        .route("/api/chatbot/sessions/{session_id}/query", post(chatbot::query_session))
        .route("/api/chatbot/sessions/{session_id}/history", get(chatbot::history))
        .route("/api/chatbot/enforce-selected-text", post(chatbot::enforce_selected_text))
        // personalization
        .route(
            "/api/personalization/profiles",
            get(personalization::get_profile)
                .post(personalization::upsert_profile)
                .put(personalization::update_profile),
        )
        .route(
            "/api/personalization/content/{content_id}/personalized",
            get(personalization::personalized_content),
        )
        .route("/api/personalization/recommendations", get(personalization::recommendations))
        .route("/api/personalization/learning-path", get(personalization::learning_path))
        // translation
        .route("/api/translation/requests", post(translation::create_request))
        .route("/api/translation/requests/{request_id}", get(translation::get_request))
        .route("/api/translation/languages", get(translation::languages))
        .route("/api/translation/translate", post(translation::translate))
        // hardware
        .route("/api/hardware/components", get(hardware::components))
        .route("/api/hardware/setups", get(hardware::setups))
        .route("/api/hardware/labs", get(hardware::labs))
        .route("/api/hardware/recommendations", get(hardware::recommendations))
        .route("/api/hardware/cloud-vs-on-prem", get(hardware::cloud_vs_on_prem))
        .route("/api/hardware/latency-considerations", get(hardware::latency_considerations))
        .route("/api/hardware/sim-to-real-warnings", get(hardware::sim_to_real_warnings))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Physical AI & Humanoid Robotics Textbook API" }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
