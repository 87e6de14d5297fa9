//! Hardware routes — read-only lab catalog.

use axum::extract::Query;
use axum::response::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::routes::auth::AuthUser;
use crate::services::hardware::{
    self as hardware_svc, HardwareComponent, HardwareLab, HardwareRecommendation, HardwareSetup, LatencyConsideration,
    SimToRealWarning,
};

/// `GET /api/hardware/components`.
pub async fn components() -> Json<Vec<HardwareComponent>> {
    Json(hardware_svc::components())
}

/// `GET /api/hardware/setups`.
pub async fn setups() -> Json<Vec<HardwareSetup>> {
    Json(hardware_svc::setups())
}

/// `GET /api/hardware/labs`.
pub async fn labs() -> Json<Vec<HardwareLab>> {
    Json(hardware_svc::labs())
}

#[derive(Deserialize)]
pub struct RecommendationParams {
    pub user_experience: Option<String>,
}

/// `GET /api/hardware/recommendations?user_experience=` — defaults to beginner.
pub async fn recommendations(
    _auth: AuthUser,
    Query(params): Query<RecommendationParams>,
) -> Json<Vec<HardwareRecommendation>> {
    let level = params.user_experience.as_deref().unwrap_or("beginner");
    Json(hardware_svc::recommendations(level))
}

/// `GET /api/hardware/cloud-vs-on-prem`.
pub async fn cloud_vs_on_prem() -> Json<Value> {
    Json(hardware_svc::cloud_vs_on_prem())
}

/// `GET /api/hardware/latency-considerations`.
pub async fn latency_considerations() -> Json<Vec<LatencyConsideration>> {
    Json(hardware_svc::latency_considerations())
}

/// `GET /api/hardware/sim-to-real-warnings`.
pub async fn sim_to_real_warnings() -> Json<Vec<SimToRealWarning>> {
    Json(hardware_svc::sim_to_real_warnings())
}

#[cfg(test)]
#[path = "hardware_test.rs"]
mod tests;
