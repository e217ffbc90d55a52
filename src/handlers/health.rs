use axum::{Json, extract::State, response::IntoResponse};
use std::sync::Arc;

use crate::app::routes;
use crate::models::HealthResponse;
use crate::state::AppState;

pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        gemini_configured: state.gemini_configured(),
    })
}

// Version of the public API, independent of the crate version
pub const API_VERSION: &str = "1.0.0";

// API info + endpoint listing
pub async fn root_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "Party Game API",
        "version": API_VERSION,
        "status": "running",
        "endpoints": {
            "health": routes::HEALTH,
            "never_have_i_ever": routes::NEVER_HAVE_I_EVER,
            "most_likely_to": routes::MOST_LIKELY_TO,
            "truth": routes::TRUTH,
            "dare": routes::DARE,
            "roast": routes::ROAST,
            "debate": routes::DEBATE,
            "cocktail": routes::COCKTAIL
        }
    }))
}
