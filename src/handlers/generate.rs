use axum::{Json, extract::State};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::ApiJson;
use crate::error::ApiError;
use crate::metrics::{REQUEST_LATENCY, REQUEST_TOTAL};
use crate::models::{CocktailRequest, GenerateRequest, GenerateResponse, RoastRequest};
use crate::prompts;
use crate::state::AppState;

type GenerateResult = Result<Json<GenerateResponse>, ApiError>;

// Shared tail of every generate endpoint
async fn respond(state: &AppState, kind: &'static str, prompt: String) -> GenerateResult {
    REQUEST_TOTAL.with_label_values(&[kind]).inc();
    let start_time = Instant::now();
    debug!(kind, "generating");

    let content = state.generator.generate(&prompt).await?;
    // checked after generation, so a fresh result already reports true
    let cached = state.cache.contains(&prompt);

    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());

    Ok(Json(GenerateResponse {
        content,
        cached,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}

pub async fn never_have_i_ever_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<GenerateRequest>,
) -> GenerateResult {
    let prompt = prompts::never_have_i_ever(body.difficulty());
    respond(&state, "never_have_i_ever", prompt).await
}

pub async fn most_likely_to_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<GenerateRequest>,
) -> GenerateResult {
    let prompt = prompts::most_likely_to(body.difficulty());
    respond(&state, "most_likely_to", prompt).await
}

pub async fn truth_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<GenerateRequest>,
) -> GenerateResult {
    let prompt = prompts::truth(body.difficulty());
    respond(&state, "truth", prompt).await
}

pub async fn dare_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<GenerateRequest>,
) -> GenerateResult {
    let prompt = prompts::dare(body.difficulty());
    respond(&state, "dare", prompt).await
}

pub async fn roast_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<RoastRequest>,
) -> GenerateResult {
    if body.name.trim().is_empty() {
        return Err(ApiError::validation("name must not be empty"));
    }
    let prompt = prompts::roast(&body.name, body.trait_.as_deref(), body.difficulty());
    respond(&state, "roast", prompt).await
}

pub async fn debate_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<GenerateRequest>,
) -> GenerateResult {
    let prompt = prompts::debate(body.difficulty());
    respond(&state, "debate", prompt).await
}

pub async fn cocktail_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<CocktailRequest>,
) -> GenerateResult {
    let prompt = prompts::cocktail(&body.ingredients);
    respond(&state, "cocktail", prompt).await
}
