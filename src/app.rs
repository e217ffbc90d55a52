use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::time::{Duration, interval};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::cache::ResponseCache;
use crate::config::Args;
use crate::gemini::{ContentModel, GeminiModel, ModelError};
use crate::generator::Generator;
use crate::handlers::{
    cocktail_handler, dare_handler, debate_handler, health_handler, metrics_handler,
    most_likely_to_handler, never_have_i_ever_handler, roast_handler, root_handler,
    truth_handler,
};
use crate::rate_limit::{self, RateLimit, RateLimiter};
use crate::state::AppState;

pub mod routes {
    pub const ROOT: &str = "/";
    pub const HEALTH: &str = "/api/health";
    pub const METRICS: &str = "/metrics";
    pub const NEVER_HAVE_I_EVER: &str = "/api/generate/never-have-i-ever";
    pub const MOST_LIKELY_TO: &str = "/api/generate/most-likely-to";
    pub const TRUTH: &str = "/api/generate/truth";
    pub const DARE: &str = "/api/generate/dare";
    pub const ROAST: &str = "/api/generate/roast";
    pub const DEBATE: &str = "/api/generate/debate";
    pub const COCKTAIL: &str = "/api/generate/cocktail";

    // Every route that reaches the model
    pub const GENERATE: [&str; 7] = [
        NEVER_HAVE_I_EVER,
        MOST_LIKELY_TO,
        TRUTH,
        DARE,
        ROAST,
        DEBATE,
        COCKTAIL,
    ];
}

// Same limit on every generate route, counted per route
pub fn rate_limiter_for(limit: RateLimit) -> RateLimiter {
    routes::GENERATE
        .iter()
        .fold(RateLimiter::new(), |limiter, route| {
            limiter.with_route(route, limit)
        })
}

// None allows any origin without credentials
pub fn cors_layer(origins: Option<Vec<String>>) -> CorsLayer {
    let Some(origins) = origins else {
        return CorsLayer::permissive();
    };

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

pub fn build_state(args: &Args) -> Result<AppState, ModelError> {
    let cache = Arc::new(ResponseCache::new(args.cache_capacity, args.cache_ttl()));

    let model: Option<Arc<dyn ContentModel>> = match args.api_key() {
        Some(key) => {
            let gemini = GeminiModel::new(
                key.to_string(),
                args.gemini_model.clone(),
                &args.gemini_base_url,
                args.request_timeout(),
            )?;
            info!("Gemini API configured with model: {}", gemini.model());
            let gemini: Arc<dyn ContentModel> = Arc::new(gemini);
            Some(gemini)
        }
        None => {
            warn!("GEMINI_API_KEY not found in environment variables!");
            None
        }
    };

    Ok(AppState::new(
        Generator::new(model, cache),
        rate_limiter_for(args.rate_limit),
    ))
}

pub fn router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    let generate = Router::new()
        .route(routes::NEVER_HAVE_I_EVER, post(never_have_i_ever_handler))
        .route(routes::MOST_LIKELY_TO, post(most_likely_to_handler))
        .route(routes::TRUTH, post(truth_handler))
        .route(routes::DARE, post(dare_handler))
        .route(routes::ROAST, post(roast_handler))
        .route(routes::DEBATE, post(debate_handler))
        .route(routes::COCKTAIL, post(cocktail_handler))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            rate_limit::enforce,
        ));

    Router::new()
        .route(routes::ROOT, get(root_handler))
        .route(routes::HEALTH, get(health_handler))
        .route(routes::METRICS, get(metrics_handler))
        .merge(generate)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Periodically drops expired cache entries and stale rate-limit windows
pub async fn housekeeping(state: Arc<AppState>, every: Duration) {
    let mut interval = interval(every);

    loop {
        interval.tick().await;
        state.cache.purge_expired();
        state.rate_limiter.prune();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_generate_route_is_limited() {
        let limit: RateLimit = "3/minute".parse().unwrap();
        let limiter = rate_limiter_for(limit);
        for route in routes::GENERATE {
            assert_eq!(limiter.limit_for(route), Some(limit));
        }
        assert_eq!(limiter.limit_for(routes::HEALTH), None);
        assert_eq!(limiter.limit_for(routes::ROOT), None);
    }
}
