use std::sync::Arc;

use crate::cache::ResponseCache;
use crate::generator::Generator;
use crate::rate_limit::RateLimiter;

// app's shared state
pub struct AppState {
    pub generator: Generator,
    pub cache: Arc<ResponseCache>,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(generator: Generator, rate_limiter: RateLimiter) -> Self {
        let cache = generator.shared_cache();
        Self {
            generator,
            cache,
            rate_limiter,
        }
    }

    pub fn gemini_configured(&self) -> bool {
        self.generator.is_configured()
    }
}
