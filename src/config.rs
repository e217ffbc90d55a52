use clap::Parser;
use std::time::Duration;

use crate::cache::DEFAULT_CAPACITY;
use crate::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::rate_limit::{DEFAULT_RATE_LIMIT, RateLimit};

// CLI arguments, each one also read from the environment (.env included)
#[derive(Parser, Debug, Clone)]
#[command(name = "party-game-gateway")]
#[command(about = "Caching, rate-limited Gemini proxy for party game content")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    // Gemini API key; generation answers 503 without it
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub gemini_model: String,

    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub gemini_base_url: String,

    // Comma-separated origins, "*" for any
    #[arg(long, env = "ALLOWED_ORIGINS", default_value = "*")]
    pub allowed_origins: String,

    // Cache TTL in seconds
    #[arg(short, long, env = "CACHE_TTL", default_value_t = 300)]
    pub cache_ttl: u64,

    // Max cached prompts
    #[arg(long, env = "CACHE_CAPACITY", default_value_t = DEFAULT_CAPACITY)]
    pub cache_capacity: usize,

    // Per-endpoint limit per client, e.g. "60/minute"
    #[arg(long, env = "RATE_LIMIT", default_value = DEFAULT_RATE_LIMIT)]
    pub rate_limit: RateLimit,

    // Timeout for a single Gemini call in seconds
    #[arg(long, env = "REQUEST_TIMEOUT", default_value_t = 60)]
    pub request_timeout: u64,
}

impl Args {
    // Blank keys count as missing
    pub fn api_key(&self) -> Option<&str> {
        self.gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    // None means any origin
    pub fn origins(&self) -> Option<Vec<String>> {
        let origins: Vec<String> = self
            .allowed_origins
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect();

        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            None
        } else {
            Some(origins)
        }
    }
}
