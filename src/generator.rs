use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

use crate::cache::ResponseCache;
use crate::gemini::{ContentModel, ModelError};
use crate::metrics::{CACHE_HITS, CACHE_MISSES, GENERATION_FAILURES};
use crate::prompts::SYSTEM_INSTRUCTION;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Gemini API key not configured")]
    NotConfigured,

    #[error("Failed to generate content after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },
}

// 3 attempts, sleeping 1s then 2s between them
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    // Delay after failed attempt `attempt` (0-based): base * 2^attempt
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

// Cached, retried access to the content model.
//
// Without a model (no API key) every call fails with
// `GenerationError::NotConfigured`. Successful text is stored in the
// cache under the exact prompt; failures never touch the cache.
// Concurrent identical prompts that both miss will both reach the model.
#[derive(Clone)]
pub struct Generator {
    model: Option<Arc<dyn ContentModel>>,
    cache: Arc<ResponseCache>,
    retry: RetryPolicy,
}

impl Generator {
    pub fn new(model: Option<Arc<dyn ContentModel>>, cache: Arc<ResponseCache>) -> Self {
        Self {
            model,
            cache,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.model.is_some()
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn shared_cache(&self) -> Arc<ResponseCache> {
        Arc::clone(&self.cache)
    }

    pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let model = self.model.as_ref().ok_or(GenerationError::NotConfigured)?;

        if let Some(text) = self.cache.get(prompt) {
            CACHE_HITS.inc();
            info!(prompt = %preview(prompt), "cache hit");
            return Ok(text);
        }
        CACHE_MISSES.inc();

        let max_attempts = self.retry.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 0..max_attempts {
            match model.generate_content(SYSTEM_INSTRUCTION, prompt).await {
                Ok(text) if !text.trim().is_empty() => {
                    let text = text.trim().to_string();
                    self.cache.put(prompt, text.clone());
                    info!(attempt = attempt + 1, "generated and cached content");
                    return Ok(text);
                }
                Ok(_) => last_error = Some(ModelError::EmptyResponse),
                Err(e) => last_error = Some(e),
            }

            GENERATION_FAILURES.inc();
            if let Some(e) = &last_error {
                error!(
                    "Generation error (attempt {}/{}): {}",
                    attempt + 1,
                    max_attempts,
                    e
                );
            }

            if attempt + 1 < max_attempts {
                tokio::time::sleep(self.retry.backoff(attempt)).await;
            }
        }

        Err(GenerationError::RetriesExhausted {
            attempts: max_attempts,
            message: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown error".to_string()),
        })
    }
}

// First 50 chars, for log lines
fn preview(prompt: &str) -> String {
    let mut out: String = prompt.chars().take(50).collect();
    if prompt.chars().count() > 50 {
        out.push_str("...");
    }
    out
}
