use crate::error::ApiError;
use crate::metrics;

pub async fn metrics_handler() -> Result<String, ApiError> {
    metrics::render().map_err(|e| ApiError::Internal(format!("Failed to encode metrics: {e}")))
}
