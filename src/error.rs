use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::generator::GenerationError;

// Errors surfaced to HTTP clients as {"detail": "..."}
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("{message}")]
    Validation { status: StatusCode, message: String },

    #[error("Rate limit exceeded: {limit}")]
    RateLimited { limit: String },

    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Generation(GenerationError::NotConfigured) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Generation(GenerationError::RetriesExhausted { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Validation { status, .. } => *status,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Malformed bodies keep axum's status (422 for missing fields, 400 for bad JSON)
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_errors_map_to_service_statuses() {
        assert_eq!(
            ApiError::from(GenerationError::NotConfigured).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        let exhausted = ApiError::from(GenerationError::RetriesExhausted {
            attempts: 3,
            message: "boom".to_string(),
        });
        assert_eq!(exhausted.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            exhausted.to_string(),
            "Failed to generate content after 3 attempts: boom"
        );
    }

    #[test]
    fn rate_limit_and_validation_statuses() {
        let limited = ApiError::RateLimited {
            limit: "60 per 1 minute".to_string(),
        };
        assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(limited.to_string(), "Rate limit exceeded: 60 per 1 minute");
        assert_eq!(
            ApiError::validation("name must not be empty").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
