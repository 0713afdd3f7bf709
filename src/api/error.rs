//! HTTP mapping of domain errors

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::domain::DomainError;

impl DomainError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DomainError::Validation(_) | DomainError::InsufficientStock { .. } => {
                StatusCode::BAD_REQUEST
            }
            DomainError::NotFound => StatusCode::NOT_FOUND,
            DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            DomainError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        match &self {
            DomainError::Database(_) => tracing::error!("Row Store error: {}", self),
            DomainError::InsufficientStock { .. } => tracing::warn!("Stock error: {}", self),
            DomainError::Unauthorized(_) => tracing::info!("Authorization error: {}", self),
            DomainError::Validation(_) | DomainError::NotFound => {
                tracing::debug!("Client error: {}", self)
            }
        }

        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
