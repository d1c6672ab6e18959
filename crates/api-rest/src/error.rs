//! Mapping from core errors to HTTP responses.

use api_shared::ErrorRes;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use premium_core::{PremiumError, ValidationError};

/// An error ready to be sent to the client.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorRes,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorRes::new(detail),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Maps `NotFound` to a 404 with `detail`, everything else as usual.
    pub fn not_found_as(detail: &'static str) -> impl Fn(PremiumError) -> ApiError {
        move |err| match err {
            PremiumError::NotFound(_) => ApiError::new(StatusCode::NOT_FOUND, detail),
            other => ApiError::from(other),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: ErrorRes::from(&e),
        }
    }
}

impl From<PremiumError> for ApiError {
    fn from(err: PremiumError) -> Self {
        match err {
            PremiumError::Validation(e) => e.into(),
            PremiumError::InvalidInput(msg) => ApiError::new(StatusCode::BAD_REQUEST, msg),
            PremiumError::NotFound(_) => {
                ApiError::new(StatusCode::NOT_FOUND, "Patient ID not found")
            }
            PremiumError::Conflict(_) => {
                ApiError::new(StatusCode::BAD_REQUEST, "Patient Already exists")
            }
            PremiumError::ModelUnavailable => {
                ApiError::new(StatusCode::SERVICE_UNAVAILABLE, "Model not loaded")
            }
            PremiumError::Prediction(msg) => {
                tracing::error!("Prediction error: {}", msg);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            other => {
                tracing::error!("Internal error: {:?}", other);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
