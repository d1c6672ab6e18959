//! # API Shared
//!
//! Shared wire types for the premium REST APIs.
//!
//! Contains:
//! - Request/response DTOs with OpenAPI schemas (`insurance`, `patients`)
//! - Shared services like `HealthService`
//! - Lenient deserializers for form-style inputs
//!
//! Used by `api-rest` and the `premium` CLI.

pub mod health;
pub mod insurance;
pub mod lenient;
pub mod patients;

use serde::Serialize;
use utoipa::ToSchema;

pub use health::HealthService;
pub use insurance::{HealthRes, PredictReq, PredictionRes, PredictRes};
pub use patients::{
    ListPatientsRes, PatientReq, PatientRes, SortParams, UpdatePatientReq, ViewPatientRes,
};

/// Plain `{"message": ...}` body used by informational and write endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MessageRes {
    #[schema(example = "Patient created successfully")]
    pub message: String,
}

impl MessageRes {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error body. `field` is set for validation failures.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ErrorRes {
    #[schema(example = "must be less than 75")]
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "age")]
    pub field: Option<String>,
}

impl ErrorRes {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            field: None,
        }
    }
}

impl From<&premium_core::ValidationError> for ErrorRes {
    fn from(e: &premium_core::ValidationError) -> Self {
        Self {
            detail: e.reason.clone(),
            field: Some(e.field.to_string()),
        }
    }
}
