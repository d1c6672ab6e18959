//! # API REST
//!
//! REST API implementation for the premium services.
//!
//! Handles:
//! - HTTP endpoints with axum (`insurance` and `patients` routers)
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status-code mapping)
//!
//! Uses `api-shared` for wire types and `premium-core` for all business logic.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod insurance;
pub mod patients;

pub use error::ApiError;
pub use insurance::InsuranceState;
pub use patients::PatientsState;
