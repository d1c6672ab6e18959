//! # Premium Core
//!
//! Core business logic shared by the insurance premium predictor and the patient record
//! service.
//!
//! This crate contains pure data operations:
//! - Input validation and normalization of free text
//! - Derived attributes (BMI, age group, lifestyle risk, city tier, verdict)
//! - The classifier boundary and the bundled logistic model
//! - Patient CRUD over a flat JSON file
//!
//! **No API concerns**: HTTP servers and wire formats belong in `api-rest` or `api-shared`.

pub mod city;
pub mod config;
pub mod constants;
pub mod error;
pub mod features;
pub mod insurance;
pub mod model;
pub mod normalize;
pub mod patient;
pub mod repositories;
pub mod validation;

pub use config::CoreConfig;
pub use constants::{DEFAULT_MODEL_PATH, DEFAULT_PATIENTS_FILE, MODEL_API_VERSION};
pub use error::{PremiumError, PremiumResult};
pub use insurance::{EnrichedRecord, ModelFeatures, RawUserInput};
pub use model::{
    predict_output, try_load_model, LogisticModel, ModelHandle, Prediction, PremiumClassifier,
};
pub use patient::{PatientInput, PatientRecord, PatientUpdate, SortField, SortOrder};
pub use repositories::patients::PatientService;
pub use validation::ValidationError;

pub use premium_types::{IdError, PatientId};
