use crate::validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum PremiumError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("patient not found: {0}")]
    NotFound(String),
    #[error("patient already exists: {0}")]
    Conflict(String),

    #[error("prediction model is not loaded")]
    ModelUnavailable,
    #[error("prediction failed: {0}")]
    Prediction(String),
    #[error("failed to read model file: {0}")]
    ModelRead(std::io::Error),
    #[error("failed to parse model file: {0}")]
    ModelParse(serde_path_to_error::Error<serde_json::Error>),
    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error("failed to read patient store: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write patient store: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to serialize patient store: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize patient store: {0}")]
    Deserialization(serde_path_to_error::Error<serde_json::Error>),
    #[error("patient store lock was poisoned")]
    StoreLockPoisoned,
}

pub type PremiumResult<T> = std::result::Result<T, PremiumError>;
