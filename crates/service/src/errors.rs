use models::errors::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(kind: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{} {} not found", kind, id))
    }

    pub fn already_exists(kind: &str, id: impl std::fmt::Display) -> Self {
        Self::AlreadyExists(format!("{} {} already exists", kind, id))
    }

    pub fn db(e: impl std::fmt::Display) -> Self {
        Self::Db(e.to_string())
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => Self::Validation(msg),
            ModelError::InvalidArgument(msg) => Self::InvalidArgument(msg),
        }
    }
}
