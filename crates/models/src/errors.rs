use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ModelError {
    pub fn invalid_field(field: &str, reason: &str) -> Self {
        Self::Validation(format!("{field} {reason}"))
    }
}
