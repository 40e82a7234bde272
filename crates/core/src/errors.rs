use thiserror::Error;

#[derive(Error, Debug)]
pub enum GymError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl GymError {
    pub fn validation(message: impl Into<String>) -> Self {
        GymError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        GymError::NotFound(message.into())
    }
}

pub type GymResult<T> = Result<T, GymError>;
