// core/src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommerceError {
  /// Input rejected before touching the store. The message is shown to the shopper as-is.
  #[error("{0}")]
  Validation(String),

  #[error("{0}")]
  NotFound(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Internal error: {0}")]
  Internal(String),
}

impl CommerceError {
  pub fn validation(message: impl Into<String>) -> Self {
    CommerceError::Validation(message.into())
  }

  pub fn not_found(message: impl Into<String>) -> Self {
    CommerceError::NotFound(message.into())
  }
}

pub type CommerceResult<T, E = CommerceError> = std::result::Result<T, E>;
