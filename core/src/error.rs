// core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
  /// Missing or malformed input. Always safe to show to the caller.
  #[error("{0}")]
  Validation(String),

  #[error("{0}")]
  NotFound(String),

  #[error("Email already exists")]
  DuplicateEmail,

  #[error("Storage operation failed. Source: {source}")]
  Storage {
    #[source]
    source: AnyhowError,
  },
}

impl CatalogError {
  pub fn validation(message: impl Into<String>) -> Self {
    CatalogError::Validation(message.into())
  }

  pub fn not_found(message: impl Into<String>) -> Self {
    CatalogError::NotFound(message.into())
  }

  /// Wraps any backend failure; the message is logged, never returned to clients.
  pub fn storage(err: impl Into<AnyhowError>) -> Self {
    CatalogError::Storage { source: err.into() }
  }
}

impl From<AnyhowError> for CatalogError {
  fn from(err: AnyhowError) -> Self {
    // Keep an already-typed CatalogError intact instead of burying it in Storage.
    match err.downcast::<CatalogError>() {
      Ok(catalog_err) => catalog_err,
      Err(other) => CatalogError::Storage { source: other },
    }
  }
}

pub type CatalogResult<T, E = CatalogError> = std::result::Result<T, E>;
