// server/src/errors.rs

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use catalog_core::CatalogError;

const GENERIC_FAILURE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  /// Unknown email and wrong password are reported identically.
  #[error("Invalid email or password")]
  InvalidCredentials,

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("I/O Error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Internal Server Error: {0}")]
  Internal(String), // For miscellaneous errors
}

impl From<CatalogError> for AppError {
  fn from(err: CatalogError) -> Self {
    match err {
      CatalogError::Validation(m) => AppError::Validation(m),
      CatalogError::NotFound(m) => AppError::NotFound(m),
      CatalogError::DuplicateEmail => AppError::Validation("Email already exists".to_string()),
      CatalogError::Storage { source } => AppError::Internal(format!("{:#}", source)),
    }
  }
}

// Allow anyhow::Error to be converted into AppError::Internal for convenience in handlers
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<CatalogError>() {
      Ok(catalog_err) => catalog_err.into(),
      Err(other) => AppError::Internal(format!("{:#}", other)),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) | AppError::InvalidCredentials => StatusCode::BAD_REQUEST,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Io(_) | AppError::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    // Log the full error when it's turned into a response
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, "Responding with client error");
    }
    let message = match self {
      AppError::Validation(m) | AppError::NotFound(m) => m.clone(),
      AppError::InvalidCredentials => self.to_string(),
      // Server-side detail stays in the log.
      _ => GENERIC_FAILURE.to_string(),
    };
    HttpResponse::build(status).json(json!({ "error": message }))
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn catalog_errors_map_to_http_classes() {
    let cases = [
      (CatalogError::validation("bad"), StatusCode::BAD_REQUEST),
      (CatalogError::not_found("gone"), StatusCode::NOT_FOUND),
      (CatalogError::DuplicateEmail, StatusCode::BAD_REQUEST),
      (CatalogError::storage(anyhow::anyhow!("db down")), StatusCode::INTERNAL_SERVER_ERROR),
    ];
    for (err, expected) in cases {
      assert_eq!(AppError::from(err).status_code(), expected);
    }
  }

  #[actix_rt::test]
  async fn server_errors_do_not_leak_detail() {
    let err = AppError::Internal("password for db is hunter2".to_string());
    let response = err.error_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], GENERIC_FAILURE);
  }

  #[test]
  fn anyhow_wrapped_catalog_error_keeps_its_class() {
    let err = AppError::from(anyhow::Error::new(CatalogError::not_found("Product x not found")));
    assert!(matches!(err, AppError::NotFound(m) if m == "Product x not found"));
  }
}
