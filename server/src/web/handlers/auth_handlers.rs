// server/src/web/handlers/auth_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize; // For request payloads
use serde_json::json; // For JSON responses
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;

// --- Request DTOs ---
// Missing keys deserialize as empty strings so the service reports them as
// validation errors with its own message.
#[derive(Deserialize, Debug)]
pub struct CredentialsPayload {
  #[serde(default)]
  pub email: String,
  #[serde(default)]
  pub password: String,
}

// --- Handler Implementations ---

#[instrument(name = "handler::register", skip(app_state, req_payload), fields(req_email = %req_payload.email))]
pub async fn register_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<CredentialsPayload>,
) -> Result<HttpResponse, AppError> {
  let user = app_state
    .accounts
    .register(&req_payload.email, &req_payload.password)
    .await?;
  info!(user_id = %user.id, "Registration completed.");
  Ok(HttpResponse::Created().json(json!({
      "message": "Registration successful.",
      "userId": user.id.to_string(),
  })))
}

#[instrument(name = "handler::login", skip(app_state, req_payload), fields(req_email = %req_payload.email))]
pub async fn login_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<CredentialsPayload>,
) -> Result<HttpResponse, AppError> {
  let token = app_state
    .accounts
    .login(&req_payload.email, &req_payload.password)
    .await?;
  Ok(HttpResponse::Ok().json(json!({ "token": token })))
}
