// server/src/services/token_service.rs

//! Signed bearer tokens (HS256 JWT) issued on login.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::errors::AppError;

/// Lifetime of an issued token, in seconds.
pub const TOKEN_TTL_SECS: i64 = 3600;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
  /// User id.
  pub sub: String,
  pub email: String,
  pub iat: i64,
  pub exp: i64,
}

#[derive(Clone)]
pub struct TokenIssuer {
  encoding: EncodingKey,
  decoding: DecodingKey,
}

impl TokenIssuer {
  pub fn new(secret: &str) -> Self {
    TokenIssuer {
      encoding: EncodingKey::from_secret(secret.as_bytes()),
      decoding: DecodingKey::from_secret(secret.as_bytes()),
    }
  }

  #[instrument(name = "token_service::issue", skip(self, email))]
  pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
      sub: user_id.to_string(),
      email: email.to_string(),
      iat: now.timestamp(),
      exp: (now + Duration::seconds(TOKEN_TTL_SECS)).timestamp(),
    };
    let token = encode(&Header::default(), &claims, &self.encoding)
      .map_err(|e| AppError::Internal(format!("Token signing failed: {}", e)))?;
    debug!(exp = claims.exp, "Token issued.");
    Ok(token)
  }

  /// Checks signature and expiry.
  pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
    decode::<Claims>(token, &self.decoding, &Validation::default())
      .map(|data| data.claims)
      .map_err(|e| {
        warn!(error = %e, "Rejected bearer token.");
        AppError::Validation("Invalid or expired token".to_string())
      })
  }
}
