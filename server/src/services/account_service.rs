// server/src/services/account_service.rs

//! Registration and login against the user collection.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use catalog_core::model::user::validate_password;
use catalog_core::{CatalogError, CatalogStore, Email, User};

use crate::errors::AppError;
use crate::services::auth_service;
use crate::services::token_service::TokenIssuer;

#[derive(Clone)]
pub struct AccountService {
  store: Arc<dyn CatalogStore>,
  tokens: TokenIssuer,
}

impl AccountService {
  pub fn new(store: Arc<dyn CatalogStore>, tokens: TokenIssuer) -> Self {
    AccountService { store, tokens }
  }

  pub fn tokens(&self) -> &TokenIssuer {
    &self.tokens
  }

  #[instrument(name = "account_service::register", skip_all)]
  pub async fn register(&self, email: &str, password: &str) -> Result<User, AppError> {
    if email.trim().is_empty() || password.is_empty() {
      return Err(AppError::Validation("Email and password are required".to_string()));
    }
    let email = Email::parse(email)?;
    validate_password(password)?;

    if self.store.find_user_by_email(&email).await?.is_some() {
      warn!(%email, "Attempt to register with existing email.");
      return Err(CatalogError::DuplicateEmail.into());
    }

    let password_hash = auth_service::hash_password(password)?;
    // The storage uniqueness constraint still decides races between two registrations.
    let user = self.store.insert_user(User::new(email, password_hash)).await?;
    info!(user_id = %user.id, email = %user.email, "User registered.");
    Ok(user)
  }

  /// Returns a signed token for valid credentials.
  #[instrument(name = "account_service::login", skip_all)]
  pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
    let Ok(email) = Email::parse(email) else {
      return Err(AppError::InvalidCredentials);
    };

    let Some(user) = self.store.find_user_by_email(&email).await? else {
      warn!(%email, "Login for unknown email.");
      return Err(AppError::InvalidCredentials);
    };

    if !auth_service::verify_password(&user.password_hash, password)? {
      warn!(user_id = %user.id, "Password mismatch on login.");
      return Err(AppError::InvalidCredentials);
    }

    let token = self.tokens.issue(user.id, user.email.as_str())?;
    info!(user_id = %user.id, "Login successful.");
    Ok(token)
  }
}
