// core/src/model/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};

/// Minimum number of characters a raw password must have before hashing.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// A normalized (trimmed, lowercased) email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
  /// Accepts `local@domain.tld`: no whitespace, a single `@`, and a dot
  /// inside the domain with text on both sides.
  pub fn parse(raw: &str) -> CatalogResult<Self> {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
      return Err(CatalogError::validation("Email is required"));
    }
    let invalid = || CatalogError::validation("Email is not valid");

    if normalized.chars().any(char::is_whitespace) {
      return Err(invalid());
    }
    let (local, domain) = normalized.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
      return Err(invalid());
    }
    let has_inner_dot = domain
      .char_indices()
      .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());
    if !has_inner_dot {
      return Err(invalid());
    }
    Ok(Email(normalized))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id: Uuid,
  pub email: Email,
  #[serde(skip_serializing)] // Never send password hash to client
  pub password_hash: String,
  pub created_at: DateTime<Utc>,
}

impl User {
  pub fn new(email: Email, password_hash: String) -> Self {
    User {
      id: Uuid::new_v4(),
      email,
      password_hash,
      created_at: Utc::now(),
    }
  }
}

pub fn validate_password(password: &str) -> CatalogResult<()> {
  if password.is_empty() {
    return Err(CatalogError::validation("Password is required"));
  }
  if password.chars().count() < MIN_PASSWORD_CHARS {
    return Err(CatalogError::validation(format!(
      "Password must be at least {} characters long",
      MIN_PASSWORD_CHARS
    )));
  }
  Ok(())
}
