// server/src/config.rs

use crate::errors::{AppError, Result}; // Use AppError specific Result
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)] // Clone is useful if parts of config are passed around
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub db_max_connections: u32,

  /// HMAC secret for login tokens.
  pub jwt_secret: String,

  pub upload_dir: PathBuf,
  pub max_image_bytes: usize,

  // Create tables on startup when the database is fresh.
  pub init_db_schema: bool,
}

// Secrets stay out of logs.
impl std::fmt::Debug for AppConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AppConfig")
      .field("server_host", &self.server_host)
      .field("server_port", &self.server_port)
      .field("database_url", &"[REDACTED]")
      .field("db_max_connections", &self.db_max_connections)
      .field("jwt_secret", &"[REDACTED]")
      .field("upload_dir", &self.upload_dir)
      .field("max_image_bytes", &self.max_image_bytes)
      .field("init_db_schema", &self.init_db_schema)
      .finish()
  }
}

fn parse_var<T>(name: &str, raw: String) -> Result<T>
where
  T: std::str::FromStr,
  T::Err: std::fmt::Display,
{
  raw
    .trim()
    .parse::<T>()
    .map_err(|e| AppError::Config(format!("Invalid {}: {}", name, e)))
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_process_env()
  }

  /// Reads the current process environment without consulting `.env`.
  pub fn from_process_env() -> Result<Self> {
    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .or_else(|_| get_env("PORT"))
      .unwrap_or_else(|_| "5000".to_string());
    let server_port = parse_var::<u16>("SERVER_PORT", server_port)?;

    let database_url = get_env("DATABASE_URL")?;
    let db_max_connections = parse_var::<u32>(
      "DB_MAX_CONNECTIONS",
      get_env("DB_MAX_CONNECTIONS").unwrap_or_else(|_| "10".to_string()),
    )?;

    let jwt_secret = get_env("JWT_SECRET")?;
    if jwt_secret.trim().is_empty() {
      return Err(AppError::Config("JWT_SECRET must not be empty".to_string()));
    }

    let upload_dir = PathBuf::from(get_env("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()));
    let max_image_bytes = match get_env("MAX_IMAGE_BYTES") {
      Ok(raw) => parse_var::<usize>("MAX_IMAGE_BYTES", raw)?,
      Err(_) => DEFAULT_MAX_IMAGE_BYTES,
    };

    let init_db_schema = parse_var::<bool>(
      "INIT_DB_SCHEMA",
      get_env("INIT_DB_SCHEMA").unwrap_or_else(|_| "false".to_string()),
    )?;

    let config = Self {
      server_host,
      server_port,
      database_url,
      db_max_connections,
      jwt_secret,
      upload_dir,
      max_image_bytes,
      init_db_schema,
    };
    tracing::info!(config = ?config, "Application configuration loaded successfully.");
    Ok(config)
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
