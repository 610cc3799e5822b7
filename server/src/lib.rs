// server/src/lib.rs

//! HTTP server for the furniture catalog: actix-web routes, Postgres
//! storage, image uploads and email/password login.

pub mod config;
pub mod db;
pub mod errors;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod uploads;
pub mod web;

pub use crate::config::AppConfig;
pub use crate::errors::{AppError, Result};
pub use crate::state::AppState;
