// server/src/services/mod.rs

pub mod account_service;
pub mod auth_service;
pub mod token_service;

pub use account_service::AccountService;
pub use token_service::{Claims, TokenIssuer};
