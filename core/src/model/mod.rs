// core/src/model/mod.rs

//! Contains data structures representing stored entities.

pub mod product;
pub mod user;

pub use product::{NewProduct, Product, ProductPatch, ProductUpdate};
pub use user::{Email, User};
