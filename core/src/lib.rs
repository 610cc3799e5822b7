// src/lib.rs

//! catalog_core: domain model and storage seams for a furniture catalog.
//!
//!  - Products with a storage key (`record_id`) and a catalog identifier (`id`).
//!  - Counter-backed identifier allocation (`FURN<CATEGORY><SEQ>`) with
//!    non-mutating `peek` and atomic `reserve`.
//!  - Case-insensitive substring and inclusive price-range search.
//!  - Async storage traits plus an in-process backend.

pub mod catalog;
pub mod error;
pub mod filter;
pub mod id;
pub mod model;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::catalog::ProductCatalog;
pub use crate::error::{CatalogError, CatalogResult};
pub use crate::filter::{parse_number_field, ProductFilter};
pub use crate::id::{format_product_id, CategoryCode, IdAllocator, ID_PREFIX};
pub use crate::model::{Email, NewProduct, Product, ProductPatch, ProductUpdate, User};
pub use crate::store::{CatalogStore, CounterStore, MemoryStore, ProductStore, UserStore};
