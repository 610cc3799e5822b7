// core/src/store/mod.rs

//! Storage seams for the catalog.
//!
//! Backends implement three narrow traits. Services hold an
//! `Arc<dyn CatalogStore>` so the HTTP layer can run against Postgres in
//! production and against [`MemoryStore`] in tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::filter::ProductFilter;
use crate::model::{Email, Product, ProductPatch, ProductUpdate, User};

pub mod memory;

pub use memory::MemoryStore;

/// Per-category sequence counters.
///
/// No setter exists; sequences only move forward through `increment_sequence`.
#[async_trait]
pub trait CounterStore: Send + Sync {
  /// Current value, `0` when the category has never been reserved.
  async fn current_sequence(&self, category: &str) -> CatalogResult<u64>;

  /// Atomically adds one (creating the counter at zero first) and returns the new value.
  async fn increment_sequence(&self, category: &str) -> CatalogResult<u64>;
}

#[async_trait]
pub trait ProductStore: Send + Sync {
  async fn list_products(&self) -> CatalogResult<Vec<Product>>;

  async fn search_products(&self, filter: &ProductFilter) -> CatalogResult<Vec<Product>>;

  async fn get_product(&self, record_id: Uuid) -> CatalogResult<Option<Product>>;

  async fn insert_product(&self, product: Product) -> CatalogResult<Product>;

  /// Returns `None` when no record has `record_id`.
  async fn update_product(&self, record_id: Uuid, patch: &ProductPatch) -> CatalogResult<Option<ProductUpdate>>;

  /// Removes and returns the record, `None` when it did not exist.
  async fn delete_product(&self, record_id: Uuid) -> CatalogResult<Option<Product>>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
  async fn find_user_by_email(&self, email: &Email) -> CatalogResult<Option<User>>;

  /// Fails with `CatalogError::DuplicateEmail` when the email is taken.
  async fn insert_user(&self, user: User) -> CatalogResult<User>;
}

/// Everything a backend must provide to serve the whole API.
pub trait CatalogStore: CounterStore + ProductStore + UserStore {}

impl<T> CatalogStore for T where T: CounterStore + ProductStore + UserStore {}
