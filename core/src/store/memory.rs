// core/src/store/memory.rs

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::filter::ProductFilter;
use crate::model::{Email, Product, ProductPatch, ProductUpdate, User};
use crate::store::{CounterStore, ProductStore, UserStore};

#[derive(Debug, Default)]
struct Collections {
  // Insertion order is kept so listings are stable.
  products: Vec<Product>,
  counters: HashMap<String, u64>,
  users: HashMap<Email, User>,
}

/// In-process backend.
///
/// Every operation takes the lock once and releases it before returning, so
/// the guard is never held across an `.await`.
#[derive(Debug, Default)]
pub struct MemoryStore {
  inner: RwLock<Collections>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn product_count(&self) -> usize {
    self.inner.read().products.len()
  }
}

#[async_trait]
impl CounterStore for MemoryStore {
  async fn current_sequence(&self, category: &str) -> CatalogResult<u64> {
    Ok(self.inner.read().counters.get(category).copied().unwrap_or(0))
  }

  async fn increment_sequence(&self, category: &str) -> CatalogResult<u64> {
    let mut guard = self.inner.write();
    let seq = guard.counters.entry(category.to_string()).or_insert(0);
    *seq += 1;
    Ok(*seq)
  }
}

#[async_trait]
impl ProductStore for MemoryStore {
  async fn list_products(&self) -> CatalogResult<Vec<Product>> {
    Ok(self.inner.read().products.clone())
  }

  async fn search_products(&self, filter: &ProductFilter) -> CatalogResult<Vec<Product>> {
    let guard = self.inner.read();
    Ok(guard.products.iter().filter(|p| filter.matches(p)).cloned().collect())
  }

  async fn get_product(&self, record_id: Uuid) -> CatalogResult<Option<Product>> {
    let guard = self.inner.read();
    Ok(guard.products.iter().find(|p| p.record_id == record_id).cloned())
  }

  async fn insert_product(&self, product: Product) -> CatalogResult<Product> {
    let mut guard = self.inner.write();
    if guard.products.iter().any(|p| p.record_id == product.record_id) {
      return Err(CatalogError::storage(anyhow::anyhow!(
        "duplicate record id {}",
        product.record_id
      )));
    }
    guard.products.push(product.clone());
    Ok(product)
  }

  async fn update_product(&self, record_id: Uuid, patch: &ProductPatch) -> CatalogResult<Option<ProductUpdate>> {
    let mut guard = self.inner.write();
    let Some(product) = guard.products.iter_mut().find(|p| p.record_id == record_id) else {
      return Ok(None);
    };
    let previous_image = product.image.clone();
    patch.apply_to(product);
    Ok(Some(ProductUpdate {
      product: product.clone(),
      previous_image,
    }))
  }

  async fn delete_product(&self, record_id: Uuid) -> CatalogResult<Option<Product>> {
    let mut guard = self.inner.write();
    let position = guard.products.iter().position(|p| p.record_id == record_id);
    Ok(position.map(|idx| guard.products.remove(idx)))
  }
}

#[async_trait]
impl UserStore for MemoryStore {
  async fn find_user_by_email(&self, email: &Email) -> CatalogResult<Option<User>> {
    Ok(self.inner.read().users.get(email).cloned())
  }

  async fn insert_user(&self, user: User) -> CatalogResult<User> {
    let mut guard = self.inner.write();
    if guard.users.contains_key(&user.email) {
      return Err(CatalogError::DuplicateEmail);
    }
    guard.users.insert(user.email.clone(), user.clone());
    Ok(user)
  }
}
