// core/src/catalog.rs

//! Product CRUD and search on top of a [`CatalogStore`].

use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::filter::ProductFilter;
use crate::id::{CategoryCode, IdAllocator};
use crate::model::{NewProduct, Product, ProductPatch, ProductUpdate};
use crate::store::CatalogStore;

#[derive(Clone)]
pub struct ProductCatalog {
  store: Arc<dyn CatalogStore>,
  ids: IdAllocator<dyn CatalogStore>,
}

fn not_found(record_id: Uuid) -> CatalogError {
  CatalogError::not_found(format!("Product {} not found", record_id))
}

impl ProductCatalog {
  pub fn new(store: Arc<dyn CatalogStore>) -> Self {
    let ids = IdAllocator::new(Arc::clone(&store));
    ProductCatalog { store, ids }
  }

  /// Preview of the identifier the next product in `category` would get.
  pub async fn next_id(&self, category: &str) -> CatalogResult<String> {
    let code = CategoryCode::parse(category)?;
    self.ids.peek(&code).await
  }

  pub async fn list(&self) -> CatalogResult<Vec<Product>> {
    self.store.list_products().await
  }

  #[instrument(name = "catalog::search", skip(self))]
  pub async fn search(&self, filter: ProductFilter) -> CatalogResult<Vec<Product>> {
    let filter = filter.normalized();
    if filter.is_unconstrained() {
      return self.store.list_products().await;
    }
    self.store.search_products(&filter).await
  }

  pub async fn get(&self, record_id: Uuid) -> CatalogResult<Product> {
    self.store.get_product(record_id).await?.ok_or_else(|| not_found(record_id))
  }

  /// Creates a product. With a category the id is reserved from that
  /// category's counter; without one the caller's `id` is used as-is.
  #[instrument(name = "catalog::create", skip_all, fields(name = %new_product.name))]
  pub async fn create(&self, new_product: NewProduct) -> CatalogResult<Product> {
    new_product.validate()?;

    let category = new_product
      .category
      .as_deref()
      .map(str::trim)
      .filter(|c| !c.is_empty())
      .map(CategoryCode::parse)
      .transpose()?;

    let id = match (&category, new_product.id.as_deref().map(str::trim)) {
      (Some(code), _) => self.ids.reserve(code).await?,
      (None, Some(client_id)) if !client_id.is_empty() => client_id.to_string(),
      (None, _) => {
        return Err(CatalogError::validation(
          "Either 'category' or 'id' must be provided",
        ))
      }
    };

    let mut product = new_product.into_product(id);
    product.category = category.map(|c| c.as_str().to_string());
    let saved = self.store.insert_product(product).await?;
    info!(record_id = %saved.record_id, id = %saved.id, "Product created.");
    Ok(saved)
  }

  #[instrument(name = "catalog::update", skip(self, patch))]
  pub async fn update(&self, record_id: Uuid, patch: ProductPatch) -> CatalogResult<ProductUpdate> {
    patch.validate()?;
    match self.store.update_product(record_id, &patch).await? {
      Some(update) => {
        info!(id = %update.product.id, image_replaced = update.superseded_image().is_some(), "Product updated.");
        Ok(update)
      }
      None => {
        warn!("Update target does not exist.");
        Err(not_found(record_id))
      }
    }
  }

  /// Removes the record and returns it so the caller can clean up its image.
  #[instrument(name = "catalog::delete", skip(self))]
  pub async fn delete(&self, record_id: Uuid) -> CatalogResult<Product> {
    match self.store.delete_product(record_id).await? {
      Some(removed) => {
        info!(id = %removed.id, "Product deleted.");
        Ok(removed)
      }
      None => {
        warn!("Delete target does not exist.");
        Err(not_found(record_id))
      }
    }
  }
}
