// server/src/state.rs
use crate::config::AppConfig;
use crate::services::{AccountService, TokenIssuer};
use crate::uploads::ImageStore;
use catalog_core::{CatalogStore, ProductCatalog};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub catalog: ProductCatalog,
  pub accounts: AccountService,
  pub images: ImageStore,
}

impl AppState {
  pub fn new(store: Arc<dyn CatalogStore>, tokens: TokenIssuer, images: ImageStore) -> Self {
    AppState {
      catalog: ProductCatalog::new(Arc::clone(&store)),
      accounts: AccountService::new(store, tokens),
      images,
    }
  }

  pub fn from_config(store: Arc<dyn CatalogStore>, config: &AppConfig) -> Self {
    Self::new(
      store,
      TokenIssuer::new(&config.jwt_secret),
      ImageStore::new(config.upload_dir.clone(), config.max_image_bytes),
    )
  }
}
