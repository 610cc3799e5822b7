// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use catalog_core::{CatalogStore, MemoryStore, NewProduct, ProductCatalog};
use std::sync::Arc;
use tracing::Level;

// --- Fixtures ---
pub fn memory_catalog() -> (Arc<MemoryStore>, ProductCatalog) {
  let store = Arc::new(MemoryStore::new());
  let dyn_store: Arc<dyn CatalogStore> = store.clone();
  (store, ProductCatalog::new(dyn_store))
}

pub fn new_product(name: &str, category: Option<&str>, price: f64) -> NewProduct {
  NewProduct {
    id: None,
    name: name.to_string(),
    material: "Walnut".to_string(),
    color: "Natural".to_string(),
    price,
    image: format!("uploads/{}.jpg", name.to_lowercase().replace(' ', "-")),
    brand: "Hallberg".to_string(),
    category: category.map(str::to_string),
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
