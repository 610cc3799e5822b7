// tests/catalog_tests.rs
mod common;

use catalog_core::{CatalogError, ProductFilter, ProductPatch};
use common::*;
use uuid::Uuid;

#[tokio::test]
async fn test_create_with_category_reserves_an_id() {
  setup_tracing();
  let (_store, catalog) = memory_catalog();

  let first = catalog.create(new_product("Oslo Sofa", Some("SO"), 899.0)).await.unwrap();
  let second = catalog.create(new_product("Bergen Sofa", Some("SO"), 999.0)).await.unwrap();

  assert_eq!(first.id, "FURNSO0001");
  assert_eq!(second.id, "FURNSO0002");
  assert_eq!(first.category.as_deref(), Some("SO"));
  assert_ne!(first.record_id, second.record_id);
  // Peeking after creation points past the consumed numbers.
  assert_eq!(catalog.next_id("SO").await.unwrap(), "FURNSO0003");
}

#[tokio::test]
async fn test_create_without_category_uses_client_id() {
  setup_tracing();
  let (_store, catalog) = memory_catalog();

  let mut input = new_product("Side Table", None, 150.0);
  input.id = Some("LEGACY-42".into());
  let created = catalog.create(input).await.unwrap();
  assert_eq!(created.id, "LEGACY-42");
  assert!(created.category.is_none());
}

#[tokio::test]
async fn test_create_without_category_or_id_is_rejected() {
  setup_tracing();
  let (store, catalog) = memory_catalog();

  let err = catalog.create(new_product("Stool", None, 40.0)).await.unwrap_err();
  assert!(matches!(err, CatalogError::Validation(_)));
  assert_eq!(store.product_count(), 0);
}

#[tokio::test]
async fn test_create_validates_before_reserving() {
  setup_tracing();
  let (_store, catalog) = memory_catalog();

  let err = catalog.create(new_product("Broken", Some("SO"), -5.0)).await.unwrap_err();
  assert!(matches!(err, CatalogError::Validation(_)));
  assert_eq!(catalog.next_id("SO").await.unwrap(), "FURNSO0001");
}

#[tokio::test]
async fn test_search_without_filters_equals_list() {
  setup_tracing();
  let (_store, catalog) = memory_catalog();
  for (name, price) in [("Oak Chair", 120.0), ("Velvet Sofa", 1450.0), ("Lamp", 60.0)] {
    catalog.create(new_product(name, Some("XX"), price)).await.unwrap();
  }

  let listed = catalog.list().await.unwrap();
  let searched = catalog.search(ProductFilter::default()).await.unwrap();
  assert_eq!(listed, searched);
  assert_eq!(listed.len(), 3);
}

#[tokio::test]
async fn test_search_by_price_range_is_inclusive() {
  setup_tracing();
  let (_store, catalog) = memory_catalog();
  for price in [99.0, 100.0, 150.0, 200.0, 201.0] {
    catalog.create(new_product(&format!("Item {price}"), Some("IT"), price)).await.unwrap();
  }

  let filter = ProductFilter { min_price: Some(100.0), max_price: Some(200.0), ..Default::default() };
  let found = catalog.search(filter).await.unwrap();
  let prices: Vec<f64> = found.iter().map(|p| p.price).collect();
  assert_eq!(prices, vec![100.0, 150.0, 200.0]);
}

#[tokio::test]
async fn test_search_text_filters_are_case_insensitive() {
  setup_tracing();
  let (_store, catalog) = memory_catalog();
  catalog.create(new_product("Velvet Sofa", Some("SO"), 1450.0)).await.unwrap();
  catalog.create(new_product("Oak Chair", Some("CH"), 120.0)).await.unwrap();

  let filter = ProductFilter { name: Some("SOFA".into()), brand: Some("hall".into()), ..Default::default() };
  let found = catalog.search(filter).await.unwrap();
  assert_eq!(found.len(), 1);
  assert_eq!(found[0].name, "Velvet Sofa");
}

#[tokio::test]
async fn test_update_keeps_image_unless_replaced() {
  setup_tracing();
  let (_store, catalog) = memory_catalog();
  let created = catalog.create(new_product("Oak Chair", Some("CH"), 120.0)).await.unwrap();

  let patch = ProductPatch { price: Some(99.5), color: Some("Black".into()), ..Default::default() };
  let update = catalog.update(created.record_id, patch).await.unwrap();
  assert_eq!(update.product.price, 99.5);
  assert_eq!(update.product.color, "Black");
  assert_eq!(update.product.image, created.image);
  assert!(update.superseded_image().is_none());

  let patch = ProductPatch { image: Some("uploads/new.jpg".into()), ..Default::default() };
  let update = catalog.update(created.record_id, patch).await.unwrap();
  assert_eq!(update.product.image, "uploads/new.jpg");
  assert_eq!(update.superseded_image(), Some(created.image.as_str()));
  assert_eq!(update.product.id, created.id);
}

#[tokio::test]
async fn test_update_missing_product_is_not_found() {
  setup_tracing();
  let (_store, catalog) = memory_catalog();
  let patch = ProductPatch { name: Some("Ghost".into()), ..Default::default() };
  let err = catalog.update(Uuid::new_v4(), patch).await.unwrap_err();
  assert!(matches!(err, CatalogError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_missing_product_leaves_store_unchanged() {
  setup_tracing();
  let (store, catalog) = memory_catalog();
  catalog.create(new_product("Oak Chair", Some("CH"), 120.0)).await.unwrap();
  let before = catalog.list().await.unwrap();

  let err = catalog.delete(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, CatalogError::NotFound(_)));
  assert_eq!(store.product_count(), 1);
  assert_eq!(catalog.list().await.unwrap(), before);
}

#[tokio::test]
async fn test_delete_returns_removed_record() {
  setup_tracing();
  let (store, catalog) = memory_catalog();
  let created = catalog.create(new_product("Oak Chair", Some("CH"), 120.0)).await.unwrap();

  let removed = catalog.delete(created.record_id).await.unwrap();
  assert_eq!(removed, created);
  assert_eq!(store.product_count(), 0);
  assert!(matches!(catalog.get(created.record_id).await, Err(CatalogError::NotFound(_))));
}
