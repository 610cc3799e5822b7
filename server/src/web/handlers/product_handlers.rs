// server/src/web/handlers/product_handlers.rs

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use catalog_core::{parse_number_field, ProductFilter};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::forms::ProductForm;

#[derive(Deserialize, Debug)]
pub struct GenerateIdPayload {
  #[serde(default)]
  pub category: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
  pub name: Option<String>,
  pub color: Option<String>,
  pub material: Option<String>,
  pub brand: Option<String>,
  // Kept as text so a bad number becomes our own 400 message.
  pub min_price: Option<String>,
  pub max_price: Option<String>,
}

impl SearchQuery {
  fn into_filter(self) -> Result<ProductFilter, AppError> {
    Ok(ProductFilter {
      min_price: parse_number_field("minPrice", self.min_price.as_deref())?,
      max_price: parse_number_field("maxPrice", self.max_price.as_deref())?,
      name: self.name,
      color: self.color,
      material: self.material,
      brand: self.brand,
    })
  }
}

/// Previews the next identifier for a category without consuming it.
#[instrument(name = "handler::generate_product_id", skip(app_state), fields(category = %payload.category))]
pub async fn generate_id_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<GenerateIdPayload>,
) -> Result<HttpResponse, AppError> {
  let id = app_state.catalog.next_id(&payload.category).await?;
  Ok(HttpResponse::Ok().json(json!({ "id": id })))
}

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = app_state.catalog.list().await?;
  info!("Successfully fetched {} products.", products.len());
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::search_products", skip(app_state))]
pub async fn search_products_handler(
  app_state: web::Data<AppState>,
  query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
  let filter = query.into_inner().into_filter()?;
  let products = app_state.catalog.search(filter).await?;
  info!("Search matched {} products.", products.len());
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(record_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let product = app_state.catalog.get(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(product))
}

#[instrument(name = "handler::create_product", skip(app_state, payload))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  payload: Multipart,
) -> Result<HttpResponse, AppError> {
  let images = &app_state.images;
  let mut form = ProductForm::read(payload, images.max_bytes()).await?;
  let upload = form
    .image
    .take()
    .ok_or_else(|| AppError::Validation("Field 'image' is required".to_string()))?;

  let stored_image = images.save(upload.file_name.as_deref(), &upload.bytes).await?;

  let created = match form.to_new_product(stored_image.clone()) {
    Ok(new_product) => app_state.catalog.create(new_product).await.map_err(AppError::from),
    Err(e) => Err(e),
  };

  match created {
    Ok(product) => Ok(HttpResponse::Created().json(product)),
    Err(e) => {
      warn!(error = %e, "Product not created; discarding uploaded image.");
      images.remove(&stored_image).await;
      Err(e)
    }
  }
}

/// Partial update. The image only changes when a new file is uploaded; the
/// superseded file is then removed.
#[instrument(name = "handler::update_product", skip(app_state, path, payload), fields(record_id = %path.as_ref()))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: Multipart,
) -> Result<HttpResponse, AppError> {
  let record_id = path.into_inner();
  let images = &app_state.images;
  let mut form = ProductForm::read(payload, images.max_bytes()).await?;

  let new_image = match form.image.take() {
    Some(upload) => Some(images.save(upload.file_name.as_deref(), &upload.bytes).await?),
    None => None,
  };

  let updated = match form.to_patch(new_image.clone()) {
    Ok(patch) => app_state.catalog.update(record_id, patch).await.map_err(AppError::from),
    Err(e) => Err(e),
  };

  match updated {
    Ok(update) => {
      if let Some(old_image) = update.superseded_image() {
        images.remove(old_image).await;
      }
      Ok(HttpResponse::Ok().json(update.product))
    }
    Err(e) => {
      if let Some(stored) = &new_image {
        images.remove(stored).await;
      }
      Err(e)
    }
  }
}

#[instrument(name = "handler::delete_product", skip(app_state, path), fields(record_id = %path.as_ref()))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let removed = app_state.catalog.delete(path.into_inner()).await?;
  // The record is gone either way; a failed file removal is only logged.
  app_state.images.remove(&removed.image).await;
  Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn search_query_parses_price_bounds() {
    let query = SearchQuery {
      name: Some("sofa".into()),
      min_price: Some("100".into()),
      max_price: Some("".into()),
      ..Default::default()
    };
    let filter = query.into_filter().unwrap();
    assert_eq!(filter.min_price, Some(100.0));
    assert_eq!(filter.max_price, None);
    assert_eq!(filter.name.as_deref(), Some("sofa"));
  }

  #[test]
  fn non_numeric_price_bound_is_a_validation_error() {
    let query = SearchQuery { max_price: Some("lots".into()), ..Default::default() };
    assert!(matches!(query.into_filter(), Err(AppError::Validation(m)) if m.contains("maxPrice")));
  }
}
