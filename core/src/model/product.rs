// core/src/model/product.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};

/// A furniture product as stored and returned by the API.
///
/// `record_id` is the storage key used in URLs. `id` is the catalog
/// identifier (e.g. `FURNSO0001`) and is not guaranteed unique by storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub record_id: Uuid,
  pub id: String,
  pub name: String,
  pub material: String,
  pub color: String,
  pub price: f64,
  pub image: String,
  pub brand: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
}

/// Fields accepted when creating a product.
///
/// Either `category` (server-generated id) or `id` (client-supplied) must be present.
#[derive(Debug, Clone, Default)]
pub struct NewProduct {
  pub id: Option<String>,
  pub name: String,
  pub material: String,
  pub color: String,
  pub price: f64,
  pub image: String,
  pub brand: String,
  pub category: Option<String>,
}

/// Partial update. `None` leaves the stored value untouched.
///
/// `image` is only ever set when a new file was uploaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
  pub name: Option<String>,
  pub material: Option<String>,
  pub color: Option<String>,
  pub price: Option<f64>,
  pub brand: Option<String>,
  pub image: Option<String>,
}

/// Result of a successful update, with the image path the record held before.
#[derive(Debug, Clone)]
pub struct ProductUpdate {
  pub product: Product,
  pub previous_image: String,
}

impl ProductUpdate {
  /// The old image path if the update replaced it.
  pub fn superseded_image(&self) -> Option<&str> {
    (self.previous_image != self.product.image).then_some(self.previous_image.as_str())
  }
}

pub fn validate_price(price: f64) -> CatalogResult<f64> {
  if !price.is_finite() || price < 0.0 {
    return Err(CatalogError::validation("Price must be a non-negative number"));
  }
  Ok(price)
}

fn require(field: &str, value: &str) -> CatalogResult<()> {
  if value.trim().is_empty() {
    return Err(CatalogError::validation(format!("Field '{}' is required", field)));
  }
  Ok(())
}

impl NewProduct {
  pub fn validate(&self) -> CatalogResult<()> {
    require("name", &self.name)?;
    require("material", &self.material)?;
    require("color", &self.color)?;
    require("brand", &self.brand)?;
    require("image", &self.image)?;
    validate_price(self.price)?;
    Ok(())
  }

  pub fn into_product(self, id: String) -> Product {
    Product {
      record_id: Uuid::new_v4(),
      id,
      name: self.name,
      material: self.material,
      color: self.color,
      price: self.price,
      image: self.image,
      brand: self.brand,
      category: self.category,
    }
  }
}

impl ProductPatch {
  pub fn validate(&self) -> CatalogResult<()> {
    if let Some(price) = self.price {
      validate_price(price)?;
    }
    Ok(())
  }

  pub fn apply_to(&self, product: &mut Product) {
    if let Some(name) = &self.name {
      product.name = name.clone();
    }
    if let Some(material) = &self.material {
      product.material = material.clone();
    }
    if let Some(color) = &self.color {
      product.color = color.clone();
    }
    if let Some(price) = self.price {
      product.price = price;
    }
    if let Some(brand) = &self.brand {
      product.brand = brand.clone();
    }
    if let Some(image) = &self.image {
      product.image = image.clone();
    }
  }
}
