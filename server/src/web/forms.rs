// server/src/web/forms.rs

//! Multipart product forms: text fields plus an optional `image` file.

use actix_multipart::Multipart;
use futures_util::TryStreamExt;
use std::collections::HashMap;
use tracing::debug;

use catalog_core::{parse_number_field, NewProduct, ProductPatch};

use crate::errors::AppError;

const IMAGE_FIELD: &str = "image";
const MAX_TEXT_FIELD_BYTES: usize = 16 * 1024;

#[derive(Debug)]
pub struct UploadedFile {
  pub file_name: Option<String>,
  pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct ProductForm {
  fields: HashMap<String, String>,
  pub image: Option<UploadedFile>,
}

fn multipart_error(err: impl std::fmt::Display) -> AppError {
  AppError::Validation(format!("Malformed multipart body: {}", err))
}

impl ProductForm {
  /// Drains the multipart stream. The `image` file is capped at `max_image_bytes`,
  /// text fields at a fixed small limit, and files under any other name are rejected.
  pub async fn read(mut payload: Multipart, max_image_bytes: usize) -> Result<Self, AppError> {
    let mut form = ProductForm::default();

    while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
      let Some(name) = field.name().map(str::to_owned) else {
        continue;
      };
      let file_name = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .map(str::to_owned);

      let is_image = name == IMAGE_FIELD && file_name.is_some();
      if file_name.is_some() && !is_image {
        return Err(AppError::Validation(format!("Unexpected file field '{}'", name)));
      }

      let (limit, what) = if is_image {
        (max_image_bytes, "Image")
      } else {
        (MAX_TEXT_FIELD_BYTES, "Text field")
      };
      let mut bytes = Vec::new();
      while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
        if bytes.len() + chunk.len() > limit {
          return Err(AppError::Validation(format!(
            "{} '{}' exceeds the {} byte limit",
            what, name, limit
          )));
        }
        bytes.extend_from_slice(&chunk);
      }

      if is_image {
        // Browsers send an empty file part when no file was picked.
        if !bytes.is_empty() {
          form.image = Some(UploadedFile { file_name, bytes });
        }
      } else {
        let value = String::from_utf8(bytes)
          .map_err(|_| AppError::Validation(format!("Field '{}' is not valid UTF-8", name)))?;
        form.fields.insert(name, value);
      }
    }

    debug!(fields = form.fields.len(), has_image = form.image.is_some(), "Multipart form read.");
    Ok(form)
  }

  /// Non-blank text value of a field.
  pub fn text(&self, name: &str) -> Option<String> {
    self
      .fields
      .get(name)
      .map(|v| v.trim())
      .filter(|v| !v.is_empty())
      .map(str::to_owned)
  }

  fn price(&self) -> Result<Option<f64>, AppError> {
    Ok(parse_number_field("price", self.text("price").as_deref())?)
  }

  /// Fields for a create. `image_path` is where the uploaded file was stored.
  pub fn to_new_product(&self, image_path: String) -> Result<NewProduct, AppError> {
    let price = self
      .price()?
      .ok_or_else(|| AppError::Validation("Field 'price' is required".to_string()))?;
    Ok(NewProduct {
      id: self.text("id"),
      name: self.text("name").unwrap_or_default(),
      material: self.text("material").unwrap_or_default(),
      color: self.text("color").unwrap_or_default(),
      price,
      image: image_path,
      brand: self.text("brand").unwrap_or_default(),
      category: self.text("category"),
    })
  }

  /// Patch for an update. Any `image` text field is ignored; only a new
  /// upload (passed as `image_path`) replaces the image.
  pub fn to_patch(&self, image_path: Option<String>) -> Result<ProductPatch, AppError> {
    Ok(ProductPatch {
      name: self.text("name"),
      material: self.text("material"),
      color: self.text("color"),
      price: self.price()?,
      brand: self.text("brand"),
      image: image_path,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn form(pairs: &[(&str, &str)]) -> ProductForm {
    ProductForm {
      fields: pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
      image: None,
    }
  }

  #[test]
  fn blank_fields_are_absent_in_patch() {
    let patch = form(&[("name", "  "), ("color", "Teal"), ("image", "uploads/other.png")])
      .to_patch(None)
      .unwrap();
    assert_eq!(patch.name, None);
    assert_eq!(patch.color.as_deref(), Some("Teal"));
    assert_eq!(patch.image, None);
  }

  #[test]
  fn create_requires_a_numeric_price() {
    let missing = form(&[("name", "Chair")]).to_new_product("uploads/a.png".into());
    assert!(matches!(missing, Err(AppError::Validation(_))));

    let bad = form(&[("price", "cheap")]).to_new_product("uploads/a.png".into());
    assert!(matches!(bad, Err(AppError::Validation(_))));

    let ok = form(&[("price", "12.50"), ("category", "CH")])
      .to_new_product("uploads/a.png".into())
      .unwrap();
    assert_eq!(ok.price, 12.5);
    assert_eq!(ok.category.as_deref(), Some("CH"));
    assert_eq!(ok.image, "uploads/a.png");
  }
}
