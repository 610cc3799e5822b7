// core/src/filter.rs

use crate::error::{CatalogError, CatalogResult};
use crate::model::Product;

/// Search criteria for products. All present criteria must match.
///
/// Text fields are case-insensitive substring matches on the literal text;
/// price bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
  pub name: Option<String>,
  pub color: Option<String>,
  pub material: Option<String>,
  pub brand: Option<String>,
  pub min_price: Option<f64>,
  pub max_price: Option<f64>,
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
  haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn non_blank(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}

/// Parses a numeric form or query value. Blank means "absent".
pub fn parse_number_field(field: &str, raw: Option<&str>) -> CatalogResult<Option<f64>> {
  let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
    return Ok(None);
  };
  match raw.parse::<f64>() {
    Ok(value) if value.is_finite() => Ok(Some(value)),
    _ => Err(CatalogError::validation(format!("'{}' must be a number", field))),
  }
}

impl ProductFilter {
  /// Drops blank text criteria so they impose no constraint.
  pub fn normalized(self) -> Self {
    ProductFilter {
      name: non_blank(self.name),
      color: non_blank(self.color),
      material: non_blank(self.material),
      brand: non_blank(self.brand),
      min_price: self.min_price,
      max_price: self.max_price,
    }
  }

  pub fn is_unconstrained(&self) -> bool {
    self.name.is_none()
      && self.color.is_none()
      && self.material.is_none()
      && self.brand.is_none()
      && self.min_price.is_none()
      && self.max_price.is_none()
  }

  pub fn matches(&self, product: &Product) -> bool {
    let text_fields = [
      (&self.name, &product.name),
      (&self.color, &product.color),
      (&self.material, &product.material),
      (&self.brand, &product.brand),
    ];
    let text_ok = text_fields
      .iter()
      .all(|(needle, haystack)| needle.as_deref().is_none_or(|n| contains_ignore_case(haystack, n)));

    text_ok
      && self.min_price.is_none_or(|min| product.price >= min)
      && self.max_price.is_none_or(|max| product.price <= max)
  }
}
