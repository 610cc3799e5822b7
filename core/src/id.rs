// core/src/id.rs

//! Catalog identifier allocation.
//!
//! Identifiers look like `FURN<CATEGORY><SEQ>` where `SEQ` is the category's
//! counter value zero-padded to four digits (`FURNSO0001`). Counter access is
//! funnelled through [`IdAllocator`], which only offers `peek` and `reserve`.

use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::error::{CatalogError, CatalogResult};
use crate::store::CounterStore;

pub const ID_PREFIX: &str = "FURN";

/// A validated category code such as `SO` or `CH`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryCode(String);

impl CategoryCode {
  pub fn parse(raw: &str) -> CatalogResult<Self> {
    let code = raw.trim();
    if code.is_empty() {
      return Err(CatalogError::validation("Category is required"));
    }
    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
      return Err(CatalogError::validation(
        "Category must contain only letters and digits",
      ));
    }
    Ok(CategoryCode(code.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for CategoryCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

pub fn format_product_id(category: &CategoryCode, seq: u64) -> String {
  format!("{}{}{:04}", ID_PREFIX, category, seq)
}

/// Single choke point for counter-backed identifiers.
pub struct IdAllocator<S: CounterStore + ?Sized> {
  counters: Arc<S>,
}

impl<S: CounterStore + ?Sized> Clone for IdAllocator<S> {
  fn clone(&self) -> Self {
    IdAllocator { counters: Arc::clone(&self.counters) }
  }
}

impl<S: CounterStore + ?Sized> IdAllocator<S> {
  pub fn new(counters: Arc<S>) -> Self {
    IdAllocator { counters }
  }

  /// The identifier the next reservation would produce. Never mutates the counter.
  #[instrument(name = "id_allocator::peek", skip_all, fields(category = %category))]
  pub async fn peek(&self, category: &CategoryCode) -> CatalogResult<String> {
    let current = self.counters.current_sequence(category.as_str()).await?;
    let candidate = format_product_id(category, current + 1);
    debug!(%candidate, "Computed next identifier without reserving it.");
    Ok(candidate)
  }

  /// Permanently consumes the next sequence number for `category`.
  #[instrument(name = "id_allocator::reserve", skip_all, fields(category = %category))]
  pub async fn reserve(&self, category: &CategoryCode) -> CatalogResult<String> {
    let seq = self.counters.increment_sequence(category.as_str()).await?;
    let id = format_product_id(category, seq);
    debug!(%id, seq, "Reserved identifier.");
    Ok(id)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ids_are_zero_padded_to_four_digits() {
    let so = CategoryCode::parse("SO").unwrap();
    assert_eq!(format_product_id(&so, 1), "FURNSO0001");
    assert_eq!(format_product_id(&so, 42), "FURNSO0042");
    assert_eq!(format_product_id(&so, 12345), "FURNSO12345");
  }

  #[test]
  fn category_codes_are_trimmed_and_checked() {
    assert_eq!(CategoryCode::parse(" CH ").unwrap().as_str(), "CH");
    assert!(CategoryCode::parse("").is_err());
    assert!(CategoryCode::parse("S O").is_err());
    assert!(CategoryCode::parse("SO/1").is_err());
  }
}
