// server/src/db/mod.rs

//! Postgres backend for the catalog storage traits.
//!
//! Uses runtime queries (`query_as` / `QueryBuilder`) so the crate builds
//! without a live database.

use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{error, info, instrument};
use uuid::Uuid;

use catalog_core::{
  CatalogError, CatalogResult, CounterStore, Email, Product, ProductFilter, ProductPatch, ProductStore,
  ProductUpdate, User, UserStore,
};

use crate::config::AppConfig;

pub mod schema;

pub use schema::ensure_schema;

const PRODUCT_COLUMNS: &str = "record_id, id, name, material, color, price, image, brand, category";

#[derive(Debug, FromRow)]
struct ProductRow {
  record_id: Uuid,
  id: String,
  name: String,
  material: String,
  color: String,
  price: f64,
  image: String,
  brand: String,
  category: Option<String>,
}

impl From<ProductRow> for Product {
  fn from(row: ProductRow) -> Self {
    Product {
      record_id: row.record_id,
      id: row.id,
      name: row.name,
      material: row.material,
      color: row.color,
      price: row.price,
      image: row.image,
      brand: row.brand,
      category: row.category,
    }
  }
}

#[derive(Debug, FromRow)]
struct UpdatedProductRow {
  previous_image: String,
  #[sqlx(flatten)]
  product: ProductRow,
}

#[derive(Debug, FromRow)]
struct UserRow {
  id: Uuid,
  email: String,
  password_hash: String,
  created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<UserRow> for User {
  type Error = CatalogError;

  fn try_from(row: UserRow) -> Result<Self, Self::Error> {
    Ok(User {
      id: row.id,
      email: Email::parse(&row.email)?,
      password_hash: row.password_hash,
      created_at: row.created_at,
    })
  }
}

/// Escapes `%`, `_` and `\` so user text matches literally inside `ILIKE`.
pub fn like_pattern(text: &str) -> String {
  let mut pattern = String::with_capacity(text.len() + 2);
  pattern.push('%');
  for c in text.chars() {
    if matches!(c, '%' | '_' | '\\') {
      pattern.push('\\');
    }
    pattern.push(c);
  }
  pattern.push('%');
  pattern
}

fn storage(err: sqlx::Error, what: &'static str) -> CatalogError {
  error!(error = %err, "Database error while {}.", what);
  CatalogError::storage(anyhow::Error::new(err).context(what))
}

#[derive(Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    PgStore { pool }
  }

  pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
    let pool = PgPoolOptions::new()
      .max_connections(config.db_max_connections)
      .connect(&config.database_url)
      .await
      .context("connecting to the database")?;
    info!("Successfully connected to the database.");
    Ok(PgStore { pool })
  }

  pub fn pool(&self) -> &PgPool {
    &self.pool
  }
}

#[async_trait]
impl CounterStore for PgStore {
  async fn current_sequence(&self, category: &str) -> CatalogResult<u64> {
    let seq: Option<i64> = sqlx::query_scalar("SELECT seq FROM product_counters WHERE category = $1")
      .bind(category)
      .fetch_optional(&self.pool)
      .await
      .map_err(|e| storage(e, "reading a category counter"))?;
    sequence_from_db(seq.unwrap_or(0))
  }

  #[instrument(name = "pg_store::increment_sequence", skip(self))]
  async fn increment_sequence(&self, category: &str) -> CatalogResult<u64> {
    // Single statement: concurrent callers serialize on the row lock.
    let seq: i64 = sqlx::query_scalar(
      "INSERT INTO product_counters (category, seq) VALUES ($1, 1) \
       ON CONFLICT (category) DO UPDATE SET seq = product_counters.seq + 1 \
       RETURNING seq",
    )
    .bind(category)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| storage(e, "incrementing a category counter"))?;
    sequence_from_db(seq)
  }
}

fn sequence_from_db(seq: i64) -> CatalogResult<u64> {
  u64::try_from(seq).map_err(|_| CatalogError::storage(anyhow::anyhow!("negative counter value {}", seq)))
}

fn push_search_conditions(qb: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
  let text_columns = [
    ("name", &filter.name),
    ("color", &filter.color),
    ("material", &filter.material),
    ("brand", &filter.brand),
  ];
  for (column, value) in text_columns {
    if let Some(value) = value {
      qb.push(" AND ").push(column).push(" ILIKE ").push_bind(like_pattern(value));
    }
  }
  if let Some(min) = filter.min_price {
    qb.push(" AND price >= ").push_bind(min);
  }
  if let Some(max) = filter.max_price {
    qb.push(" AND price <= ").push_bind(max);
  }
}

#[async_trait]
impl ProductStore for PgStore {
  async fn list_products(&self) -> CatalogResult<Vec<Product>> {
    let rows: Vec<ProductRow> = sqlx::query_as(&format!(
      "SELECT {} FROM products ORDER BY created_at, record_id",
      PRODUCT_COLUMNS
    ))
    .fetch_all(&self.pool)
    .await
    .map_err(|e| storage(e, "listing products"))?;
    Ok(rows.into_iter().map(Product::from).collect())
  }

  #[instrument(name = "pg_store::search_products", skip(self))]
  async fn search_products(&self, filter: &ProductFilter) -> CatalogResult<Vec<Product>> {
    let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM products WHERE TRUE", PRODUCT_COLUMNS));
    push_search_conditions(&mut qb, filter);
    qb.push(" ORDER BY created_at, record_id");

    let rows: Vec<ProductRow> = qb
      .build_query_as::<ProductRow>()
      .fetch_all(&self.pool)
      .await
      .map_err(|e| storage(e, "searching products"))?;
    Ok(rows.into_iter().map(Product::from).collect())
  }

  async fn get_product(&self, record_id: Uuid) -> CatalogResult<Option<Product>> {
    let row: Option<ProductRow> = sqlx::query_as(&format!(
      "SELECT {} FROM products WHERE record_id = $1",
      PRODUCT_COLUMNS
    ))
    .bind(record_id)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| storage(e, "fetching a product"))?;
    Ok(row.map(Product::from))
  }

  async fn insert_product(&self, product: Product) -> CatalogResult<Product> {
    let row: ProductRow = sqlx::query_as(&format!(
      "INSERT INTO products ({cols}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {cols}",
      cols = PRODUCT_COLUMNS
    ))
    .bind(product.record_id)
    .bind(&product.id)
    .bind(&product.name)
    .bind(&product.material)
    .bind(&product.color)
    .bind(product.price)
    .bind(&product.image)
    .bind(&product.brand)
    .bind(&product.category)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| storage(e, "inserting a product"))?;
    Ok(row.into())
  }

  async fn update_product(&self, record_id: Uuid, patch: &ProductPatch) -> CatalogResult<Option<ProductUpdate>> {
    // `old` is read from the pre-update snapshot, giving us the replaced image path.
    let row: Option<UpdatedProductRow> = sqlx::query_as(
      "UPDATE products AS p SET \
         name = COALESCE($2, p.name), \
         material = COALESCE($3, p.material), \
         color = COALESCE($4, p.color), \
         price = COALESCE($5, p.price), \
         brand = COALESCE($6, p.brand), \
         image = COALESCE($7, p.image) \
       FROM products AS old \
       WHERE p.record_id = $1 AND old.record_id = p.record_id \
       RETURNING old.image AS previous_image, p.record_id, p.id, p.name, p.material, p.color, \
         p.price, p.image, p.brand, p.category",
    )
    .bind(record_id)
    .bind(&patch.name)
    .bind(&patch.material)
    .bind(&patch.color)
    .bind(patch.price)
    .bind(&patch.brand)
    .bind(&patch.image)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| storage(e, "updating a product"))?;

    Ok(row.map(|r| ProductUpdate {
      previous_image: r.previous_image,
      product: r.product.into(),
    }))
  }

  async fn delete_product(&self, record_id: Uuid) -> CatalogResult<Option<Product>> {
    let row: Option<ProductRow> = sqlx::query_as(&format!(
      "DELETE FROM products WHERE record_id = $1 RETURNING {}",
      PRODUCT_COLUMNS
    ))
    .bind(record_id)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| storage(e, "deleting a product"))?;
    Ok(row.map(Product::from))
  }
}

#[async_trait]
impl UserStore for PgStore {
  async fn find_user_by_email(&self, email: &Email) -> CatalogResult<Option<User>> {
    let row: Option<UserRow> =
      sqlx::query_as("SELECT id, email, password_hash, created_at FROM users WHERE email = $1")
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage(e, "fetching a user"))?;
    row.map(User::try_from).transpose()
  }

  async fn insert_user(&self, user: User) -> CatalogResult<User> {
    let result = sqlx::query_as::<_, UserRow>(
      "INSERT INTO users (id, email, password_hash, created_at) VALUES ($1, $2, $3, $4) \
       RETURNING id, email, password_hash, created_at",
    )
    .bind(user.id)
    .bind(user.email.as_str())
    .bind(&user.password_hash)
    .bind(user.created_at)
    .fetch_one(&self.pool)
    .await;

    match result {
      Ok(row) => User::try_from(row),
      Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(CatalogError::DuplicateEmail),
      Err(e) => Err(storage(e, "inserting a user")),
    }
  }
}
