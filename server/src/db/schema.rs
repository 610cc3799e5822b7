// server/src/db/schema.rs

use sqlx::PgPool;
use tracing::info;

/// Idempotent DDL for a fresh database. `id` carries no unique constraint:
/// catalog identifiers are only unique through the counter allocator.
const SCHEMA: &[&str] = &[
  "CREATE TABLE IF NOT EXISTS products (
     record_id  UUID PRIMARY KEY,
     id         TEXT NOT NULL,
     name       TEXT NOT NULL,
     material   TEXT NOT NULL,
     color      TEXT NOT NULL,
     price      DOUBLE PRECISION NOT NULL CHECK (price >= 0),
     image      TEXT NOT NULL,
     brand      TEXT NOT NULL,
     category   TEXT,
     created_at TIMESTAMPTZ NOT NULL DEFAULT now()
   )",
  "CREATE INDEX IF NOT EXISTS products_id_idx ON products (id)",
  "CREATE TABLE IF NOT EXISTS product_counters (
     category TEXT PRIMARY KEY,
     seq      BIGINT NOT NULL DEFAULT 0 CHECK (seq >= 0)
   )",
  "CREATE TABLE IF NOT EXISTS users (
     id            UUID PRIMARY KEY,
     email         TEXT NOT NULL UNIQUE,
     password_hash TEXT NOT NULL,
     created_at    TIMESTAMPTZ NOT NULL DEFAULT now()
   )",
];

pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
  for statement in SCHEMA {
    sqlx::query(statement).execute(pool).await?;
  }
  info!(statements = SCHEMA.len(), "Database schema ensured.");
  Ok(())
}
