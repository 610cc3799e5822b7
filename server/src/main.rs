// server/src/main.rs

use actix_cors::Cors;
use actix_web::{App, HttpServer};
use std::sync::Arc;

use catalog_core::CatalogStore;
use catalog_server::config::AppConfig;
use catalog_server::db::{self, PgStore};
use catalog_server::state::AppState;
use catalog_server::telemetry;
use catalog_server::web;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  telemetry::init_tracing();
  tracing::info!("Starting furniture catalog server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => cfg,
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(e.into());
    }
  };

  let pg_store = match PgStore::connect(&app_config).await {
    Ok(store) => store,
    Err(e) => {
      tracing::error!(error = %e, "Failed to connect to the database.");
      return Err(e);
    }
  };

  if app_config.init_db_schema {
    db::ensure_schema(pg_store.pool()).await?;
  }

  let store: Arc<dyn CatalogStore> = Arc::new(pg_store);
  let app_state = AppState::from_config(store, &app_config);
  app_state.images.ensure_dir().await?;

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .configure(web::configure_app(app_state.clone()))
      .wrap(Cors::permissive())
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
  })
  .bind(&server_address)?
  .run()
  .await?;

  Ok(())
}
