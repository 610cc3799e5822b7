// server/src/web/routes.rs

use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::web::handlers::{auth_handlers, product_handlers};

async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Malformed JSON bodies get the same `{ "error": .. }` shape as every other 400.
pub fn json_config() -> web::JsonConfig {
  web::JsonConfig::default()
    .error_handler(|err, _req| AppError::Validation(format!("Invalid JSON body: {}", err)).into())
}

pub fn path_config() -> web::PathConfig {
  web::PathConfig::default().error_handler(|_err, _req| AppError::NotFound("Product not found".to_string()).into())
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api")
      .route("/health", web::get().to(health_check_handler))
      .service(
        web::scope("/auth")
          .route("/register", web::post().to(auth_handlers::register_handler))
          .route("/login", web::post().to(auth_handlers::login_handler)),
      )
      .service(
        web::scope("/products")
          // Literal segments are registered before `/{record_id}`.
          .route("/generate-id", web::post().to(product_handlers::generate_id_handler))
          .route("/search", web::get().to(product_handlers::search_products_handler))
          .route("", web::get().to(product_handlers::list_products_handler))
          .route("", web::post().to(product_handlers::create_product_handler))
          .route("/{record_id}", web::get().to(product_handlers::get_product_handler))
          .route("/{record_id}", web::put().to(product_handlers::update_product_handler))
          .route("/{record_id}", web::delete().to(product_handlers::delete_product_handler)),
      ),
  );
}
