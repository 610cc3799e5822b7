// server/src/web/mod.rs

pub mod forms;
pub mod handlers;
pub mod routes;

use actix_web::web;

use crate::state::AppState;
use crate::uploads::PUBLIC_PREFIX;

pub use routes::configure_app_routes;

/// Everything an `App` needs: shared state, extractor configs, API routes and
/// the static image service.
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
  move |cfg: &mut web::ServiceConfig| {
    let upload_dir = state.images.dir().to_path_buf();
    cfg
      .app_data(web::Data::new(state))
      .app_data(routes::json_config())
      .app_data(routes::path_config())
      .configure(configure_app_routes)
      .service(actix_files::Files::new(&format!("/{}", PUBLIC_PREFIX), upload_dir));
  }
}
