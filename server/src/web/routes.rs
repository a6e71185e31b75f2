// server/src/web/routes.rs

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::json;

use crate::errors::AppError;
use crate::web::handlers::{cart_handlers, checkout_handlers, product_handlers};

// Liveness only; it does not touch the store.
async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(json!({
      "success": true,
      "message": "Vibe Commerce API is running",
      "timestamp": Utc::now()
  }))
}

/// Fallback for every path no route matches.
pub async fn route_not_found() -> HttpResponse {
  HttpResponse::NotFound().json(json!({
      "success": false,
      "message": "Route not found"
  }))
}

// Extractor failures (bad JSON, non-numeric ids) answer in the same envelope as handler errors.
fn extractor_configs(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(
      web::JsonConfig::default()
        .error_handler(|err, _req| AppError::Validation(format!("Invalid request body: {}", err)).into()),
    )
    .app_data(
      web::PathConfig::default()
        .error_handler(|err, _req| AppError::Validation(format!("Invalid path parameter: {}", err)).into()),
    )
    .app_data(
      web::QueryConfig::default()
        .error_handler(|err, _req| AppError::Validation(format!("Invalid query string: {}", err)).into()),
    );
}

// This function will be called in `main.rs` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  extractor_configs(cfg);
  cfg.service(
    web::scope("/api")
      // Health Check Route
      .route("/health", web::get().to(health_check_handler))
      // Catalog Routes
      .service(
        web::scope("/products")
          .route("", web::get().to(product_handlers::list_products_handler))
          .route("/{product_id}", web::get().to(product_handlers::get_product_handler)),
      )
      // Cart Routes (the shopper comes from the X-User-ID header or the configured default)
      .service(
        web::scope("/cart")
          .route("", web::get().to(cart_handlers::view_cart_handler))
          .route("", web::post().to(cart_handlers::add_to_cart_handler))
          .route("", web::delete().to(cart_handlers::clear_cart_handler))
          .route("/{product_id}", web::put().to(cart_handlers::update_cart_item_handler))
          .route("/{product_id}", web::delete().to(cart_handlers::remove_cart_item_handler)),
      )
      // Checkout Routes
      .service(
        web::scope("/checkout")
          .route("", web::post().to(checkout_handlers::checkout_handler))
          .route("/orders", web::get().to(checkout_handlers::list_orders_handler)),
      ),
  );
}
