// server/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use vibe_commerce::catalog;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct ListProductsQuery {
  pub category: Option<String>,
}

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<ListProductsQuery>,
) -> Result<HttpResponse, AppError> {
  let products = catalog::list_products(app_state.store.as_ref(), query_params.category.as_deref())
    .await
    .map_err(AppError::during("Failed to fetch products", &app_state.config))?;

  info!("Successfully fetched {} products.", products.len());
  Ok(HttpResponse::Ok().json(json!({
      "success": true,
      "data": products
  })))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %*path))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  let product = catalog::get_product(app_state.store.as_ref(), product_id)
    .await
    .map_err(AppError::during("Failed to fetch product", &app_state.config))?;

  Ok(HttpResponse::Ok().json(json!({
      "success": true,
      "data": product
  })))
}
