// server/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use vibe_commerce::cart;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::ShopperId;

// --- Request DTOs ---
// Fields are optional so a missing value is answered with the cart's own validation
// message instead of a generic JSON error.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequestPayload {
  pub product_id: Option<i64>,
  pub quantity: Option<i64>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateCartItemPayload {
  pub quantity: Option<i64>,
}

// --- Handler Implementations ---

#[instrument(name = "handler::view_cart", skip(app_state, shopper), fields(shopper = %shopper))]
pub async fn view_cart_handler(app_state: web::Data<AppState>, shopper: ShopperId) -> Result<HttpResponse, AppError> {
  let cart = cart::view_cart(app_state.store.as_ref(), shopper.as_str())
    .await
    .map_err(AppError::during("Failed to fetch cart", &app_state.config))?;

  Ok(HttpResponse::Ok().json(json!({
      "success": true,
      "data": cart
  })))
}

#[instrument(
    name = "handler::add_to_cart",
    skip(app_state, req_payload, shopper),
    fields(shopper = %shopper, product_id = ?req_payload.product_id, quantity = ?req_payload.quantity)
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<AddToCartRequestPayload>,
  shopper: ShopperId,
) -> Result<HttpResponse, AppError> {
  let cart = cart::add_to_cart(
    app_state.store.as_ref(),
    shopper.as_str(),
    req_payload.product_id,
    req_payload.quantity,
  )
  .await
  .map_err(AppError::during("Failed to add item to cart", &app_state.config))?;

  info!("Add to cart successful for shopper {}. Lines in cart: {}", shopper, cart.items.len());
  Ok(HttpResponse::Ok().json(json!({
      "success": true,
      "message": "Item added to cart",
      "data": cart
  })))
}

#[instrument(name = "handler::update_cart_item", skip(app_state, path, req_payload, shopper), fields(shopper = %shopper, product_id = %*path))]
pub async fn update_cart_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  req_payload: web::Json<UpdateCartItemPayload>,
  shopper: ShopperId,
) -> Result<HttpResponse, AppError> {
  let cart = cart::update_quantity(
    app_state.store.as_ref(),
    shopper.as_str(),
    path.into_inner(),
    req_payload.quantity,
  )
  .await
  .map_err(AppError::during("Failed to update cart", &app_state.config))?;

  Ok(HttpResponse::Ok().json(json!({
      "success": true,
      "message": "Cart updated",
      "data": cart
  })))
}

#[instrument(name = "handler::remove_cart_item", skip(app_state, path, shopper), fields(shopper = %shopper, product_id = %*path))]
pub async fn remove_cart_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  shopper: ShopperId,
) -> Result<HttpResponse, AppError> {
  let cart = cart::remove_item(app_state.store.as_ref(), shopper.as_str(), path.into_inner())
    .await
    .map_err(AppError::during("Failed to remove item from cart", &app_state.config))?;

  Ok(HttpResponse::Ok().json(json!({
      "success": true,
      "message": "Item removed from cart",
      "data": cart
  })))
}

#[instrument(name = "handler::clear_cart", skip(app_state, shopper), fields(shopper = %shopper))]
pub async fn clear_cart_handler(app_state: web::Data<AppState>, shopper: ShopperId) -> Result<HttpResponse, AppError> {
  let cart = cart::clear_cart(app_state.store.as_ref(), shopper.as_str())
    .await
    .map_err(AppError::during("Failed to clear cart", &app_state.config))?;

  Ok(HttpResponse::Ok().json(json!({
      "success": true,
      "message": "Cart cleared",
      "data": cart
  })))
}
