// server/src/web/handlers/checkout_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument};
use vibe_commerce::{checkout, CheckoutRequest};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::ShopperId;

#[instrument(name = "handler::checkout", skip(app_state, req_payload, shopper), fields(shopper = %shopper))]
pub async fn checkout_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<CheckoutRequest>,
  shopper: ShopperId,
) -> Result<HttpResponse, AppError> {
  let order = checkout::place_order(app_state.store.as_ref(), shopper.as_str(), req_payload.into_inner())
    .await
    .map_err(AppError::during("Failed to process checkout", &app_state.config))?;

  info!(
    "Checkout completed for shopper {}. Order ID: {}, total: {}",
    shopper, order.order_id, order.total
  );

  // The receipt view only needs the order snapshot, not the bookkeeping timestamps.
  Ok(HttpResponse::Ok().json(json!({
      "success": true,
      "message": "Order placed successfully",
      "data": {
          "orderId": order.order_id,
          "customerName": order.customer_name,
          "customerEmail": order.customer_email,
          "items": order.items,
          "total": order.total,
          "timestamp": order.timestamp,
          "status": order.status
      }
  })))
}

#[instrument(name = "handler::list_orders", skip(app_state))]
pub async fn list_orders_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let orders = checkout::list_orders(app_state.store.as_ref())
    .await
    .map_err(AppError::during("Failed to fetch orders", &app_state.config))?;

  Ok(HttpResponse::Ok().json(json!({
      "success": true,
      "data": orders
  })))
}
