// core/src/checkout.rs

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::ValidateEmail;

use crate::error::{CommerceError, CommerceResult};
use crate::models::{Order, OrderLine, OrderStatus};
use crate::store::CommerceStore;

/// Checkout form as posted by the storefront. The submitted items are what gets billed;
/// they are not reconciled against the stored cart or live stock.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
  pub customer_name: Option<String>,
  pub customer_email: Option<String>,
  pub cart_items: Option<Vec<OrderLine>>,
}

fn non_blank(value: Option<String>) -> Option<String> {
  value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub fn order_total(items: &[OrderLine]) -> i64 {
  items
    .iter()
    .fold(0i64, |sum, item| sum.saturating_add(item.price.saturating_mul(item.quantity)))
}

/// `ORD-<epoch millis>-<9 uppercase alphanumerics>`.
pub fn generate_order_id(now: DateTime<Utc>) -> String {
  let suffix: String = Uuid::new_v4()
    .simple()
    .to_string()
    .chars()
    .take(9)
    .collect::<String>()
    .to_uppercase();
  format!("ORD-{}-{}", now.timestamp_millis(), suffix)
}

/// Validates the form, records the order and empties the shopper's cart.
#[instrument(name = "checkout::place_order", skip(store, request))]
pub async fn place_order(store: &dyn CommerceStore, user_id: &str, request: CheckoutRequest) -> CommerceResult<Order> {
  let (customer_name, customer_email) = match (non_blank(request.customer_name), non_blank(request.customer_email)) {
    (Some(name), Some(email)) => (name, email),
    _ => return Err(CommerceError::validation("Customer name and email are required")),
  };
  if !customer_email.validate_email() {
    warn!("Rejected checkout with malformed email.");
    return Err(CommerceError::validation("Please enter a valid email"));
  }

  let items = request.cart_items.unwrap_or_default();
  if items.is_empty() {
    return Err(CommerceError::validation("Cart is empty"));
  }
  if items.iter().any(|item| item.quantity < 1) {
    return Err(CommerceError::validation("Item quantity must be at least 1"));
  }

  let now = Utc::now();
  let order = Order {
    order_id: generate_order_id(now),
    customer_name,
    customer_email,
    total: order_total(&items),
    items,
    status: OrderStatus::Completed,
    timestamp: now,
    created_at: now,
    updated_at: now,
  };

  store.commit_order(&order, user_id).await?;
  info!(
    order_id = %order.order_id,
    total = order.total,
    "Order placed with {} line(s).",
    order.items.len()
  );
  Ok(order)
}

#[instrument(name = "checkout::list_orders", skip(store))]
pub async fn list_orders(store: &dyn CommerceStore) -> CommerceResult<Vec<Order>> {
  store.list_orders().await
}
