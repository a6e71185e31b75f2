// core/src/models/order.rs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  /// Checkout has no payment step, so every order is complete on creation.
  #[default]
  Completed,
}

impl OrderStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      OrderStatus::Completed => "completed",
    }
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for OrderStatus {
  type Err = CommerceError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "completed" => Ok(OrderStatus::Completed),
      other => Err(CommerceError::Internal(format!("Unknown order status '{}'", other))),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
  pub product_id: i64,
  pub name: String,
  pub price: i64,
  pub quantity: i64,
}

/// Immutable snapshot written at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub order_id: String,
  pub customer_name: String,
  pub customer_email: String,
  pub items: Vec<OrderLine>,
  pub total: i64,
  pub status: OrderStatus,
  pub timestamp: DateTime<Utc>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}
