// core/src/models/product.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A catalog entry. Products are written once by the seeder and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Product {
  pub id: i64,
  pub name: String,
  /// Whole currency units (the storefront renders rupees without decimals).
  pub price: i64,
  pub description: String,
  pub image: String,
  pub category: String,
  pub stock: i32,
}
