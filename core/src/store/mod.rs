// core/src/store/mod.rs

//! Document storage for products, carts and orders.
//!
//! Handlers and services only see [`CommerceStore`]; the concrete backend is picked at
//! startup. Cart writes go through [`CommerceStore::modify_cart`] so that every backend can
//! run the read-modify-write while it holds the cart exclusively.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::CommerceResult;
use crate::models::{Cart, CartChange, Order, Product};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait CommerceStore: Send + Sync {
  /// Products ordered by id, optionally restricted to one category.
  async fn list_products(&self, category: Option<&str>) -> CommerceResult<Vec<Product>>;

  async fn find_product(&self, id: i64) -> CommerceResult<Option<Product>>;

  /// Drops the current catalog and stores `products` in its place.
  async fn replace_catalog(&self, products: &[Product]) -> CommerceResult<()>;

  /// Returns the shopper's cart, persisting an empty one first if none exists.
  async fn load_cart(&self, user_id: &str) -> CommerceResult<Cart>;

  /// Applies `change` to the shopper's cart atomically and returns the stored result.
  async fn modify_cart(&self, user_id: &str, change: CartChange) -> CommerceResult<Cart>;

  /// Persists `order` and empties the shopper's cart in one step.
  async fn commit_order(&self, order: &Order, user_id: &str) -> CommerceResult<()>;

  /// All orders, newest first.
  async fn list_orders(&self) -> CommerceResult<Vec<Order>>;

  /// Name used in startup logs.
  fn backend_name(&self) -> &'static str;
}
