// core/src/cart.rs

//! Cart operations for a single shopper.
//!
//! Every write goes through [`CommerceStore::modify_cart`], so the read-modify-write of
//! the cart document happens under the store's lock or row lock.

use tracing::{info, instrument, warn};

use crate::error::{CommerceError, CommerceResult};
use crate::models::{Cart, CartChange, CartLine};
use crate::store::CommerceStore;

/// Shopper used when a request does not identify one.
pub const DEFAULT_USER_ID: &str = "mock-user-1";

#[instrument(name = "cart::view", skip(store))]
pub async fn view_cart(store: &dyn CommerceStore, user_id: &str) -> CommerceResult<Cart> {
  store.load_cart(user_id).await
}

/// Adds `quantity` units of a catalog product. A zero id or quantity counts as missing.
#[instrument(name = "cart::add", skip(store))]
pub async fn add_to_cart(
  store: &dyn CommerceStore,
  user_id: &str,
  product_id: Option<i64>,
  quantity: Option<i64>,
) -> CommerceResult<Cart> {
  let (product_id, quantity) = match (product_id.filter(|id| *id != 0), quantity.filter(|q| *q != 0)) {
    (Some(product_id), Some(quantity)) => (product_id, quantity),
    _ => return Err(CommerceError::validation("Product ID and quantity are required")),
  };
  if quantity < 1 {
    warn!("Invalid quantity ({}) provided. Must be positive.", quantity);
    return Err(CommerceError::validation("Quantity must be at least 1"));
  }

  let product = store
    .find_product(product_id)
    .await?
    .ok_or_else(|| CommerceError::not_found("Product not found"))?;

  let cart = store
    .modify_cart(user_id, CartChange::Add(CartLine::for_product(&product, quantity)))
    .await?;
  info!(
    "Cart for {} now holds {} of product {}.",
    user_id,
    cart.line(product_id).map_or(0, |l| l.quantity),
    product_id
  );
  Ok(cart)
}

#[instrument(name = "cart::update_quantity", skip(store))]
pub async fn update_quantity(
  store: &dyn CommerceStore,
  user_id: &str,
  product_id: i64,
  quantity: Option<i64>,
) -> CommerceResult<Cart> {
  let quantity = quantity
    .filter(|q| *q >= 1)
    .ok_or_else(|| CommerceError::validation("Valid quantity is required"))?;
  store
    .modify_cart(user_id, CartChange::SetQuantity { product_id, quantity })
    .await
}

#[instrument(name = "cart::remove_item", skip(store))]
pub async fn remove_item(store: &dyn CommerceStore, user_id: &str, product_id: i64) -> CommerceResult<Cart> {
  store.modify_cart(user_id, CartChange::Remove { product_id }).await
}

#[instrument(name = "cart::clear", skip(store))]
pub async fn clear_cart(store: &dyn CommerceStore, user_id: &str) -> CommerceResult<Cart> {
  store.modify_cart(user_id, CartChange::Clear).await
}
