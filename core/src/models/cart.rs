// core/src/models/cart.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::product::Product;
use crate::error::{CommerceError, CommerceResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
  pub product_id: i64,
  pub name: String,
  /// Price captured when the product was first added.
  pub price: i64,
  pub quantity: i64,
  pub image: String,
}

impl CartLine {
  pub fn for_product(product: &Product, quantity: i64) -> Self {
    Self {
      product_id: product.id,
      name: product.name.clone(),
      price: product.price,
      quantity,
      image: product.image.clone(),
    }
  }

  pub fn line_total(&self) -> i64 {
    self.price.saturating_mul(self.quantity)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
  pub user_id: String,
  pub items: Vec<CartLine>,
  pub total: i64,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// A single mutation of a cart, applied by the store while it holds the cart exclusively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
  /// Append the line, or bump the quantity of the existing line for the same product.
  Add(CartLine),
  SetQuantity { product_id: i64, quantity: i64 },
  Remove { product_id: i64 },
  Clear,
}

impl CartChange {
  /// Whether applying this change to a shopper without a cart should create one.
  pub fn creates_cart(&self) -> bool {
    matches!(self, CartChange::Add(_) | CartChange::Clear)
  }
}

impl Cart {
  pub fn empty(user_id: &str, now: DateTime<Utc>) -> Self {
    Self {
      user_id: user_id.to_string(),
      items: Vec::new(),
      total: 0,
      created_at: now,
      updated_at: now,
    }
  }

  pub fn line(&self, product_id: i64) -> Option<&CartLine> {
    self.items.iter().find(|line| line.product_id == product_id)
  }

  pub fn apply(&mut self, change: CartChange, now: DateTime<Utc>) -> CommerceResult<()> {
    match change {
      CartChange::Add(new_line) => {
        match self.items.iter_mut().find(|line| line.product_id == new_line.product_id) {
          Some(existing) => existing.quantity = existing.quantity.saturating_add(new_line.quantity),
          None => self.items.push(new_line),
        }
      }
      CartChange::SetQuantity { product_id, quantity } => {
        let line = self
          .items
          .iter_mut()
          .find(|line| line.product_id == product_id)
          .ok_or_else(|| CommerceError::not_found("Item not found in cart"))?;
        line.quantity = quantity;
      }
      CartChange::Remove { product_id } => {
        let before = self.items.len();
        self.items.retain(|line| line.product_id != product_id);
        if self.items.len() == before {
          return Err(CommerceError::not_found("Item not found in cart"));
        }
      }
      CartChange::Clear => self.items.clear(),
    }
    self.recompute_total();
    self.updated_at = now;
    Ok(())
  }

  fn recompute_total(&mut self) {
    self.total = self
      .items
      .iter()
      .fold(0i64, |sum, line| sum.saturating_add(line.line_total()));
  }
}

/// Resolves `change` against the stored cart (if any) and returns the cart to persist.
///
/// Shared by every store backend so they agree on when a missing cart is created and
/// when it is a 404.
pub fn apply_change(
  existing: Option<Cart>,
  user_id: &str,
  change: CartChange,
  now: DateTime<Utc>,
) -> CommerceResult<Cart> {
  let mut cart = match existing {
    Some(cart) => cart,
    None if change.creates_cart() => Cart::empty(user_id, now),
    None => return Err(CommerceError::not_found("Cart not found")),
  };
  cart.apply(change, now)?;
  Ok(cart)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn line(product_id: i64, price: i64, quantity: i64) -> CartLine {
    CartLine {
      product_id,
      name: format!("Product {}", product_id),
      price,
      quantity,
      image: String::new(),
    }
  }

  #[test]
  fn adding_same_product_twice_increments_quantity() {
    let now = Utc::now();
    let mut cart = Cart::empty("shopper", now);
    cart.apply(CartChange::Add(line(1, 6499, 1)), now).unwrap();
    cart.apply(CartChange::Add(line(1, 6499, 2)), now).unwrap();

    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 3);
    assert_eq!(cart.total, 6499 * 3);
  }

  #[test]
  fn lines_keep_insertion_order() {
    let now = Utc::now();
    let mut cart = Cart::empty("shopper", now);
    cart.apply(CartChange::Add(line(5, 1999, 1)), now).unwrap();
    cart.apply(CartChange::Add(line(2, 24999, 1)), now).unwrap();
    cart.apply(CartChange::Add(line(5, 1999, 1)), now).unwrap();

    let ids: Vec<i64> = cart.items.iter().map(|l| l.product_id).collect();
    assert_eq!(ids, vec![5, 2]);
    assert_eq!(cart.line(5).map(|l| l.quantity), Some(2));
  }

  #[test]
  fn set_quantity_is_absolute_and_retotals() {
    let now = Utc::now();
    let mut cart = Cart::empty("shopper", now);
    cart.apply(CartChange::Add(line(3, 3999, 4)), now).unwrap();
    cart
      .apply(CartChange::SetQuantity { product_id: 3, quantity: 2 }, now)
      .unwrap();
    assert_eq!(cart.line(3).map(|l| l.quantity), Some(2));
    assert_eq!(cart.total, 7998);
  }

  #[test]
  fn removing_missing_line_is_not_found() {
    let now = Utc::now();
    let mut cart = Cart::empty("shopper", now);
    cart.apply(CartChange::Add(line(1, 100, 1)), now).unwrap();
    let err = cart.apply(CartChange::Remove { product_id: 42 }, now).unwrap_err();
    assert!(matches!(err, CommerceError::NotFound(ref m) if m == "Item not found in cart"));
    assert_eq!(cart.items.len(), 1);
  }

  #[test]
  fn clear_empties_items_and_zeroes_total() {
    let now = Utc::now();
    let mut cart = Cart::empty("shopper", now);
    cart.apply(CartChange::Add(line(1, 100, 2)), now).unwrap();
    cart.apply(CartChange::Clear, now).unwrap();
    assert!(cart.items.is_empty());
    assert_eq!(cart.total, 0);
  }

  #[test]
  fn missing_cart_is_only_created_by_add_or_clear() {
    let now = Utc::now();
    let created = apply_change(None, "shopper", CartChange::Clear, now).unwrap();
    assert_eq!(created.user_id, "shopper");

    let err = apply_change(None, "shopper", CartChange::Remove { product_id: 1 }, now).unwrap_err();
    assert!(matches!(err, CommerceError::NotFound(ref m) if m == "Cart not found"));

    let err = apply_change(
      None,
      "shopper",
      CartChange::SetQuantity { product_id: 1, quantity: 2 },
      now,
    )
    .unwrap_err();
    assert!(matches!(err, CommerceError::NotFound(_)));
  }

  #[test]
  fn cart_serializes_with_camel_case_fields() {
    let now = Utc::now();
    let mut cart = Cart::empty("mock-user-1", now);
    cart.apply(CartChange::Add(line(7, 7499, 1)), now).unwrap();
    let json = serde_json::to_value(&cart).unwrap();
    assert_eq!(json["userId"], "mock-user-1");
    assert_eq!(json["items"][0]["productId"], 7);
    assert_eq!(json["total"], 7499);
    assert!(json.get("updatedAt").is_some());
  }
}
