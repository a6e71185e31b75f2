// core/src/store/memory.rs

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use tracing::debug;

use super::CommerceStore;
use crate::error::CommerceResult;
use crate::models::{apply_change, Cart, CartChange, Order, Product};

#[derive(Default)]
struct Documents {
  products: BTreeMap<i64, Product>,
  carts: HashMap<String, Cart>,
  /// Insertion order, oldest first.
  orders: Vec<Order>,
}

/// Process-local store. One mutex covers every collection, which makes
/// `modify_cart` and `commit_order` atomic.
#[derive(Clone, Default)]
pub struct MemoryStore {
  documents: Arc<Mutex<Documents>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_products(products: &[Product]) -> Self {
    let store = Self::new();
    {
      let mut docs = store.documents.lock();
      docs.products = products.iter().map(|p| (p.id, p.clone())).collect();
    }
    store
  }
}

#[async_trait]
impl CommerceStore for MemoryStore {
  async fn list_products(&self, category: Option<&str>) -> CommerceResult<Vec<Product>> {
    let docs = self.documents.lock();
    Ok(
      docs
        .products
        .values()
        .filter(|p| category.is_none_or(|c| p.category == c))
        .cloned()
        .collect(),
    )
  }

  async fn find_product(&self, id: i64) -> CommerceResult<Option<Product>> {
    Ok(self.documents.lock().products.get(&id).cloned())
  }

  async fn replace_catalog(&self, products: &[Product]) -> CommerceResult<()> {
    let mut docs = self.documents.lock();
    docs.products = products.iter().map(|p| (p.id, p.clone())).collect();
    debug!(count = products.len(), "In-memory catalog replaced.");
    Ok(())
  }

  async fn load_cart(&self, user_id: &str) -> CommerceResult<Cart> {
    let mut docs = self.documents.lock();
    let cart = docs
      .carts
      .entry(user_id.to_string())
      .or_insert_with(|| Cart::empty(user_id, Utc::now()));
    Ok(cart.clone())
  }

  async fn modify_cart(&self, user_id: &str, change: CartChange) -> CommerceResult<Cart> {
    let mut docs = self.documents.lock();
    let existing = docs.carts.get(user_id).cloned();
    let cart = apply_change(existing, user_id, change, Utc::now())?;
    docs.carts.insert(user_id.to_string(), cart.clone());
    Ok(cart)
  }

  async fn commit_order(&self, order: &Order, user_id: &str) -> CommerceResult<()> {
    let mut docs = self.documents.lock();
    docs.orders.push(order.clone());
    if let Some(cart) = docs.carts.get_mut(user_id) {
      cart.apply(CartChange::Clear, order.created_at)?;
    }
    Ok(())
  }

  async fn list_orders(&self) -> CommerceResult<Vec<Order>> {
    let docs = self.documents.lock();
    Ok(docs.orders.iter().rev().cloned().collect())
  }

  fn backend_name(&self) -> &'static str {
    "memory"
  }
}
