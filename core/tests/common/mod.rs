// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use once_cell::sync::Lazy;
use tracing::Level;
use vibe_commerce::catalog::seed_products;
use vibe_commerce::{MemoryStore, OrderLine, Product};

pub const SHOPPER: &str = "test-shopper";
pub const OTHER_SHOPPER: &str = "other-shopper";

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

/// A memory store holding the demo catalog.
pub fn seeded_store() -> MemoryStore {
  MemoryStore::with_products(&seed_products())
}

pub fn seed_product(id: i64) -> Product {
  seed_products()
    .into_iter()
    .find(|p| p.id == id)
    .unwrap_or_else(|| panic!("no seed product with id {}", id))
}

pub fn order_line(product_id: i64, price: i64, quantity: i64) -> OrderLine {
  OrderLine {
    product_id,
    name: format!("Product {}", product_id),
    price,
    quantity,
  }
}
