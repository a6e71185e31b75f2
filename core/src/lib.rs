// core/src/lib.rs

//! Vibe Commerce: catalog, cart and checkout for a small demo storefront.
//!
//! The crate is split into:
//!  - `models`: the documents (products, carts, orders) and the pure cart mutation logic.
//!  - `store`: the `CommerceStore` trait with in-memory and PostgreSQL backends.
//!  - `catalog`, `cart`, `checkout`: the operations the HTTP layer calls, including
//!    input validation.
//!
//! Typical flow:
//!  1. Build a store (`MemoryStore::new()` or `PgStore::connect(..)`) and seed it with
//!     `catalog::seed_catalog`.
//!  2. Call `cart::add_to_cart` / `cart::update_quantity` / ... with a shopper id.
//!  3. Call `checkout::place_order` with the checkout form; the order is stored and the
//!     shopper's cart is emptied.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod models;
pub mod store;

pub use crate::checkout::CheckoutRequest;
pub use crate::error::{CommerceError, CommerceResult};
pub use crate::models::{Cart, CartChange, CartLine, Order, OrderLine, OrderStatus, Product};
pub use crate::store::{CommerceStore, MemoryStore, PgStore};
