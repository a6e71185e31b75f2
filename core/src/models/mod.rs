// core/src/models/mod.rs

//! Documents held by the store: catalog products, shopper carts and placed orders.

pub mod cart;
pub mod order;
pub mod product;

pub use cart::{apply_change, Cart, CartChange, CartLine};
pub use order::{Order, OrderLine, OrderStatus};
pub use product::Product;
