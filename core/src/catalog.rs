// core/src/catalog.rs

//! Read side of the product catalog, plus the demo seed data.

use tracing::{info, instrument, warn};

use crate::error::{CommerceError, CommerceResult};
use crate::models::Product;
use crate::store::CommerceStore;

#[instrument(name = "catalog::list_products", skip(store))]
pub async fn list_products(store: &dyn CommerceStore, category: Option<&str>) -> CommerceResult<Vec<Product>> {
  // An empty `?category=` behaves like no filter.
  let category = category.map(str::trim).filter(|c| !c.is_empty());
  let products = store.list_products(category).await?;
  info!("Fetched {} products.", products.len());
  Ok(products)
}

#[instrument(name = "catalog::get_product", skip(store))]
pub async fn get_product(store: &dyn CommerceStore, product_id: i64) -> CommerceResult<Product> {
  match store.find_product(product_id).await? {
    Some(product) => Ok(product),
    None => {
      warn!("Product with ID {} not found.", product_id);
      Err(CommerceError::not_found("Product not found"))
    }
  }
}

/// Replaces whatever is in the store with [`seed_products`].
pub async fn seed_catalog(store: &dyn CommerceStore) -> CommerceResult<usize> {
  let products = seed_products();
  store.replace_catalog(&products).await?;
  info!(
    backend = store.backend_name(),
    "Successfully seeded catalog with {} products.",
    products.len()
  );
  Ok(products.len())
}

fn product(id: i64, name: &str, price: i64, description: &str, image: &str, category: &str, stock: i32) -> Product {
  Product {
    id,
    name: name.to_string(),
    price,
    description: description.to_string(),
    image: image.to_string(),
    category: category.to_string(),
    stock,
  }
}

/// The ten demo products the storefront ships with.
pub fn seed_products() -> Vec<Product> {
  vec![
    product(
      1,
      "Wireless Bluetooth Headphones",
      6499,
      "Premium noise-cancelling wireless headphones with 30-hour battery life",
      "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=500",
      "Electronics",
      50,
    ),
    product(
      2,
      "Smart Watch Pro",
      24999,
      "Advanced smartwatch with fitness tracking and heart rate monitor",
      "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=500",
      "Electronics",
      30,
    ),
    product(
      3,
      "Laptop Backpack",
      3999,
      "Durable water-resistant backpack with padded laptop compartment",
      "https://images.unsplash.com/photo-1553062407-98eeb64c6a62?w=500",
      "Accessories",
      100,
    ),
    product(
      4,
      "Portable Phone Charger",
      2499,
      "20000mAh power bank with fast charging technology",
      "https://images.unsplash.com/photo-1609091839311-d5365f9ff1c5?w=500",
      "Electronics",
      75,
    ),
    product(
      5,
      "Wireless Mouse",
      1999,
      "Ergonomic wireless mouse with adjustable DPI settings",
      "https://images.unsplash.com/photo-1527864550417-7fd91fc51a46?w=500",
      "Electronics",
      120,
    ),
    product(
      6,
      "USB-C Hub",
      3299,
      "7-in-1 USB-C hub with HDMI, USB 3.0, and SD card reader",
      "https://images.unsplash.com/photo-1625948515291-69613efd103f?w=500",
      "Accessories",
      60,
    ),
    product(
      7,
      "Mechanical Keyboard",
      7499,
      "RGB backlit mechanical gaming keyboard with blue switches",
      "https://images.unsplash.com/photo-1587829741301-dc798b83add3?w=500",
      "Electronics",
      45,
    ),
    product(
      8,
      "Webcam HD 1080p",
      4999,
      "Full HD webcam with auto-focus and built-in microphone",
      "https://images.unsplash.com/photo-1574056993011-b30fc28e7f55?w=500",
      "Electronics",
      40,
    ),
    product(
      9,
      "Phone Stand",
      1199,
      "Adjustable aluminum phone stand for desk",
      "https://images.unsplash.com/photo-1601784551446-20c9e07cdbdb?w=500",
      "Accessories",
      150,
    ),
    product(
      10,
      "LED Desk Lamp",
      2899,
      "Dimmable LED desk lamp with USB charging port",
      "https://images.unsplash.com/photo-1507473885765-e6ed057f782c?w=500",
      "Home & Office",
      80,
    ),
  ]
}
