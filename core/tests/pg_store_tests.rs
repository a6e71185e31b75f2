// tests/pg_store_tests.rs

//! `PgStore` against a real PostgreSQL server.
//!
//! One container is started per test binary; every test gets its own freshly created
//! database on it, so tests can run in parallel without sharing rows.
//!
//! ```sh
//! cargo test -p vibe_commerce --features pg-integration --test pg_store_tests
//! ```

#![cfg(feature = "pg-integration")]

mod common;

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use common::*;
use sqlx::PgPool;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::postgres::Postgres;
use uuid::Uuid;
use vibe_commerce::cart::{add_to_cart, remove_item, update_quantity, view_cart};
use vibe_commerce::catalog::{list_products, seed_catalog};
use vibe_commerce::checkout::{list_orders, place_order};
use vibe_commerce::{CheckoutRequest, CommerceError, CommerceStore, OrderStatus, PgStore, Product};

struct PgTestEnv {
  // Dropping the handle stops the container, so it lives in a static for the whole binary.
  _container: ContainerAsync<Postgres>,
  server_url: String,
}

static TEST_ENV: OnceLock<PgTestEnv> = OnceLock::new();

async fn init_pg_env() -> &'static PgTestEnv {
  if let Some(env) = TEST_ENV.get() {
    return env;
  }

  let container = Postgres::default()
    .start()
    .await
    .expect("Failed to start PostgreSQL container. Is Docker running?");
  let host = container.get_host().await.unwrap();
  let port = container.get_host_port_ipv4(5432).await.unwrap();
  let server_url = format!("postgres://postgres:postgres@{}:{}", host, port);

  // A concurrent initializer may have won; its container is the one we keep.
  let _ = TEST_ENV.set(PgTestEnv {
    _container: container,
    server_url,
  });
  TEST_ENV.get().unwrap()
}

/// A `PgStore` on a brand-new database holding the demo catalog.
async fn fresh_store() -> PgStore {
  setup_tracing();
  let env = init_pg_env().await;

  let database = format!("shop_{}", Uuid::new_v4().simple());
  let admin = PgPool::connect(&format!("{}/postgres", env.server_url))
    .await
    .expect("Failed to connect to PostgreSQL");
  sqlx::query(&format!("CREATE DATABASE {}", database))
    .execute(&admin)
    .await
    .expect("Failed to create test database");
  admin.close().await;

  let store = PgStore::connect(&format!("{}/{}", env.server_url, database), 10)
    .await
    .expect("Failed to open store");
  seed_catalog(&store).await.unwrap();
  store
}

fn fresh_shopper() -> String {
  format!("shopper-{}", Uuid::new_v4().simple())
}

fn request(items: Vec<vibe_commerce::OrderLine>) -> CheckoutRequest {
  CheckoutRequest {
    customer_name: Some("Asha Verma".to_string()),
    customer_email: Some("asha@example.com".to_string()),
    cart_items: Some(items),
  }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_adds_do_not_lose_updates() {
  let store: Arc<dyn CommerceStore> = Arc::new(fresh_store().await);

  // Each round starts from a shopper with no cart row, where the first writes race on the insert.
  for _ in 0..5 {
    let shopper = fresh_shopper();
    let mut tasks = Vec::new();
    for _ in 0..20 {
      let store = store.clone();
      let shopper = shopper.clone();
      tasks.push(tokio::spawn(async move {
        add_to_cart(store.as_ref(), &shopper, Some(5), Some(1)).await
      }));
    }
    for task in tasks {
      task.await.unwrap().unwrap();
    }

    let cart = view_cart(store.as_ref(), &shopper).await.unwrap();
    assert_eq!(cart.line(5).map(|l| l.quantity), Some(20));
    assert_eq!(cart.total, seed_product(5).price * 20);
  }
}

#[tokio::test]
async fn test_cart_document_round_trips() {
  let store = fresh_store().await;
  let shopper = fresh_shopper();

  let empty = view_cart(&store, &shopper).await.unwrap();
  assert!(empty.items.is_empty());
  assert_eq!(empty.total, 0);

  add_to_cart(&store, &shopper, Some(2), Some(1)).await.unwrap();
  add_to_cart(&store, &shopper, Some(7), Some(2)).await.unwrap();
  update_quantity(&store, &shopper, 2, Some(3)).await.unwrap();

  let cart = view_cart(&store, &shopper).await.unwrap();
  let ids: Vec<i64> = cart.items.iter().map(|l| l.product_id).collect();
  assert_eq!(ids, vec![2, 7]);
  let watch = seed_product(2);
  let line = cart.line(2).unwrap();
  assert_eq!(line.name, watch.name);
  assert_eq!(line.image, watch.image);
  assert_eq!(line.quantity, 3);
  assert_eq!(cart.total, watch.price * 3 + seed_product(7).price * 2);
  assert_eq!(cart.created_at, empty.created_at);
}

#[tokio::test]
async fn test_changes_to_a_missing_cart_are_not_found() {
  let store = fresh_store().await;
  let shopper = fresh_shopper();

  match update_quantity(&store, &shopper, 1, Some(2)).await.unwrap_err() {
    CommerceError::NotFound(m) => assert_eq!(m, "Cart not found"),
    other => panic!("Expected NotFound, got {:?}", other),
  }
  match remove_item(&store, &shopper, 1).await.unwrap_err() {
    CommerceError::NotFound(m) => assert_eq!(m, "Cart not found"),
    other => panic!("Expected NotFound, got {:?}", other),
  }

  add_to_cart(&store, &shopper, Some(1), Some(1)).await.unwrap();
  match remove_item(&store, &shopper, 9).await.unwrap_err() {
    CommerceError::NotFound(m) => assert_eq!(m, "Item not found in cart"),
    other => panic!("Expected NotFound, got {:?}", other),
  }
  // The failed change was rolled back; the line is untouched.
  let cart = view_cart(&store, &shopper).await.unwrap();
  assert_eq!(cart.line(1).map(|l| l.quantity), Some(1));
}

#[tokio::test]
async fn test_commit_order_stores_order_and_clears_cart() {
  let store = fresh_store().await;
  let shopper = fresh_shopper();
  add_to_cart(&store, &shopper, Some(1), Some(2)).await.unwrap();

  let order = place_order(
    &store,
    &shopper,
    request(vec![order_line(1, 6499, 2), order_line(9, 1199, 1)]),
  )
  .await
  .unwrap();

  let cart = view_cart(&store, &shopper).await.unwrap();
  assert!(cart.items.is_empty());
  assert_eq!(cart.total, 0);

  let orders = list_orders(&store).await.unwrap();
  assert_eq!(orders.len(), 1);
  let stored = &orders[0];
  assert_eq!(stored.order_id, order.order_id);
  assert_eq!(stored.status, OrderStatus::Completed);
  assert_eq!(stored.total, 6499 * 2 + 1199);
  assert_eq!(stored.items, order.items);
  assert_eq!(stored.customer_email, "asha@example.com");
}

#[tokio::test]
async fn test_orders_are_listed_newest_first() {
  let store = fresh_store().await;
  let shopper = fresh_shopper();

  let first = place_order(&store, &shopper, request(vec![order_line(1, 100, 1)]))
    .await
    .unwrap();
  tokio::time::sleep(Duration::from_millis(5)).await;
  let second = place_order(&store, &shopper, request(vec![order_line(2, 200, 1)]))
    .await
    .unwrap();

  let orders = list_orders(&store).await.unwrap();
  let ids: Vec<&str> = orders.iter().map(|o| o.order_id.as_str()).collect();
  assert_eq!(ids, vec![second.order_id.as_str(), first.order_id.as_str()]);
}

#[tokio::test]
async fn test_replace_catalog_drops_previous_products() {
  let store = fresh_store().await;
  assert_eq!(list_products(&store, None).await.unwrap().len(), 10);

  let replacement = vec![
    Product {
      id: 42,
      name: "Desk Mat".to_string(),
      price: 1599,
      description: "Felt desk mat".to_string(),
      image: String::new(),
      category: "Home & Office".to_string(),
      stock: 12,
    },
    seed_product(3),
  ];
  store.replace_catalog(&replacement).await.unwrap();

  let products = list_products(&store, None).await.unwrap();
  let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
  assert_eq!(ids, vec![3, 42]);
  assert_eq!(store.find_product(1).await.unwrap(), None);
  assert_eq!(store.find_product(42).await.unwrap(), Some(replacement[0].clone()));

  let office = list_products(&store, Some("Home & Office")).await.unwrap();
  assert_eq!(office.len(), 1);
  assert_eq!(office[0].id, 42);
}
