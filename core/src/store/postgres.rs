// core/src/store/postgres.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use sqlx::{FromRow, Postgres, Transaction};
use tracing::{error, info, instrument};

use super::CommerceStore;
use crate::error::CommerceResult;
use crate::models::{apply_change, Cart, CartChange, CartLine, Order, OrderLine, Product};

const SCHEMA: &str = include_str!("../../schema.sql");

const PRODUCT_COLUMNS: &str = "id, name, price, description, image, category, stock";
const CART_COLUMNS: &str = "user_id, items, total, created_at, updated_at";
const ORDER_COLUMNS: &str =
  "order_id, customer_name, customer_email, items, total, status, placed_at, created_at, updated_at";

#[derive(FromRow)]
struct CartRow {
  user_id: String,
  items: Json<Vec<CartLine>>,
  total: i64,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<CartRow> for Cart {
  fn from(row: CartRow) -> Self {
    Cart {
      user_id: row.user_id,
      items: row.items.0,
      total: row.total,
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}

#[derive(FromRow)]
struct OrderRow {
  order_id: String,
  customer_name: String,
  customer_email: String,
  items: Json<Vec<OrderLine>>,
  total: i64,
  status: String,
  placed_at: DateTime<Utc>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
  type Error = crate::error::CommerceError;

  fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
    Ok(Order {
      order_id: row.order_id,
      customer_name: row.customer_name,
      customer_email: row.customer_email,
      items: row.items.0,
      total: row.total,
      status: row.status.parse()?,
      timestamp: row.placed_at,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

/// PostgreSQL-backed store. Carts and orders keep their line items as JSONB documents.
#[derive(Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  /// Connects a pool and makes sure the schema exists.
  pub async fn connect(database_url: &str, max_connections: u32) -> CommerceResult<Self> {
    let pool = PgPoolOptions::new()
      .max_connections(max_connections)
      .connect(database_url)
      .await
      .map_err(|e| {
        error!("Failed to connect to the database: {}", e);
        e
      })?;
    info!("Successfully connected to the database.");

    let store = Self::new(pool);
    store.ensure_schema().await?;
    Ok(store)
  }

  pub async fn ensure_schema(&self) -> CommerceResult<()> {
    sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
    info!("Database schema verified.");
    Ok(())
  }

  async fn insert_empty_cart(
    tx: &mut Transaction<'_, Postgres>,
    user_id: &str,
    now: DateTime<Utc>,
  ) -> CommerceResult<()> {
    sqlx::query(
      "INSERT INTO carts (user_id, items, total, created_at, updated_at) VALUES ($1, '[]'::jsonb, 0, $2, $2) \
       ON CONFLICT (user_id) DO NOTHING",
    )
    .bind(user_id)
    .bind(now)
    .execute(&mut **tx)
    .await?;
    Ok(())
  }

  async fn write_cart(tx: &mut Transaction<'_, Postgres>, cart: &Cart) -> CommerceResult<()> {
    sqlx::query(
      "INSERT INTO carts (user_id, items, total, created_at, updated_at) VALUES ($1, $2, $3, $4, $5) \
       ON CONFLICT (user_id) DO UPDATE SET items = EXCLUDED.items, total = EXCLUDED.total, updated_at = EXCLUDED.updated_at",
    )
    .bind(&cart.user_id)
    .bind(Json(&cart.items))
    .bind(cart.total)
    .bind(cart.created_at)
    .bind(cart.updated_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
  }
}

#[async_trait]
impl CommerceStore for PgStore {
  #[instrument(name = "pg::list_products", skip(self))]
  async fn list_products(&self, category: Option<&str>) -> CommerceResult<Vec<Product>> {
    let products: Vec<Product> = match category {
      Some(category) => {
        sqlx::query_as(&format!(
          "SELECT {} FROM products WHERE category = $1 ORDER BY id ASC",
          PRODUCT_COLUMNS
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await?
      }
      None => {
        sqlx::query_as(&format!("SELECT {} FROM products ORDER BY id ASC", PRODUCT_COLUMNS))
          .fetch_all(&self.pool)
          .await?
      }
    };
    Ok(products)
  }

  #[instrument(name = "pg::find_product", skip(self))]
  async fn find_product(&self, id: i64) -> CommerceResult<Option<Product>> {
    let product: Option<Product> = sqlx::query_as(&format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS))
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(product)
  }

  #[instrument(name = "pg::replace_catalog", skip(self, products), fields(count = products.len()))]
  async fn replace_catalog(&self, products: &[Product]) -> CommerceResult<()> {
    let mut tx = self.pool.begin().await?;
    sqlx::query("DELETE FROM products").execute(&mut *tx).await?;
    for product in products {
      sqlx::query(&format!(
        "INSERT INTO products ({}) VALUES ($1, $2, $3, $4, $5, $6, $7)",
        PRODUCT_COLUMNS
      ))
      .bind(product.id)
      .bind(&product.name)
      .bind(product.price)
      .bind(&product.description)
      .bind(&product.image)
      .bind(&product.category)
      .bind(product.stock)
      .execute(&mut *tx)
      .await?;
    }
    tx.commit().await?;
    Ok(())
  }

  #[instrument(name = "pg::load_cart", skip(self))]
  async fn load_cart(&self, user_id: &str) -> CommerceResult<Cart> {
    let mut tx = self.pool.begin().await?;
    Self::insert_empty_cart(&mut tx, user_id, Utc::now()).await?;
    tx.commit().await?;

    let row: CartRow = sqlx::query_as(&format!("SELECT {} FROM carts WHERE user_id = $1", CART_COLUMNS))
      .bind(user_id)
      .fetch_one(&self.pool)
      .await?;
    Ok(row.into())
  }

  #[instrument(name = "pg::modify_cart", skip(self, change))]
  async fn modify_cart(&self, user_id: &str, change: CartChange) -> CommerceResult<Cart> {
    let mut tx = self.pool.begin().await?;
    if change.creates_cart() {
      // FOR UPDATE needs an existing row to serialize a shopper's first writes.
      Self::insert_empty_cart(&mut tx, user_id, Utc::now()).await?;
    }
    let existing: Option<CartRow> = sqlx::query_as(&format!(
      "SELECT {} FROM carts WHERE user_id = $1 FOR UPDATE",
      CART_COLUMNS
    ))
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?;

    // Dropping `tx` on the error path rolls back and releases the row lock.
    let cart = apply_change(existing.map(Cart::from), user_id, change, Utc::now())?;
    Self::write_cart(&mut tx, &cart).await?;
    tx.commit().await?;
    Ok(cart)
  }

  #[instrument(name = "pg::commit_order", skip(self, order), fields(order_id = %order.order_id))]
  async fn commit_order(&self, order: &Order, user_id: &str) -> CommerceResult<()> {
    let mut tx = self.pool.begin().await?;
    sqlx::query(&format!(
      "INSERT INTO orders ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
      ORDER_COLUMNS
    ))
    .bind(&order.order_id)
    .bind(&order.customer_name)
    .bind(&order.customer_email)
    .bind(Json(&order.items))
    .bind(order.total)
    .bind(order.status.as_str())
    .bind(order.timestamp)
    .bind(order.created_at)
    .bind(order.updated_at)
    .execute(&mut *tx)
    .await?;

    sqlx::query("UPDATE carts SET items = '[]'::jsonb, total = 0, updated_at = $2 WHERE user_id = $1")
      .bind(user_id)
      .bind(order.created_at)
      .execute(&mut *tx)
      .await?;

    tx.commit().await?;
    Ok(())
  }

  #[instrument(name = "pg::list_orders", skip(self))]
  async fn list_orders(&self) -> CommerceResult<Vec<Order>> {
    let rows: Vec<OrderRow> = sqlx::query_as(&format!(
      "SELECT {} FROM orders ORDER BY created_at DESC",
      ORDER_COLUMNS
    ))
    .fetch_all(&self.pool)
    .await?;
    rows.into_iter().map(Order::try_from).collect()
  }

  fn backend_name(&self) -> &'static str {
    "postgres"
  }
}
