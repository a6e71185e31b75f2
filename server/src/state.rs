// server/src/state.rs
use crate::config::AppConfig;
use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn};
use vibe_commerce::catalog::seed_catalog;
use vibe_commerce::{CommerceStore, MemoryStore, PgStore};

#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn CommerceStore>,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  pub fn new(store: Arc<dyn CommerceStore>, config: Arc<AppConfig>) -> Self {
    Self { store, config }
  }

  /// Picks the store backend from the config and seeds it when asked to.
  pub async fn initialize(config: Arc<AppConfig>) -> anyhow::Result<Self> {
    let store: Arc<dyn CommerceStore> = match &config.database_url {
      Some(database_url) => {
        let store = PgStore::connect(database_url, config.db_max_connections)
          .await
          .context("Database connection error")?;
        if config.seed_db {
          seed_catalog(&store).await.context("Failed to seed database")?;
        }
        Arc::new(store)
      }
      None => {
        warn!("DATABASE_URL is not set; using the in-memory store. Carts and orders are lost on restart.");
        // Nothing to read the catalog from, so the memory store is always seeded.
        let store = MemoryStore::new();
        seed_catalog(&store).await.context("Failed to seed in-memory catalog")?;
        Arc::new(store)
      }
    };
    info!(backend = store.backend_name(), "Store ready.");

    Ok(Self::new(store, config))
  }
}
