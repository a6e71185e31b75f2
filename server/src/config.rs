// server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::fmt;
use std::str::FromStr;
use vibe_commerce::cart::DEFAULT_USER_ID;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
  Development,
  Production,
}

impl FromStr for AppEnv {
  type Err = AppError;

  fn from_str(s: &str) -> Result<Self> {
    match s.to_ascii_lowercase().as_str() {
      "development" | "dev" | "test" => Ok(AppEnv::Development),
      "production" | "prod" => Ok(AppEnv::Production),
      other => Err(AppError::Config(format!("Invalid APP_ENV value: '{}'", other))),
    }
  }
}

impl fmt::Display for AppEnv {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      AppEnv::Development => f.write_str("development"),
      AppEnv::Production => f.write_str("production"),
    }
  }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,

  // Without a database URL the server runs on the in-memory store.
  pub database_url: Option<String>,
  pub db_max_connections: u32,

  // Replace the catalog with the seed products on startup
  pub seed_db: bool,

  pub app_env: AppEnv,

  // Shopper whose cart is used when a request carries no X-User-ID header
  pub default_user_id: String,

  // Unset means any origin may call the API
  pub cors_allowed_origin: Option<String>,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|var_name| env::var(var_name).ok())
  }

  /// Builds the config from any variable source. Empty values count as unset.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get_env = |var_name: &str| lookup(var_name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|| "5000".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL");
    let db_max_connections = get_env("DB_MAX_CONNECTIONS")
      .unwrap_or_else(|| "5".to_string())
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid DB_MAX_CONNECTIONS: {}", e)))?;
    if db_max_connections == 0 {
      return Err(AppError::Config("DB_MAX_CONNECTIONS must be at least 1".to_string()));
    }

    let seed_db = get_env("SEED_DB")
      .unwrap_or_else(|| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_DB value: {}", e)))?;

    let app_env = get_env("APP_ENV")
      .unwrap_or_else(|| "development".to_string())
      .parse::<AppEnv>()?;

    let default_user_id = get_env("DEFAULT_USER_ID").unwrap_or_else(|| DEFAULT_USER_ID.to_string());
    let cors_allowed_origin = get_env("CORS_ALLOWED_ORIGIN");

    tracing::info!("Application configuration loaded successfully.");
    // The database URL can carry credentials, so only log whether it is set.
    tracing::debug!(
      host = %server_host,
      port = server_port,
      database = database_url.is_some(),
      env = %app_env,
      "Loaded config details"
    );

    Ok(Self {
      server_host,
      server_port,
      database_url,
      db_max_connections,
      seed_db,
      app_env,
      default_user_id,
      cors_allowed_origin,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }

  /// Whether 500 responses include the underlying error text.
  pub fn expose_error_details(&self) -> bool {
    self.app_env != AppEnv::Production
  }
}
