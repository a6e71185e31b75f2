// server/src/main.rs

mod config;
mod errors;
mod state;
mod web;

use crate::config::AppConfig;
use crate::state::AppState;

use actix_cors::Cors;
use actix_web::{web as actix_data, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use tracing_subscriber::EnvFilter;

fn init_tracing() {
  // RUST_LOG overrides the default level; LOG_FORMAT=json switches to structured output.
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration

  if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
    builder.json().init();
  } else {
    builder.init();
  }
}

fn build_cors(config: &AppConfig) -> Cors {
  match &config.cors_allowed_origin {
    Some(origin) => Cors::default()
      .allowed_origin(origin)
      .allow_any_method()
      .allow_any_header()
      .max_age(3600),
    None => Cors::permissive(),
  }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok(); // So LOG_FORMAT / RUST_LOG from .env apply to the subscriber
  init_tracing();

  tracing::info!("Starting Vibe Commerce API server...");

  let app_config = Arc::new(AppConfig::from_env().context("Failed to load application configuration")?);
  tracing::info!(env = %app_config.app_env, "Environment: {}", app_config.app_env);

  let app_state = AppState::initialize(app_config.clone()).await?;

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(build_cors(&app_state.config))
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::configure_app_routes)
      .default_service(actix_data::to(web::route_not_found))
  })
  .bind(&server_address)
  .with_context(|| format!("Failed to bind {}", server_address))?
  .run()
  .await?;

  tracing::info!("Server stopped.");
  Ok(())
}
