// server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::{json, Value};
use thiserror::Error;
use vibe_commerce::CommerceError;

use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  /// A store or other unexpected failure while carrying out `message` (e.g. "Failed to fetch cart").
  /// `detail` is the text sent back in `error`, present only outside production.
  #[error("{message}: {source}")]
  Failed {
    message: &'static str,
    detail: Option<String>,
    #[source]
    source: CommerceError,
  },
}

impl AppError {
  /// Maps a domain error raised while performing an operation: bad input and unknown
  /// entities keep their own message, anything else becomes a 500 labelled `message`.
  ///
  /// ```ignore
  /// cart::view_cart(store, &shopper)
  ///   .await
  ///   .map_err(AppError::during("Failed to fetch cart", &app_state.config))?;
  /// ```
  pub fn during(message: &'static str, config: &AppConfig) -> impl FnOnce(CommerceError) -> AppError {
    let expose_details = config.expose_error_details();
    move |err| match err {
      CommerceError::Validation(m) => AppError::Validation(m),
      CommerceError::NotFound(m) => AppError::NotFound(m),
      source => AppError::Failed {
        message,
        detail: expose_details.then(|| source.to_string()),
        source,
      },
    }
  }
}

fn failure_body(message: &str, detail: Option<String>) -> Value {
  match detail {
    Some(detail) => json!({ "success": false, "message": message, "error": detail }),
    None => json!({ "success": false, "message": message }),
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Config(_) | AppError::Failed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    // Log the full error when it's turned into a response
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, "Rejecting request");
    }

    let body = match self {
      AppError::Validation(m) | AppError::NotFound(m) => failure_body(m, None),
      AppError::Failed { message, detail, .. } => failure_body(message, detail.clone()),
      AppError::Config(_) => failure_body("Configuration issue", None),
    };
    HttpResponse::build(status).json(body)
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  fn config(app_env: &str) -> AppConfig {
    let app_env = app_env.to_string();
    AppConfig::from_lookup(|k| (k == "APP_ENV").then(|| app_env.clone())).expect("valid config")
  }

  #[test]
  fn client_errors_keep_their_message_and_status() {
    let dev = config("development");
    let err = AppError::during("Failed to add item to cart", &dev)(CommerceError::validation("Quantity must be at least 1"));
    assert!(matches!(err, AppError::Validation(ref m) if m == "Quantity must be at least 1"));
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

    let err = AppError::during("Failed to update cart", &dev)(CommerceError::not_found("Item not found in cart"));
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
  }

  #[test]
  fn store_failures_become_labelled_500s() {
    let err = AppError::during("Failed to fetch cart", &config("development"))(CommerceError::Internal(
      "disk on fire".to_string(),
    ));
    match &err {
      AppError::Failed { message, detail, .. } => {
        assert_eq!(*message, "Failed to fetch cart");
        assert_eq!(detail.as_deref(), Some("Internal error: disk on fire"));
      }
      other => panic!("Expected AppError::Failed, got {:?}", other),
    }
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[test]
  fn production_hides_failure_detail() {
    let err = AppError::during("Failed to fetch cart", &config("production"))(CommerceError::Internal(
      "disk on fire".to_string(),
    ));
    assert!(matches!(err, AppError::Failed { detail: None, .. }));
  }

  #[test]
  fn failure_body_only_carries_error_when_given() {
    let hidden = failure_body("Failed to fetch orders", None);
    assert_eq!(hidden, json!({ "success": false, "message": "Failed to fetch orders" }));

    let shown = failure_body("Failed to fetch orders", Some("connection reset".to_string()));
    assert_eq!(shown["error"], "connection reset");
  }
}
