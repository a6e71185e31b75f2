// server/src/web/extractors.rs

use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use std::fmt;
use tracing::warn;
use vibe_commerce::cart::DEFAULT_USER_ID;

use crate::errors::AppError;
use crate::state::AppState;

pub const SHOPPER_HEADER: &str = "X-User-ID";
const MAX_SHOPPER_ID_LEN: usize = 128;

/// Identifies whose cart a request operates on.
///
/// There is no authentication: the `X-User-ID` header is trusted as-is, and requests
/// without it share the configured default shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopperId(pub String);

impl ShopperId {
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ShopperId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

fn shopper_from_request(req: &HttpRequest) -> Result<ShopperId, AppError> {
  let header = match req.headers().get(SHOPPER_HEADER) {
    Some(value) => Some(value.to_str().map_err(|_| {
      warn!("ShopperId extractor: {} header is not valid text.", SHOPPER_HEADER);
      AppError::Validation(format!("Invalid {} header", SHOPPER_HEADER))
    })?),
    None => None,
  };

  match header.map(str::trim).filter(|v| !v.is_empty()) {
    Some(id) if id.len() > MAX_SHOPPER_ID_LEN => {
      warn!("ShopperId extractor: {} header too long ({} bytes).", SHOPPER_HEADER, id.len());
      Err(AppError::Validation(format!("Invalid {} header", SHOPPER_HEADER)))
    }
    Some(id) => Ok(ShopperId(id.to_string())),
    None => {
      let default_id = req
        .app_data::<web::Data<AppState>>()
        .map(|state| state.config.default_user_id.clone())
        .unwrap_or_else(|| DEFAULT_USER_ID.to_string());
      Ok(ShopperId(default_id))
    }
  }
}

impl FromRequest for ShopperId {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    ready(shopper_from_request(req))
  }
}
