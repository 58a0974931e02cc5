//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use roster_core::validate::Violations;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("validation failed: {0}")]
  Validation(Violations),

  /// The body was not a JSON object of the expected shape at all.
  #[error("invalid request body: {0}")]
  Rejected(#[from] JsonRejection),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<roster_core::Error> for ApiError {
  fn from(e: roster_core::Error) -> Self {
    match e {
      roster_core::Error::Validation(v) => Self::Validation(v),
      roster_core::Error::Store(inner) => Self::Store(inner),
      other => Self::Store(Box::new(other)),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match &self {
      ApiError::NotFound(m) => {
        (StatusCode::NOT_FOUND, Json(json!({ "error": m }))).into_response()
      }
      ApiError::Validation(v) => (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": self.to_string(), "violations": v })),
      )
        .into_response(),
      ApiError::Rejected(r) => {
        (r.status(), Json(json!({ "error": r.body_text() }))).into_response()
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": e.to_string() })))
          .into_response()
      }
    }
  }
}
