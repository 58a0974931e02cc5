//! Error types for `roster-core`.

use thiserror::Error;

use crate::validate::Violations;

#[derive(Debug, Error)]
pub enum Error {
  /// Input failed one or more declared constraints. Raised before any
  /// mutation takes place.
  #[error("validation failed: {0}")]
  Validation(Violations),

  #[error("unknown utilization code: {0}")]
  UnknownUtilization(i64),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Box a backend error raised while a workflow was talking to its store.
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }

  /// The violations carried by a [`Error::Validation`], if that is what this is.
  pub fn violations(&self) -> Option<&Violations> {
    match self {
      Self::Validation(v) => Some(v),
      _ => None,
    }
  }
}

impl From<Violations> for Error {
  fn from(v: Violations) -> Self { Self::Validation(v) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
