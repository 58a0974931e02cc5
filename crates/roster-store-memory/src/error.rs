//! Error type for `roster-store-memory`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  /// A previous holder of the collections lock panicked mid-mutation.
  #[error("store lock poisoned")]
  Poisoned,

  #[error("client not found: {0}")]
  ClientNotFound(Uuid),

  #[error("consultant not found: {0}")]
  ConsultantNotFound(Uuid),

  #[error("contract not found: {0}")]
  ContractNotFound(Uuid),

  #[error("role not found: {0}")]
  RoleNotFound(Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
