//! An in-memory copy of every collection, loaded once per request.
//!
//! The resolver in [`crate::resolve`] works over a snapshot rather than the
//! store so that it stays a set of pure functions.

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  client::Client,
  consultant::Consultant,
  contract::{ConsultantContract, Contract},
  role::{ConsultantRole, Role},
  store::ResourceStore,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
  pub clients:              Vec<Client>,
  pub consultants:          Vec<Consultant>,
  pub contracts:            Vec<Contract>,
  pub consultant_contracts: Vec<ConsultantContract>,
  /// Empty when the backend carries no structured roles.
  pub roles:                Vec<Role>,
  pub consultant_roles:     Vec<ConsultantRole>,
}

impl Snapshot {
  /// Read every collection from `store`.
  pub async fn load<S: ResourceStore>(store: &S) -> Result<Self> {
    Ok(Self {
      clients:              store.list_clients().await.map_err(Error::store)?,
      consultants:          store.list_consultants().await.map_err(Error::store)?,
      contracts:            store.list_contracts().await.map_err(Error::store)?,
      consultant_contracts: store
        .list_consultant_contracts()
        .await
        .map_err(Error::store)?,
      roles:                store.list_roles().await.map_err(Error::store)?,
      consultant_roles:     store.list_consultant_roles().await.map_err(Error::store)?,
    })
  }
}
