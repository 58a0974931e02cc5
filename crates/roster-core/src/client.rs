//! Clients — the organisations consultants are assigned to.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An organisation receiving consulting services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
  pub id:          Uuid,
  pub name:        String,
  pub description: String,
  pub address:     String,
}

/// Input to [`crate::store::ResourceStore::add_client`]. The id is assigned
/// by the store.
#[derive(Debug, Clone)]
pub struct NewClient {
  pub name:        String,
  pub description: String,
  pub address:     String,
}

impl NewClient {
  pub fn into_client(self, id: Uuid) -> Client {
    Client {
      id,
      name: self.name,
      description: self.description,
      address: self.address,
    }
  }
}

/// A partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct ClientPatch {
  pub name:        Option<String>,
  pub description: Option<String>,
  pub address:     Option<String>,
}

impl ClientPatch {
  pub fn apply(self, client: &mut Client) {
    if let Some(name) = self.name {
      client.name = name;
    }
    if let Some(description) = self.description {
      client.description = description;
    }
    if let Some(address) = self.address {
      client.address = address;
    }
  }
}
