//! [`MemoryStore`] — the in-process implementation of [`ResourceStore`].

use std::{
  sync::{Arc, Mutex},
  time::Duration,
};

use uuid::Uuid;

use roster_core::{
  client::{Client, ClientPatch, NewClient},
  consultant::{Consultant, ConsultantPatch, NewConsultant},
  contract::{
    ConsultantContract, ConsultantContractPatch, Contract, ContractPatch,
    NewConsultantContract, NewContract,
  },
  role::{ConsultantRole, NewConsultantRole, NewRole, Role},
  snapshot::Snapshot,
  store::ResourceStore,
};

use crate::{Error, Result, seed::demo_dataset};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Roster store held entirely in memory.
///
/// Cloning is cheap — clones share the same collections. Every operation
/// first sleeps for the configured latency, then reads or mutates the
/// collections without yielding, so a mutation is never observed half-done.
#[derive(Clone, Default)]
pub struct MemoryStore {
  data:    Arc<Mutex<Snapshot>>,
  latency: Duration,
}

impl MemoryStore {
  /// An empty store with no simulated latency.
  pub fn new() -> Self { Self::default() }

  /// A store pre-populated with `data`.
  pub fn from_snapshot(data: Snapshot) -> Self {
    Self { data: Arc::new(Mutex::new(data)), latency: Duration::ZERO }
  }

  /// A store pre-populated with [`demo_dataset`].
  pub fn seeded() -> Self {
    let data = demo_dataset();
    tracing::debug!(
      clients = data.clients.len(),
      consultants = data.consultants.len(),
      "seeded in-memory store"
    );
    Self::from_snapshot(data)
  }

  /// Delay every operation by `latency`.
  pub fn with_latency(mut self, latency: Duration) -> Self {
    self.latency = latency;
    self
  }

  pub fn latency(&self) -> Duration { self.latency }

  /// A copy of every collection as it stands now. Does not sleep.
  pub fn snapshot(&self) -> Result<Snapshot> { self.with(|d| Ok(d.clone())) }

  async fn settle(&self) {
    if !self.latency.is_zero() {
      tokio::time::sleep(self.latency).await;
    }
  }

  fn with<T>(&self, f: impl FnOnce(&mut Snapshot) -> Result<T>) -> Result<T> {
    let mut guard = self.data.lock().map_err(|_| Error::Poisoned)?;
    f(&mut guard)
  }
}

fn find_mut<T>(items: &mut [T], pred: impl Fn(&T) -> bool) -> Option<&mut T> {
  items.iter_mut().find(|item| pred(item))
}

// ─── ResourceStore impl ──────────────────────────────────────────────────────

impl ResourceStore for MemoryStore {
  type Error = Error;

  // ── Clients ───────────────────────────────────────────────────────────────

  async fn list_clients(&self) -> Result<Vec<Client>> {
    self.settle().await;
    self.with(|d| Ok(d.clients.clone()))
  }

  async fn get_client(&self, id: Uuid) -> Result<Option<Client>> {
    self.settle().await;
    self.with(|d| Ok(d.clients.iter().find(|c| c.id == id).cloned()))
  }

  async fn add_client(&self, input: NewClient) -> Result<Client> {
    self.settle().await;
    let client = input.into_client(Uuid::new_v4());
    self.with(|d| {
      d.clients.push(client.clone());
      Ok(client)
    })
  }

  async fn update_client(&self, id: Uuid, patch: ClientPatch) -> Result<Option<Client>> {
    self.settle().await;
    self.with(|d| {
      Ok(find_mut(&mut d.clients, |c| c.id == id).map(|c| {
        patch.apply(c);
        c.clone()
      }))
    })
  }

  // ── Consultants ───────────────────────────────────────────────────────────

  async fn list_consultants(&self) -> Result<Vec<Consultant>> {
    self.settle().await;
    self.with(|d| Ok(d.consultants.clone()))
  }

  async fn get_consultant(&self, id: Uuid) -> Result<Option<Consultant>> {
    self.settle().await;
    self.with(|d| Ok(d.consultants.iter().find(|c| c.id == id).cloned()))
  }

  async fn add_consultant(&self, input: NewConsultant) -> Result<Consultant> {
    self.settle().await;
    let consultant = input.into_consultant(Uuid::new_v4());
    self.with(|d| {
      d.consultants.push(consultant.clone());
      Ok(consultant)
    })
  }

  async fn update_consultant(
    &self,
    id: Uuid,
    patch: ConsultantPatch,
  ) -> Result<Option<Consultant>> {
    self.settle().await;
    self.with(|d| {
      Ok(find_mut(&mut d.consultants, |c| c.id == id).map(|c| {
        patch.apply(c);
        c.clone()
      }))
    })
  }

  // ── Contracts ─────────────────────────────────────────────────────────────

  async fn list_contracts(&self) -> Result<Vec<Contract>> {
    self.settle().await;
    self.with(|d| Ok(d.contracts.clone()))
  }

  async fn get_contract(&self, id: Uuid) -> Result<Option<Contract>> {
    self.settle().await;
    self.with(|d| Ok(d.contracts.iter().find(|c| c.id == id).cloned()))
  }

  async fn add_contract(&self, input: NewContract) -> Result<Contract> {
    self.settle().await;
    let contract = input.into_contract(Uuid::new_v4());
    self.with(|d| {
      if !d.clients.iter().any(|c| c.id == contract.client_id) {
        return Err(Error::ClientNotFound(contract.client_id));
      }
      d.contracts.push(contract.clone());
      Ok(contract)
    })
  }

  async fn find_or_add_contract(&self, input: NewContract) -> Result<(Contract, bool)> {
    self.settle().await;
    self.with(|d| {
      if let Some(existing) = d.contracts.iter().find(|c| c.client_id == input.client_id) {
        return Ok((existing.clone(), false));
      }
      if !d.clients.iter().any(|c| c.id == input.client_id) {
        return Err(Error::ClientNotFound(input.client_id));
      }
      let contract = input.into_contract(Uuid::new_v4());
      d.contracts.push(contract.clone());
      Ok((contract, true))
    })
  }

  async fn update_contract(&self, id: Uuid, patch: ContractPatch) -> Result<Option<Contract>> {
    self.settle().await;
    self.with(|d| {
      Ok(find_mut(&mut d.contracts, |c| c.id == id).map(|c| {
        patch.apply(c);
        c.clone()
      }))
    })
  }

  // ── Consultant contracts ──────────────────────────────────────────────────

  async fn list_consultant_contracts(&self) -> Result<Vec<ConsultantContract>> {
    self.settle().await;
    self.with(|d| Ok(d.consultant_contracts.clone()))
  }

  async fn get_consultant_contract(&self, id: Uuid) -> Result<Option<ConsultantContract>> {
    self.settle().await;
    self.with(|d| Ok(d.consultant_contracts.iter().find(|cc| cc.id == id).cloned()))
  }

  async fn add_consultant_contract(
    &self,
    input: NewConsultantContract,
  ) -> Result<ConsultantContract> {
    self.settle().await;
    let record = input.into_consultant_contract(Uuid::new_v4());
    self.with(|d| {
      if !d.consultants.iter().any(|c| c.id == record.consultant_id) {
        return Err(Error::ConsultantNotFound(record.consultant_id));
      }
      if !d.contracts.iter().any(|c| c.id == record.contract_id) {
        return Err(Error::ContractNotFound(record.contract_id));
      }
      d.consultant_contracts.push(record.clone());
      Ok(record)
    })
  }

  async fn update_consultant_contract(
    &self,
    id: Uuid,
    patch: ConsultantContractPatch,
  ) -> Result<Option<ConsultantContract>> {
    self.settle().await;
    self.with(|d| {
      Ok(find_mut(&mut d.consultant_contracts, |cc| cc.id == id).map(|cc| {
        patch.apply(cc);
        cc.clone()
      }))
    })
  }

  // ── Roles ─────────────────────────────────────────────────────────────────

  async fn list_roles(&self) -> Result<Vec<Role>> {
    self.settle().await;
    self.with(|d| Ok(d.roles.clone()))
  }

  async fn add_role(&self, input: NewRole) -> Result<Role> {
    self.settle().await;
    let role = input.into_role(Uuid::new_v4());
    self.with(|d| {
      d.roles.push(role.clone());
      Ok(role)
    })
  }

  async fn list_consultant_roles(&self) -> Result<Vec<ConsultantRole>> {
    self.settle().await;
    self.with(|d| Ok(d.consultant_roles.clone()))
  }

  async fn add_consultant_role(&self, input: NewConsultantRole) -> Result<ConsultantRole> {
    self.settle().await;
    let record = input.into_consultant_role(Uuid::new_v4());
    self.with(|d| {
      if !d.consultants.iter().any(|c| c.id == record.consultant_id) {
        return Err(Error::ConsultantNotFound(record.consultant_id));
      }
      if !d.roles.iter().any(|r| r.id == record.role_id) {
        return Err(Error::RoleNotFound(record.role_id));
      }
      d.consultant_roles.push(record.clone());
      Ok(record)
    })
  }
}
