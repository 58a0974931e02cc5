//! The `ResourceStore` trait.
//!
//! The trait is implemented by storage backends (`roster-store-memory`,
//! `roster-store-sqlite`). The resolver and workflows in this crate, and the
//! `roster-api` adapter, depend on this abstraction only.
//!
//! Each collection supports list-all, find-by-id, append and update-by-id
//! with a partial patch. There is no delete and no transaction; lists return
//! records in insertion order.

use std::future::Future;

use uuid::Uuid;

use crate::{
  client::{Client, ClientPatch, NewClient},
  consultant::{Consultant, ConsultantPatch, NewConsultant},
  contract::{
    ConsultantContract, ConsultantContractPatch, Contract, ContractPatch,
    NewConsultantContract, NewContract,
  },
  role::{ConsultantRole, NewConsultantRole, NewRole, Role},
};

/// Abstraction over a Roster persistence backend.
///
/// Update methods return `None` when no record has the given id. Appends
/// that reference a missing parent record (a contract for an unknown client,
/// say) are rejected by the backend with its own error.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ResourceStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Clients ───────────────────────────────────────────────────────────

  fn list_clients(
    &self,
  ) -> impl Future<Output = Result<Vec<Client>, Self::Error>> + Send + '_;

  fn get_client(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Client>, Self::Error>> + Send + '_;

  fn add_client(
    &self,
    input: NewClient,
  ) -> impl Future<Output = Result<Client, Self::Error>> + Send + '_;

  fn update_client(
    &self,
    id: Uuid,
    patch: ClientPatch,
  ) -> impl Future<Output = Result<Option<Client>, Self::Error>> + Send + '_;

  // ── Consultants ───────────────────────────────────────────────────────

  fn list_consultants(
    &self,
  ) -> impl Future<Output = Result<Vec<Consultant>, Self::Error>> + Send + '_;

  fn get_consultant(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Consultant>, Self::Error>> + Send + '_;

  fn add_consultant(
    &self,
    input: NewConsultant,
  ) -> impl Future<Output = Result<Consultant, Self::Error>> + Send + '_;

  fn update_consultant(
    &self,
    id: Uuid,
    patch: ConsultantPatch,
  ) -> impl Future<Output = Result<Option<Consultant>, Self::Error>> + Send + '_;

  // ── Contracts ─────────────────────────────────────────────────────────

  fn list_contracts(
    &self,
  ) -> impl Future<Output = Result<Vec<Contract>, Self::Error>> + Send + '_;

  fn get_contract(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Contract>, Self::Error>> + Send + '_;

  fn add_contract(
    &self,
    input: NewContract,
  ) -> impl Future<Output = Result<Contract, Self::Error>> + Send + '_;

  fn update_contract(
    &self,
    id: Uuid,
    patch: ContractPatch,
  ) -> impl Future<Output = Result<Option<Contract>, Self::Error>> + Send + '_;

  /// The first contract recorded for `input.client_id`, or `input` appended
  /// if the client has none. The flag is `true` when the contract was
  /// created. The lookup and the append are one atomic step, so concurrent
  /// callers for the same client all receive the same contract.
  fn find_or_add_contract(
    &self,
    input: NewContract,
  ) -> impl Future<Output = Result<(Contract, bool), Self::Error>> + Send + '_;

  // ── Consultant contracts ──────────────────────────────────────────────

  fn list_consultant_contracts(
    &self,
  ) -> impl Future<Output = Result<Vec<ConsultantContract>, Self::Error>>
  + Send
  + '_;

  fn get_consultant_contract(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<ConsultantContract>, Self::Error>>
  + Send
  + '_;

  fn add_consultant_contract(
    &self,
    input: NewConsultantContract,
  ) -> impl Future<Output = Result<ConsultantContract, Self::Error>> + Send + '_;

  fn update_consultant_contract(
    &self,
    id: Uuid,
    patch: ConsultantContractPatch,
  ) -> impl Future<Output = Result<Option<ConsultantContract>, Self::Error>>
  + Send
  + '_;

  // ── Roles ─────────────────────────────────────────────────────────────

  fn list_roles(
    &self,
  ) -> impl Future<Output = Result<Vec<Role>, Self::Error>> + Send + '_;

  fn add_role(
    &self,
    input: NewRole,
  ) -> impl Future<Output = Result<Role, Self::Error>> + Send + '_;

  fn list_consultant_roles(
    &self,
  ) -> impl Future<Output = Result<Vec<ConsultantRole>, Self::Error>> + Send + '_;

  fn add_consultant_role(
    &self,
    input: NewConsultantRole,
  ) -> impl Future<Output = Result<ConsultantRole, Self::Error>> + Send + '_;
}
