//! State-changing operations, written against any [`ResourceStore`].
//!
//! Each workflow validates its input in full before it touches the store, so
//! a rejected request never leaves a partial write behind.

use uuid::Uuid;

use crate::{
  Error, Result,
  client::Client,
  consultant::Consultant,
  contract::{
    ConsultantContract, ConsultantContractPatch, Contract, NewConsultantContract,
    NewContract,
  },
  store::ResourceStore,
  validate::{
    AmendmentForm, AssignmentForm, AssignmentRequest, ClientForm, ClientPatchForm,
    ConsultantForm, ConsultantPatchForm, Violations,
  },
};

// ─── Clients and consultants ─────────────────────────────────────────────────

pub async fn create_client<S: ResourceStore>(store: &S, form: &ClientForm) -> Result<Client> {
  let input = form.validate()?;
  let client = store.add_client(input).await.map_err(Error::store)?;
  tracing::info!(client_id = %client.id, name = %client.name, "created client");
  Ok(client)
}

/// `Ok(None)` when no client has `id`.
pub async fn update_client<S: ResourceStore>(
  store: &S,
  id: Uuid,
  form: &ClientPatchForm,
) -> Result<Option<Client>> {
  let patch = form.validate()?;
  store.update_client(id, patch).await.map_err(Error::store)
}

pub async fn create_consultant<S: ResourceStore>(
  store: &S,
  form: &ConsultantForm,
) -> Result<Consultant> {
  let input = form.validate()?;
  let consultant = store.add_consultant(input).await.map_err(Error::store)?;
  tracing::info!(consultant_id = %consultant.id, name = %consultant.name, "created consultant");
  Ok(consultant)
}

/// `Ok(None)` when no consultant has `id`.
pub async fn update_consultant<S: ResourceStore>(
  store: &S,
  id: Uuid,
  form: &ConsultantPatchForm,
) -> Result<Option<Consultant>> {
  let patch = form.validate()?;
  store.update_consultant(id, patch).await.map_err(Error::store)
}

// ─── Main contract ───────────────────────────────────────────────────────────

/// The contract an assignment lands on, and whether it was created for it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MainContract {
  pub created:  bool,
  pub contract: Contract,
}

/// Name given to a client's lazily created contract.
pub fn main_contract_name(client_id: Uuid, client: Option<&Client>) -> String {
  match client {
    Some(c) => format!("{} Main Contract", c.name),
    None => format!("Client {client_id} Contract"),
  }
}

/// Return the client's first contract, creating `"{name} Main Contract"`
/// starting at `start_date` if the client has none yet.
///
/// The existence check and the creation happen atomically inside the store,
/// so overlapping first assignments to one client share a single contract.
pub async fn resolve_main_contract<S: ResourceStore>(
  store: &S,
  client_id: Uuid,
  start_date: chrono::DateTime<chrono::Utc>,
) -> Result<MainContract> {
  let client = store.get_client(client_id).await.map_err(Error::store)?;
  let (contract, created) = store
    .find_or_add_contract(NewContract {
      contract_name: main_contract_name(client_id, client.as_ref()),
      start_date,
      end_date: None,
      client_id,
    })
    .await
    .map_err(Error::store)?;

  if created {
    tracing::info!(
      contract_id = %contract.id,
      client_id = %client_id,
      name = %contract.contract_name,
      "created main contract"
    );
  }
  Ok(MainContract { created, contract })
}

// ─── Assignment ──────────────────────────────────────────────────────────────

/// Result of [`assign_consultant_to_client`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Assignment {
  pub contract:            Contract,
  /// `true` if `contract` was created by this assignment.
  pub contract_created:    bool,
  pub consultant_contract: ConsultantContract,
}

/// Attach a consultant to a client.
///
/// Both references are checked before anything is written; when both are
/// missing both are reported. The client's main contract is reused or
/// created, then a new join record is appended. An existing assignment of
/// the same consultant to the same client is not looked for: callers that
/// want to prevent duplicates filter with
/// [`Snapshot::available_consultants`](crate::snapshot::Snapshot::available_consultants).
pub async fn assign_consultant_to_client<S: ResourceStore>(
  store: &S,
  request: AssignmentRequest,
) -> Result<Assignment> {
  let mut v = Violations::default();
  if store
    .get_consultant(request.consultant_id)
    .await
    .map_err(Error::store)?
    .is_none()
  {
    v.push(
      "consultant_id",
      format!("consultant {} does not exist", request.consultant_id),
    );
  }
  if store
    .get_client(request.client_id)
    .await
    .map_err(Error::store)?
    .is_none()
  {
    v.push("client_id", format!("client {} does not exist", request.client_id));
  }
  if !v.is_empty() {
    return Err(Error::Validation(v));
  }

  let main = resolve_main_contract(store, request.client_id, request.start_date).await?;

  let consultant_contract = store
    .add_consultant_contract(NewConsultantContract {
      consultant_id: request.consultant_id,
      contract_id:   main.contract.id,
      role:          request.role,
      utilization:   request.utilization,
      start_date:    request.start_date,
      end_date:      None,
    })
    .await
    .map_err(|e| {
      // The contract stays behind; later assignments to the client reuse it.
      tracing::warn!(
        error = %e,
        contract_id = %main.contract.id,
        contract_created = main.created,
        consultant_id = %request.consultant_id,
        "assignment failed after resolving main contract"
      );
      Error::store(e)
    })?;

  tracing::info!(
    consultant_id = %consultant_contract.consultant_id,
    client_id = %request.client_id,
    contract_id = %main.contract.id,
    role = %consultant_contract.role,
    utilization = %consultant_contract.utilization,
    "assigned consultant"
  );

  Ok(Assignment {
    contract: main.contract,
    contract_created: main.created,
    consultant_contract,
  })
}

/// Validate raw form input, then run [`assign_consultant_to_client`].
pub async fn assign_from_form<S: ResourceStore>(
  store: &S,
  form: &AssignmentForm,
) -> Result<Assignment> {
  let request = form.validate()?;
  assign_consultant_to_client(store, request).await
}

// ─── Amendment ───────────────────────────────────────────────────────────────

/// Update role, utilization or dates on an assignment.
///
/// `Ok(None)` when no assignment has `id`, whatever the patch holds. Fails
/// with a validation error, leaving the record untouched, if the resulting
/// end date would precede the start date.
pub async fn amend_consultant_contract<S: ResourceStore>(
  store: &S,
  id: Uuid,
  patch: ConsultantContractPatch,
) -> Result<Option<ConsultantContract>> {
  let Some(current) = store.get_consultant_contract(id).await.map_err(Error::store)? else {
    return Ok(None);
  };

  let mut v = Violations::default();
  if let (Some(start), Some(end)) = (patch.start_date, patch.end_date)
    && end < start
  {
    v.push("end_date", "end date cannot be before start date");
    return Err(Error::Validation(v));
  }

  if let (start, Some(end)) = patch.merged_range(&current)
    && end < start
  {
    v.push("end_date", format!("end date {end} is before start date {start}"));
    return Err(Error::Validation(v));
  }

  if patch.is_empty() {
    return Ok(Some(current));
  }

  let updated = store
    .update_consultant_contract(id, patch)
    .await
    .map_err(Error::store)?;
  if let Some(cc) = &updated {
    tracing::info!(consultant_contract_id = %cc.id, role = %cc.role, "amended assignment");
  }
  Ok(updated)
}

/// Validate raw form input, then run [`amend_consultant_contract`].
pub async fn amend_from_form<S: ResourceStore>(
  store: &S,
  id: Uuid,
  form: &AmendmentForm,
) -> Result<Option<ConsultantContract>> {
  let patch = form.validate()?;
  amend_consultant_contract(store, id, patch).await
}
