//! Handlers for `/clients` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/clients` | All clients |
//! | `POST`  | `/clients` | Body: [`ClientForm`]; returns 201 |
//! | `GET`   | `/clients/:id` | Client with contracts and consultants |
//! | `PATCH` | `/clients/:id` | Body: [`ClientPatchForm`] |
//! | `GET`   | `/clients/:id/consultants` | One entry per assignment; `?active=true` drops ended ones |
//! | `GET`   | `/clients/:id/roster` | One entry per consultant |
//! | `GET`   | `/clients/:id/available-consultants` | Consultants not yet on the client |
//! | `POST`  | `/clients/:id/assignments` | Body: [`AssignBody`]; returns 201 |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use roster_core::{
  client::Client,
  consultant::Consultant,
  resolve::{ClientConsultant, ClientDetail},
  snapshot::Snapshot,
  store::ResourceStore,
  validate::{AssignmentForm, ClientForm, ClientPatchForm},
  workflow,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;

/// Load a snapshot and fail with 404 if `id` is not among its clients.
async fn snapshot_for<S: ResourceStore>(store: &S, id: Uuid) -> Result<Snapshot, ApiError> {
  let snapshot = Snapshot::load(store).await?;
  if snapshot.clients.iter().any(|c| c.id == id) {
    Ok(snapshot)
  } else {
    Err(ApiError::NotFound(format!("client {id} not found")))
  }
}

// ─── List / create ────────────────────────────────────────────────────────────

/// `GET /clients`
pub async fn list<S: ResourceStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Client>>, ApiError> {
  let clients = store
    .list_clients()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(clients))
}

/// `POST /clients`
pub async fn create<S: ResourceStore>(
  State(store): State<Arc<S>>,
  form: Result<Json<ClientForm>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(form) = form?;
  let client = workflow::create_client(store.as_ref(), &form).await?;
  Ok((StatusCode::CREATED, Json(client)))
}

// ─── Get / update ─────────────────────────────────────────────────────────────

/// `GET /clients/:id`
pub async fn get_one<S: ResourceStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<ClientDetail>, ApiError> {
  let detail = Snapshot::load(store.as_ref())
    .await?
    .client_detail(id)
    .ok_or_else(|| ApiError::NotFound(format!("client {id} not found")))?;
  Ok(Json(detail))
}

/// `PATCH /clients/:id`
pub async fn update<S: ResourceStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  form: Result<Json<ClientPatchForm>, JsonRejection>,
) -> Result<Json<Client>, ApiError> {
  let Json(form) = form?;
  let client = workflow::update_client(store.as_ref(), id, &form)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("client {id} not found")))?;
  Ok(Json(client))
}

// ─── Joins ────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct JoinParams {
  /// Reference instant for role resolution. Defaults to now.
  pub as_of:  Option<DateTime<Utc>>,
  /// Only assignments active at `as_of`.
  #[serde(default)]
  pub active: bool,
}

/// `GET /clients/:id/consultants[?as_of=...][&active=true]`
pub async fn consultants<S: ResourceStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Query(params): Query<JoinParams>,
) -> Result<Json<Vec<ClientConsultant>>, ApiError> {
  let snapshot = snapshot_for(store.as_ref(), id).await?;
  let now = params.as_of.unwrap_or_else(Utc::now);
  let joined = if params.active {
    snapshot.active_client_consultants(id, now)
  } else {
    snapshot.client_consultants(id, now)
  };
  Ok(Json(joined))
}

/// `GET /clients/:id/roster[?as_of=...]`
pub async fn roster<S: ResourceStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Query(params): Query<JoinParams>,
) -> Result<Json<Vec<ClientConsultant>>, ApiError> {
  let snapshot = snapshot_for(store.as_ref(), id).await?;
  let now = params.as_of.unwrap_or_else(Utc::now);
  Ok(Json(snapshot.client_roster(id, now)))
}

/// `GET /clients/:id/available-consultants`
pub async fn available<S: ResourceStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<Consultant>>, ApiError> {
  let snapshot = snapshot_for(store.as_ref(), id).await?;
  Ok(Json(snapshot.available_consultants(id)))
}

// ─── Assign ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /clients/:id/assignments`. The client comes
/// from the path.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AssignBody {
  pub consultant_id: Value,
  pub role:          Value,
  pub utilization:   Value,
  pub start_date:    Value,
}

/// `POST /clients/:id/assignments` — returns 201 + the contract used and the
/// new assignment.
pub async fn assign<S: ResourceStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  body: Result<Json<AssignBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(body) = body?;
  let form = AssignmentForm {
    consultant_id: body.consultant_id,
    client_id:     id.to_string().into(),
    role:          body.role,
    utilization:   body.utilization,
    start_date:    body.start_date,
  };
  let assignment = workflow::assign_from_form(store.as_ref(), &form).await?;
  Ok((StatusCode::CREATED, Json(assignment)))
}
