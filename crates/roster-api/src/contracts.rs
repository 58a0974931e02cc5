//! Handlers for `/contracts` and `/consultant-contracts`.
//!
//! Contracts are only ever created by the assignment workflow, so there is
//! no `POST` here.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
};
use roster_core::{
  contract::{ConsultantContract, Contract},
  store::ResourceStore,
  validate::AmendmentForm,
  workflow,
};
use uuid::Uuid;

use crate::error::ApiError;

/// `GET /contracts`
pub async fn list<S: ResourceStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Contract>>, ApiError> {
  let contracts = store
    .list_contracts()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(contracts))
}

/// `GET /consultant-contracts`
pub async fn list_assignments<S: ResourceStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<ConsultantContract>>, ApiError> {
  let records = store
    .list_consultant_contracts()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(records))
}

/// `PATCH /consultant-contracts/:id` — body: [`AmendmentForm`].
pub async fn amend<S: ResourceStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  form: Result<Json<AmendmentForm>, JsonRejection>,
) -> Result<Json<ConsultantContract>, ApiError> {
  let Json(form) = form?;
  let record = workflow::amend_from_form(store.as_ref(), id, &form)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("consultant contract {id} not found")))?;
  Ok(Json(record))
}
