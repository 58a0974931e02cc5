//! Handlers for `/consultants` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/consultants` | With current roles; optional `?client_id`, `as_of` |
//! | `POST`  | `/consultants` | Body: [`ConsultantForm`]; returns 201 |
//! | `GET`   | `/consultants/:id` | Role plus every engagement |
//! | `PATCH` | `/consultants/:id` | Body: [`ConsultantPatchForm`] |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use roster_core::{
  consultant::Consultant,
  resolve::{ConsultantDetail, ConsultantWithRole},
  snapshot::Snapshot,
  store::ResourceStore,
  validate::{ConsultantForm, ConsultantPatchForm},
  workflow,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  /// Only consultants with an assignment under this client.
  pub client_id: Option<Uuid>,
  /// Reference instant for role resolution. Defaults to now.
  pub as_of:     Option<DateTime<Utc>>,
}

/// `GET /consultants[?client_id=...][&as_of=...]`
pub async fn list<S: ResourceStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<ConsultantWithRole>>, ApiError> {
  let snapshot = Snapshot::load(store.as_ref()).await?;
  let now = params.as_of.unwrap_or_else(Utc::now);
  Ok(Json(snapshot.consultants_with_roles(params.client_id, now)))
}

/// `POST /consultants`
pub async fn create<S: ResourceStore>(
  State(store): State<Arc<S>>,
  form: Result<Json<ConsultantForm>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(form) = form?;
  let consultant = workflow::create_consultant(store.as_ref(), &form).await?;
  Ok((StatusCode::CREATED, Json(consultant)))
}

#[derive(Debug, Default, Deserialize)]
pub struct DetailParams {
  pub as_of: Option<DateTime<Utc>>,
}

/// `GET /consultants/:id[?as_of=...]`
pub async fn get_one<S: ResourceStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Query(params): Query<DetailParams>,
) -> Result<Json<ConsultantDetail>, ApiError> {
  let now = params.as_of.unwrap_or_else(Utc::now);
  let detail = Snapshot::load(store.as_ref())
    .await?
    .consultant_detail(id, now)
    .ok_or_else(|| ApiError::NotFound(format!("consultant {id} not found")))?;
  Ok(Json(detail))
}

/// `PATCH /consultants/:id`
pub async fn update<S: ResourceStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  form: Result<Json<ConsultantPatchForm>, JsonRejection>,
) -> Result<Json<Consultant>, ApiError> {
  let Json(form) = form?;
  let consultant = workflow::update_consultant(store.as_ref(), id, &form)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("consultant {id} not found")))?;
  Ok(Json(consultant))
}
