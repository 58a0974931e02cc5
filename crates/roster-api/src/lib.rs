//! JSON API for Roster.
//!
//! Exposes an axum [`Router`] backed by any [`ResourceStore`]. Every handler
//! hands raw form input to `roster-core` and serialises what comes back;
//! there is no logic of its own here. Auth and TLS are the caller's concern.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", roster_api::api_router(store.clone()))
//! ```

pub mod clients;
pub mod consultants;
pub mod contracts;
pub mod error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use roster_core::store::ResourceStore;
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Which [`ResourceStore`] the server runs on.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
  #[default]
  Memory,
  Sqlite,
}

/// Runtime server configuration, deserialised from `config.toml` and
/// `ROSTER_*` environment variables.
#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default)]
  pub backend:    Backend,
  /// SQLite database file; ignored by the memory backend.
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
  /// Simulated I/O delay of the memory backend.
  #[serde(default = "default_latency_ms")]
  pub latency_ms: u64,
  /// Load the demo dataset into the memory backend.
  #[serde(default = "default_seed")]
  pub seed:       bool,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }
fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/roster/roster.db") }
fn default_latency_ms() -> u64 { 300 }
fn default_seed() -> bool { true }

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ResourceStore + 'static,
{
  Router::new()
    // Clients
    .route("/clients", get(clients::list::<S>).post(clients::create::<S>))
    .route("/clients/{id}", get(clients::get_one::<S>).patch(clients::update::<S>))
    .route("/clients/{id}/consultants", get(clients::consultants::<S>))
    .route("/clients/{id}/roster", get(clients::roster::<S>))
    .route("/clients/{id}/available-consultants", get(clients::available::<S>))
    .route("/clients/{id}/assignments", post(clients::assign::<S>))
    // Consultants
    .route("/consultants", get(consultants::list::<S>).post(consultants::create::<S>))
    .route(
      "/consultants/{id}",
      get(consultants::get_one::<S>).patch(consultants::update::<S>),
    )
    // Contracts
    .route("/contracts", get(contracts::list::<S>))
    .route("/consultant-contracts", get(contracts::list_assignments::<S>))
    .route(
      "/consultant-contracts/{id}",
      axum::routing::patch(contracts::amend::<S>),
    )
    .with_state(store)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
