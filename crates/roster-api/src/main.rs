//! roster-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) layered with
//! `ROSTER_*` environment variables, opens the configured store, and serves
//! the JSON API over HTTP.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use anyhow::Context as _;
use clap::Parser;
use roster_api::{Backend, ServerConfig};
use roster_core::store::ResourceStore;
use roster_store_memory::MemoryStore;
use roster_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Roster consultant assignment server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("ROSTER"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  match server_cfg.backend {
    Backend::Memory => {
      let store = if server_cfg.seed { MemoryStore::seeded() } else { MemoryStore::new() };
      let store = store.with_latency(Duration::from_millis(server_cfg.latency_ms));
      tracing::info!(
        latency_ms = server_cfg.latency_ms,
        seed = server_cfg.seed,
        "using in-memory store"
      );
      serve(store, &server_cfg).await
    }
    Backend::Sqlite => {
      let store_path = expand_tilde(&server_cfg.store_path);
      if let Some(parent) = store_path.parent()
        && !parent.as_os_str().is_empty()
      {
        std::fs::create_dir_all(parent)
          .with_context(|| format!("failed to create {parent:?}"))?;
      }
      let store = SqliteStore::open(&store_path)
        .await
        .with_context(|| format!("failed to open store at {store_path:?}"))?;
      serve(store, &server_cfg).await
    }
  }
}

async fn serve<S>(store: S, cfg: &ServerConfig) -> anyhow::Result<()>
where
  S: ResourceStore + 'static,
{
  let app = roster_api::api_router(Arc::new(store)).layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", cfg.host, cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
