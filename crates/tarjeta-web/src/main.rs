//! tarjeta-web server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), creates the
//! storage directories, and serves the card application over HTTP.

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context as _;
use clap::Parser;
use tarjeta_store_fs::{FsStore, StorageLayout};
use tarjeta_web::{AppState, ServerConfig};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Timeout for best-effort remote photo fetches.
const PHOTO_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Parser)]
#[command(author, version, about = "tarjeta card server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("TARJETA"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Create storage directories once; the paths are read-only afterwards.
  let layout = StorageLayout {
    data_dir:   server_cfg.data_dir.clone(),
    photos_dir: server_cfg.photos_dir.clone(),
    qrs_dir:    server_cfg.qrs_dir.clone(),
  };
  let store = FsStore::open(layout)
    .await
    .context("failed to create storage directories")?;

  let http = reqwest::Client::builder()
    .timeout(PHOTO_FETCH_TIMEOUT)
    .build()
    .context("failed to build http client")?;

  let state = AppState {
    store: Arc::new(store),
    config: Arc::new(server_cfg.clone()),
    http,
  };

  let app = tarjeta_web::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
