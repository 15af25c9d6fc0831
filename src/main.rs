mod config;
mod error;
mod handlers;
mod language;
mod page;
mod routes;
mod state;
mod translate;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::{Config, SystemConfig};
use state::AppState;

fn load_config() -> Result<Config> {
    match Config::load_first_existing(&Config::search_paths())? {
        Some((path, config)) => {
            info!("Loaded configuration from: {}", path.display());
            Ok(config)
        }
        None => {
            warn!("No configuration file found, using defaults");
            Ok(Config::from_env())
        }
    }
}

/// Bind the configured address; `host` may be a name such as `localhost`.
async fn bind_listener(system_config: &SystemConfig) -> Result<tokio::net::TcpListener> {
    let host = system_config.host.as_str();
    let port = system_config.port;
    tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("language_translator=debug,tower_http=debug")),
        )
        .init();

    let config = load_config()?;
    let listener = bind_listener(&config.system_config).await?;

    let app_state = AppState::new(config);
    let app = routes::create_app(app_state);

    info!("Starting server on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
