mod config;
mod routes;

use config::{ConfigError, ServerConfig};

/// Startup failures surfaced from `main`.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("leptos configuration: {0}")]
    Leptos(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env()?;
    let options = routes::leptos_options(&config)?;
    let app = routes::app(options);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(port = config.port, "bms console listening");
    axum::serve(listener, app).await?;
    Ok(())
}
