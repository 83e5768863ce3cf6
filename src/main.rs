use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use encontro_api::{
    config::Config,
    routes::{create_router, AppState},
    services::completion::PerplexityClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let completion_client = Arc::new(PerplexityClient::from_config(&config)?);
    let state = AppState::new(completion_client);

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
