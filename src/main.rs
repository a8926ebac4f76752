use std::sync::Arc;

use movie_directory_api::{
    config::Config,
    routes::{cors_layer, create_router, AppState},
    services::providers::{OpenAiClient, TmdbProvider},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_directory_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Clients are built once and shared by every request
    let provider = Arc::new(TmdbProvider::from_config(&config)?);
    let completion = Arc::new(OpenAiClient::from_config(&config)?);
    let state = Arc::new(AppState::from_config(&config, provider, completion));

    let app = create_router(state).layer(cors_layer(&config.cors_origins));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(
        address = %address,
        model = %config.openai_model,
        timeout_secs = config.upstream_timeout_secs,
        "Server listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
