use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deadline_sync::config::Config;
use deadline_sync::monday::MondayClient;
use deadline_sync::server::{AppState, build_router};
use deadline_sync::sync::SyncEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deadline_sync=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let client = MondayClient::new(&config.api_url, &config.api_key);
    let engine = SyncEngine::new(Arc::new(client), config.columns.clone());
    let app_state = AppState::new(engine, config.webhook_secret.clone());

    let app = build_router(app_state);

    tracing::info!(
        endpoint = %config.api_url,
        signature_enforced = config.webhook_secret.is_some(),
        "listening on {}",
        config.listen_addr
    );

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
