use anyhow::{Context, Result};
use fitness_coach::api::{create_routes, AppState};
use fitness_coach::config::AppConfig;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let state = AppState::in_memory(&config)?;

    if config.seed_demo_data {
        state.seeder().seed_all().await?;
    }

    if state.dispatcher.uses_remote() {
        info!(model = %config.ai.model, "Chat completions enabled");
    } else {
        info!("No completion credential configured, chat uses keyword replies");
    }

    let app = create_routes(state, &config);

    let address = config.server_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!(environment = %config.environment, "Fitness coach server starting on http://{}", address);
    info!("Health check available at http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}
