use anyhow::Context;
use tracing_subscriber::EnvFilter;

use wetro_playground::config::config;
use wetro_playground::routes::app;
use wetro_playground::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up WETRO_API_URL, API_DASHBOARD_URL, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("wetro_playground=info,tower_http=info")),
        )
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config();
    tracing::info!("Starting Wetrocloud Playground in {:?} mode", config.environment);
    if wetro_playground::is_production!() && !config.security.strict_key_length {
        tracing::warn!("SECURITY_STRICT_KEY_LENGTH is off in production; only the wtc- prefix is checked");
    }

    let state = AppState::from_config(config.clone()).context("failed to build HTTP clients")?;
    let app = app(state);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Playground listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server")?;
    Ok(())
}
