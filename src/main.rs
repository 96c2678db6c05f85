use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use safari_estimator::{app, config::Config, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("safari_estimator=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let config = Config::from_env()?;
    let state = AppState::from_config(&config).context("Failed to build exchange rate client")?;

    info!(
        "Exchange rates from {} (timeout {:?}, cached for {:?})",
        config.rates_url, config.rates_timeout, config.rates_ttl
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Safari estimator listening on {}", config.bind_addr);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
