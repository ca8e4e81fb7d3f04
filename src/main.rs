use std::{sync::Arc, time::Duration};

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tracing::{debug, info};

use web_agent_interface::{config::Config, routes, state::AppState};

const PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env().context("failed to load configuration")?;
    if config.auth_header.is_empty() {
        info!("AUTH_HEADER is not set; webhook calls go out without credentials");
    }

    let state = Arc::new(AppState::new(&config));

    let sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(PURGE_INTERVAL);
        loop {
            ticker.tick().await;
            let removed = sessions.purge_expired().await;
            if removed > 0 {
                let remaining = sessions.len().await;
                debug!(removed, remaining, "purged idle sessions");
            }
        }
    });

    let app = routes::create_router()
        .with_state(state)
        .layer(CorsLayer::very_permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!(
        webhook = %config.webhook_url,
        "🤖 Web Agent Interface running at http://{}",
        config.bind_addr
    );
    axum::serve(listener, app).await?;
    Ok(())
}
