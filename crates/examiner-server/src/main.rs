use actix_web::{web, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use examiner_server::{api, AppState, ServerConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::parse();
    let state = AppState::from_config(&config).context("Failed to build application state")?;
    let bind_addr = config.bind_addr();

    tracing::info!(
        host = %bind_addr.0,
        port = bind_addr.1,
        oracle_configured = state.orchestrator.is_configured(),
        "Starting answer examiner server"
    );

    let data = web::Data::new(state);

    HttpServer::new(move || App::new().app_data(data.clone()).configure(api::configure))
        .bind(bind_addr.clone())
        .with_context(|| format!("Failed to bind {}:{}", bind_addr.0, bind_addr.1))?
        .run()
        .await
        .context("Server terminated with an error")
}
