use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use grc_core::config::GrcConfig;
use grc_core::events::EventDispatcher;
use grc_core::tracing_setup::init_tracing;
use grc_register::{AuditLogHandler, RiskRegister};
use grc_server::cli::{Cli, Command};
use grc_server::create_router;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = GrcConfig::load(cli.config.as_deref(), Some(&cli.overrides()))
        .context("failed to load configuration")?;

    if cli.command() == Command::ShowConfig {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    init_tracing(&config.logging);

    let storage = grc_storage::open_backend(&config.storage).context("failed to open storage")?;

    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(AuditLogHandler));
    let register = Arc::new(RiskRegister::from_config(
        storage,
        Arc::new(dispatcher),
        &config,
    ));

    let app = create_router(register);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, backend = %config.storage.effective_backend(), "risk register listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
    }
}
