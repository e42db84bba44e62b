use std::sync::Arc;

use eyre::WrapErr;
use tracing_subscriber::EnvFilter;

use healthpro_export::pdf::ChromiumRenderer;
use healthpro_export::pipeline::ReportPipeline;
use healthpro_registry::Registry;
use healthpro_server::config::ServerConfig;
use healthpro_server::state::AppState;
use healthpro_storage::artifacts::ArtifactStore;
use healthpro_storage::records::JsonRecordStore;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let config = ServerConfig::from_env()?;

    let registry = match &config.definitions_path {
        Some(path) => Registry::from_path(path)?,
        None => Registry::builtin()?,
    };
    tracing::info!(definitions = registry.len(), "report registry ready");

    let records = JsonRecordStore::load(&config.records_path)
        .wrap_err_with(|| format!("loading records from {}", config.records_path.display()))?;

    let pipeline = ReportPipeline::new(
        ArtifactStore::new(&config.output_dir),
        Arc::new(ChromiumRenderer::new(&config.chromium_path)),
        config.page.clone(),
        config.naming,
    );

    let state = AppState {
        records: Arc::new(records),
        registry: Arc::new(registry),
        pipeline: Arc::new(pipeline),
    };
    let app = healthpro_server::service(state, config.frontend_url.as_deref());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .wrap_err_with(|| format!("binding {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
    }
}
