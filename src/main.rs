use aintar::router::init_router;
use aintar::state::init_app_state;
use aintar_config::LoggingConfig;
use aintar_observability::init_logging;
use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Keep the guard alive so buffered file logs are flushed on exit.
    let _log_guard = init_logging(&LoggingConfig::from_env())?;

    let state = init_app_state()?;
    let address = state.server_config.bind_address();
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!(address = %address, "Server running");
    info!("Swagger UI available at http://{}/swagger-ui", address);
    info!("Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
