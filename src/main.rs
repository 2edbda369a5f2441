use campusbyte::router::init_router;
use campusbyte::state::init_app_state;
use campusbyte_config::ServerConfig;
use campusbyte_observability::{init_metrics, init_tracing, metrics_app, shutdown_tracer};
use dotenvy::dotenv;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let result = run().await;
    if let Err(e) = &result {
        tracing::error!(error = ?e, "Server stopped with an error");
    }

    shutdown_tracer().await;
    result
}

async fn run() -> anyhow::Result<()> {
    let metrics_handle = init_metrics();
    let state = init_app_state().await?;

    let mut app = init_router(state);
    if let Some(handle) = metrics_handle {
        app = app.merge(metrics_app(handle));
    }

    let server = ServerConfig::from_env();
    let address = server.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    tracing::info!(address = %address, "Server running");
    tracing::info!("Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
