use anyhow::Context;
use campusgate::logging::init_tracing;
use campusgate::metrics::{init_metrics, metrics_app};
use campusgate::router::init_router;
use campusgate::state::init_app_state;
use campusgate_config::{DatabaseConfig, ObservabilityConfig, ServerConfig};
use dotenvy::dotenv;

#[tokio::main]
async fn main() {
    dotenv().ok();

    if let Err(e) = run().await {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let observability = ObservabilityConfig::from_env();
    init_tracing(&observability).context("Failed to initialize tracing")?;

    let server = ServerConfig::from_env();
    let database = DatabaseConfig::from_env()?;

    let state = init_app_state(&database).await?;
    campusgate_db::run_migrations(&state.db).await?;

    if let Some(handle) = init_metrics(&observability)? {
        let metrics_addr = server.metrics_addr()?;
        let listener = tokio::net::TcpListener::bind(metrics_addr)
            .await
            .with_context(|| format!("Failed to bind metrics listener on {}", metrics_addr))?;
        tracing::info!("📈 Metrics available at http://{}/metrics", metrics_addr);
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                tracing::error!(error = %e, "Metrics server stopped");
            }
        });
    }

    let app = init_router(state);

    let addr = server.addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("🚀 Server running on http://{}", addr);
    tracing::info!("📚 Swagger UI available at http://{}/swagger-ui", addr);
    tracing::info!("📖 Scalar UI available at http://{}/scalar", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
