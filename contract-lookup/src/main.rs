use contract_lookup::config::get_configuration;
use contract_lookup::services::metrics::init_metrics;
use contract_lookup::startup::build_router;
use contract_lookup::AppState;
use dotenvy::dotenv;
use service_core::observability::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "contract-lookup",
        &configuration.telemetry.log_level,
        configuration.telemetry.otlp_endpoint.as_deref(),
    )?;

    init_metrics()?;

    let state = AppState::from_settings(&configuration);
    let app = build_router(state, &configuration.server);

    let address = format!(
        "{}:{}",
        configuration.server.host, configuration.server.port
    );
    let listener = tokio::net::TcpListener::bind(&address).await.map_err(|e| {
        tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
        anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
    })?;

    info!(
        demo_by_default = configuration.demo.enabled_by_default,
        "Starting contract-lookup on {}", address
    );
    axum::serve(listener, app).await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
