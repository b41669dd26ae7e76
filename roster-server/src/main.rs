use roster_server::cache::{CacheConfig, CachedAirportResolver};
use roster_server::config::ServerConfig;
use roster_server::web::{AppState, create_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("roster_server=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    // Snapshot, then HTTP API, then no resolution at all
    let backend = config.build_backend()?;
    info!(backend = backend.name(), "airport backend ready");

    let resolver = CachedAirportResolver::new(backend, &CacheConfig::default());
    let state = AppState::new(resolver, config.resolve_timeout);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "roster server listening");
    info!("  GET  /health          - Health check");
    info!("  POST /roster/parse    - Parse roster text (?format=strict|generic|auto)");
    info!("  GET  /airports/:iata  - Look up an airport");

    axum::serve(listener, app).await?;
    Ok(())
}
