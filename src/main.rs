use letsat::{start_server, BackendConfig, ServerConfig, SolverRegistry};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Parse address
    let address = ServerConfig::address_from_env()?;

    // Discover backends; a missing mandatory dependency aborts here
    let registry = Arc::new(SolverRegistry::with_defaults(BackendConfig::from_env())?);

    // Configure and start server
    let config = ServerConfig::new(address, registry);
    start_server(config).await?;

    Ok(())
}
