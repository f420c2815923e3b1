// Infrastructure: Server setup and configuration
// Single Responsibility: Manage server lifecycle and configuration

use std::net::SocketAddr;
use std::sync::Arc;
use tonic::transport::Server;
use tracing::info;

use crate::application::mappers::sat_solver::sat_solver_server::SatSolverServer;
use crate::application::GrpcSatSolverService;
use crate::solver::SolverRegistry;

/// Environment variable overriding the listen address
pub const ADDRESS_ENV: &str = "LETSAT_ADDRESS";
pub const DEFAULT_ADDRESS: &str = "0.0.0.0:50051";

pub struct ServerConfig {
    pub address: SocketAddr,
    pub registry: Arc<SolverRegistry>,
}

impl ServerConfig {
    pub fn new(address: SocketAddr, registry: Arc<SolverRegistry>) -> Self {
        Self { address, registry }
    }

    /// Address from `LETSAT_ADDRESS`, falling back to the default port
    pub fn address_from_env() -> Result<SocketAddr, std::net::AddrParseError> {
        std::env::var(ADDRESS_ENV)
            .ok()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ADDRESS.to_string())
            .trim()
            .parse()
    }
}

pub async fn start_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    print_banner(&config.address, &config.registry);

    let service = GrpcSatSolverService::new(config.registry);

    info!(address = %config.address, "starting SAT solver server");

    Server::builder()
        .add_service(SatSolverServer::new(service))
        .serve(config.address)
        .await?;

    Ok(())
}

fn print_banner(address: &SocketAddr, registry: &SolverRegistry) {
    println!("\n============================================================");
    println!("  LetSat - SAT Solving Service");
    println!("  Listening on: {}", address);
    println!("------------------------------------------------------------");
    println!("  Backends:");
    for entry in registry.entries() {
        if entry.is_available() {
            println!("    [x] {}", entry.name());
        } else {
            println!(
                "    [ ] {} ({})",
                entry.name(),
                entry.unavailable_reason().unwrap_or("unavailable")
            );
        }
    }
    println!("============================================================\n");
}
