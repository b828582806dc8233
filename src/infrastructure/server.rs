// Infrastructure: gRPC server for a prebuilt counter

use std::net::SocketAddr;
use std::sync::Arc;
use tonic::transport::Server;
use tracing::info;

use crate::application::mappers::lattice_count::lattice_counter_server::LatticeCounterServer;
use crate::application::GrpcCountingService;
use crate::counting::Counter;

pub struct ServerConfig {
    pub address: SocketAddr,
    pub counter: Arc<Counter>,
}

impl ServerConfig {
    pub fn new(address: SocketAddr, counter: Arc<Counter>) -> Self {
        Self { address, counter }
    }
}

pub async fn start_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    log_banner(&config);

    let service = GrpcCountingService::new(config.counter);

    Server::builder()
        .add_service(LatticeCounterServer::new(service))
        .serve(config.address)
        .await?;

    Ok(())
}

fn log_banner(config: &ServerConfig) {
    let counter = &config.counter;
    info!(
        address = %config.address,
        problem = %counter.problem().name,
        rows = counter.matrix().num_rows(),
        columns = counter.matrix().num_cols(),
        strategy = %counter.strategy(),
        "unicount server listening"
    );
}
