use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use unicount::{problems, start_server, Counter, CounterConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Parse address
    let address = std::env::var("UNICOUNT_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:50052".to_string())
        .parse()?;

    // Table shape, e.g. `unicount-server 3x4`
    let shape = std::env::args().nth(1).unwrap_or_else(|| "3x3".to_string());
    let (rows, cols) = parse_shape(&shape)?;

    // Build the counter once; it is shared by every request
    let problem = problems::contingency_table(rows, cols)?;
    let counter = Arc::new(Counter::new(problem, CounterConfig::default())?);

    // Configure and start server
    let config = ServerConfig::new(address, counter);
    start_server(config).await?;

    Ok(())
}

fn parse_shape(shape: &str) -> Result<(usize, usize), Box<dyn std::error::Error>> {
    let (rows, cols) = shape
        .split_once('x')
        .ok_or_else(|| format!("Table shape must look like RxC, got '{}'", shape))?;
    Ok((rows.trim().parse()?, cols.trim().parse()?))
}
