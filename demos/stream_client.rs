// Example: counting a family of related targets over one streamed session
//
// All targets in a CountBatch call share one memoization cache on the server, so
// later targets reuse sub-counts computed for earlier ones.

use tokio_stream as stream;
use tonic::Request;

pub mod lattice_count {
    tonic::include_proto!("lattice_count");
}

use lattice_count::{lattice_counter_client::LatticeCounterClient, CountRequest, Empty};

const MAX_MARGIN: i64 = 64;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut client = LatticeCounterClient::connect("http://127.0.0.1:50052").await?;

    let checkers = client
        .get_available_checkers(Request::new(Empty {}))
        .await?
        .into_inner()
        .checkers;
    println!("Validity checkers available: {}", checkers.join(", "));

    let info = client.describe_counter(Request::new(Empty {})).await?.into_inner();
    let dim = info.num_rows as usize;
    println!("Counting uniform margins 1..={} for {}\n", MAX_MARGIN, info.problem_name);

    // Uniform margins (k, ..., k) are consistent for square tables
    let requests: Vec<CountRequest> = (1..=MAX_MARGIN)
        .map(|k| CountRequest {
            target: vec![k; dim],
        })
        .collect();

    let response = client
        .count_batch(Request::new(stream::iter(requests)))
        .await?
        .into_inner();

    for result in &response.results {
        let hits = result.statistics.as_ref().map(|s| s.cache_hits).unwrap_or(0);
        println!("{:>4}  {:>40}  (cache hits {})", result.target[0], result.count, hits);
    }
    println!("\nShared cache entries: {}", response.cache_entries);

    Ok(())
}
