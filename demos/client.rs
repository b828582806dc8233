// Example client counting 3x3 contingency tables through the gRPC service
//
// Start the server first:
//   cargo run --features server --bin unicount-server -- 3x3
//
// The target is the row sums followed by the column sums. Tables with margins
// (r1, r2, r3 | c1, c2, c3) are counted without enumerating them.

use tonic::Request;

pub mod lattice_count {
    tonic::include_proto!("lattice_count");
}

use lattice_count::{lattice_counter_client::LatticeCounterClient, CountRequest, Empty};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Connect to the gRPC server
    let mut client = LatticeCounterClient::connect("http://127.0.0.1:50052").await?;

    let info = client.describe_counter(Request::new(Empty {})).await?.into_inner();
    println!("=== {} ===", info.problem_name);
    println!(
        "Matrix: {} rows x {} columns, {} zero/one right-hand sides in {} parity groups\n",
        info.num_rows, info.num_cols, info.zero_one_entries, info.parity_groups
    );

    let targets: Vec<Vec<i64>> = vec![
        vec![1, 1, 1, 1, 1, 1],
        vec![2, 2, 2, 2, 2, 2],
        vec![10, 10, 10, 10, 10, 10],
        vec![1000, 2000, 3000, 2500, 2500, 1000],
        vec![1, 1, 1, 5, 0, 0],
    ];

    for target in targets {
        let response = client
            .count_solutions(Request::new(CountRequest { target }))
            .await?
            .into_inner();

        println!("margins {:?}", response.target);
        println!("  count: {}", response.count);
        if let Some(stats) = response.statistics {
            println!(
                "  evaluations: {}, cache hits: {}, time: {:.2} ms",
                stats.evaluations, stats.cache_hits, stats.solve_time_ms
            );
        }
    }

    // Negative entries are rejected before any work is done
    match client
        .count_solutions(Request::new(CountRequest {
            target: vec![-1, 0, 0, 0, 0, 0],
        }))
        .await
    {
        Ok(_) => println!("\nunexpected success"),
        Err(status) => println!("\nrejected: {}", status.message()),
    }

    Ok(())
}
