use std::sync::Arc;
use std::time::Instant;

use tonic::{Request, Response, Status};
use tracing::info;

use super::mappers::{self, lattice_count};
use crate::counting::{Counter, MemoCache};
use crate::domain::models::{CountReport, CountStatistics};
use crate::solver::CheckerFactory;

/// gRPC service implementation
///
/// The counter (matrix and parity index) is shared read-only between requests;
/// each request owns its memoization cache.
pub struct GrpcCountingService {
    counter: Arc<Counter>,
}

impl GrpcCountingService {
    pub fn new(counter: Arc<Counter>) -> Self {
        Self { counter }
    }
}

#[tonic::async_trait]
impl lattice_count::lattice_counter_server::LatticeCounter for GrpcCountingService {
    async fn count_solutions(
        &self,
        request: Request<lattice_count::CountRequest>,
    ) -> Result<Response<lattice_count::CountResult>, Status> {
        let target = mappers::proto_to_target(request.get_ref());
        info!(rhs = %target, "counting solutions");

        let counter = Arc::clone(&self.counter);
        let query = target.clone();
        let report = tokio::task::spawn_blocking(move || counter.count_report(&query))
            .await
            .map_err(|e| Status::internal(format!("Counting task failed: {}", e)))?
            .map_err(mappers::count_error_to_status)?;

        info!(rhs = %target, count = %report.count, "counted");

        Ok(Response::new(mappers::domain_to_proto_result(target, &report)))
    }

    async fn count_batch(
        &self,
        request: Request<tonic::Streaming<lattice_count::CountRequest>>,
    ) -> Result<Response<lattice_count::BatchResult>, Status> {
        let mut stream = request.into_inner();

        // Collect all targets
        let mut targets = Vec::new();
        while let Some(chunk) = stream.message().await? {
            targets.push(mappers::proto_to_target(&chunk));
        }

        info!(targets = targets.len(), "counting batch with a shared cache");

        let counter = Arc::clone(&self.counter);
        let (results, cache_entries) = tokio::task::spawn_blocking(move || {
            let mut cache = MemoCache::new();
            let mut results = Vec::with_capacity(targets.len());
            for target in targets {
                let start_time = Instant::now();
                let hits_before = cache.hits();
                let evaluations_before = cache.evaluations();
                let count = counter.count_with_cache(&target, &mut cache)?;
                let report = CountReport {
                    count,
                    statistics: CountStatistics {
                        evaluations: cache.evaluations() - evaluations_before,
                        cache_hits: cache.hits() - hits_before,
                        cache_entries: cache.len(),
                        solve_time_ms: start_time.elapsed().as_secs_f64() * 1000.0,
                    },
                };
                results.push(mappers::domain_to_proto_result(target, &report));
            }
            Ok::<_, crate::domain::CountError>((results, cache.len()))
        })
        .await
        .map_err(|e| Status::internal(format!("Counting task failed: {}", e)))?
        .map_err(mappers::count_error_to_status)?;

        Ok(Response::new(lattice_count::BatchResult {
            results,
            cache_entries: cache_entries as u64,
        }))
    }

    async fn describe_counter(
        &self,
        _request: Request<lattice_count::Empty>,
    ) -> Result<Response<lattice_count::CounterInfo>, Status> {
        Ok(Response::new(mappers::domain_to_proto_info(&self.counter)))
    }

    async fn get_available_checkers(
        &self,
        _request: Request<lattice_count::Empty>,
    ) -> Result<Response<lattice_count::AvailableCheckers>, Status> {
        let checkers = CheckerFactory::available_backends()
            .into_iter()
            .map(|backend| backend.to_string())
            .collect();

        Ok(Response::new(lattice_count::AvailableCheckers { checkers }))
    }
}
