// Mappers: Convert between gRPC protobuf types and domain models
// Keeps protobuf types out of the counting core

use crate::counting::Counter;
use crate::domain::{
    counting_service::CountError,
    models::{CountReport, CountStatistics},
    value_objects::IntVec,
};
use tonic::Status;

pub mod lattice_count {
    tonic::include_proto!("lattice_count");
}

use lattice_count as proto;

/// Convert a protobuf request into a target vector
pub fn proto_to_target(request: &proto::CountRequest) -> IntVec {
    IntVec::new(request.target.clone())
}

/// Map counting errors onto gRPC status codes
pub fn count_error_to_status(error: CountError) -> Status {
    match error {
        CountError::InvalidInput(_) => Status::invalid_argument(error.to_string()),
        CountError::PreconditionViolated(_) => Status::failed_precondition(error.to_string()),
        _ => Status::internal(error.to_string()),
    }
}

pub fn domain_to_proto_statistics(statistics: &CountStatistics) -> proto::CountStatistics {
    proto::CountStatistics {
        evaluations: statistics.evaluations,
        cache_hits: statistics.cache_hits,
        cache_entries: statistics.cache_entries as u64,
        solve_time_ms: statistics.solve_time_ms,
    }
}

/// Convert a domain report into a protobuf CountResult
pub fn domain_to_proto_result(target: IntVec, report: &CountReport) -> proto::CountResult {
    proto::CountResult {
        target: target.into_inner(),
        count: report.count.to_string(),
        statistics: Some(domain_to_proto_statistics(&report.statistics)),
    }
}

/// Describe a built counter
pub fn domain_to_proto_info(counter: &Counter) -> proto::CounterInfo {
    let index = counter.parity_index();
    proto::CounterInfo {
        problem_name: counter.problem().name.clone(),
        num_rows: counter.matrix().num_rows() as u32,
        num_cols: counter.matrix().num_cols() as u32,
        strategy: counter.strategy().to_string(),
        parity_groups: index.num_groups() as u32,
        zero_one_entries: index.num_entries() as u32,
    }
}
