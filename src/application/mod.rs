// Application layer: gRPC service over the counting core

pub mod grpc_service;
pub mod mappers;

pub use grpc_service::GrpcCountingService;
