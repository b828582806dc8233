// Domain layer: models, value objects and service seams
pub mod domain;

// Counting core: zero/one tables, parity index and the even/odd recursion
pub mod counting;

// Concrete counting problems and their normal forms
pub mod problems;

// Solver adapters: concrete implementations of MatrixValidityChecker
pub mod solver;

// Application layer: gRPC service orchestration
#[cfg(feature = "server")]
pub mod application;

// Infrastructure layer: External concerns (gRPC, server)
#[cfg(feature = "server")]
pub mod infrastructure;

// Re-export commonly used types
pub use domain::{
    CheckerBackend, CountError, CountReport, CountStatistics, CounterConfig, CountingProblem,
    IdentityNormalizer, IntVec, Matrix, MatrixValidityChecker, Normalizer, Result,
    ZeroOneStrategy,
};

pub use counting::{
    debug_brute_force, divide_and_conquer_counts, zero_one_counts, Counter, MemoCache,
    ParityIndex, ZeroOneTable,
};

pub use solver::{CheckerFactory, MicroLpChecker};

#[cfg(feature = "server")]
pub use application::GrpcCountingService;

#[cfg(feature = "server")]
pub use infrastructure::{start_server, ServerConfig};
