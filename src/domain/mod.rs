// Domain module: counting models, value objects and the service seams

pub mod counting_service;
pub mod models;
pub mod value_objects;

pub use counting_service::*;
pub use models::*;
pub use value_objects::*;
