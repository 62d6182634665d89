// Atomic API modules
pub mod client;
pub mod instances;

// Re-export commonly used functions
pub use client::{api_call, set_silent};
pub use instances::{query_instances, InstanceQuery, INSTANCE_ARTIFACTS_ENDPOINT};
