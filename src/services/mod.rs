pub mod query_service;

pub use query_service::{run_instance_query, spawn_instance_query, QueryProgress, INSTANCE_QUERY_CB};
