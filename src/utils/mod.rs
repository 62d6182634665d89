// JSON utilities
pub mod json_converter;

// Identifier generation
pub mod id;

// Re-export all utilities for convenient access
pub use json_converter::{optional_string_or_number, string_or_number, value_to_short_string};
pub use id::{generate_artifact_id, safe_id};
