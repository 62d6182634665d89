//! Diagram editor backend for cloud architecture documents.
//!
//! A document holds typed resource collections; artifacts turn those
//! records into sized, positioned drawing instructions; the property
//! sheet edits records in place; the query service pulls real resources
//! from a backend and merges them in.

pub mod api;
pub mod artifacts;
pub mod canvas;
pub mod config;
pub mod document;
pub mod error;
pub mod handlers;
pub mod models;
pub mod properties;
pub mod routes;
pub mod services;
pub mod templates;
pub mod utils;
