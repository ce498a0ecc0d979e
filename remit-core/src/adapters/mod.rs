//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - A JSON document on the local filesystem for the AccountRepository port
//! - An in-memory document for embedding and tests

pub mod json_file;
pub mod memory;
