//! Adapter implementations
//!
//! Adapters implement the document store port with concrete backends:
//! - In-memory store for tests and demos
//! - Local directory store for filesystem-backed accounts
//! - HTTP client for a remote blob store

pub mod http;
pub mod localdir;
pub mod memory;

#[cfg(test)]
pub mod http_mock;

pub use http::HttpStore;
pub use localdir::LocalDirStore;
pub use memory::MemoryStore;
