//! Shared service plumbing: health endpoints, request-id middleware,
//! gateway identity extraction, serde helpers, and tracing bootstrap.

pub mod health;
pub mod identity;
pub mod middleware;
pub mod serde;
pub mod tracing;
