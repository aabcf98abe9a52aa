//! HTTP server layer
//!
//! Axum server with:
//! - Permissive CORS
//! - Request tracing and per-request deadline
//! - Graceful shutdown
//! - JSON or MessagePack bodies, JSON error responses

pub mod server;
pub mod error;
pub mod codec;
pub mod extractors;
pub mod routes;

pub use server::{build_router, run_server, AppState, ServeError, ServerConfig};
pub use error::ApiError;
pub use codec::WireFormat;
