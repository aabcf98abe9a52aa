//! aqctl-server: HTTP CRUD service for AQ sample records
//!
//! Maps HTTP query parameters and bodies onto parameterized SQL against the
//! `mgl.aq` table, and maps result rows (with nullable columns) back onto
//! [`models::AqRecord`]. Bodies travel as JSON or MessagePack.

pub mod db;
pub mod http;
pub mod models;

pub use db::{AqStore, MemoryAqStore, PgAqStore, StoreError};
pub use http::{build_router, run_server, AppState, ServerConfig};
pub use models::AqRecord;
