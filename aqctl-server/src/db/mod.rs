//! Storage layer - connection pool, SQL mapping and store backends
//!
//! # Design Principles
//!
//! - Handlers get an explicit `AqStore`, never a global pool
//! - One column list drives INSERT, UPDATE and binding
//! - Rely on the primary key constraint, no check-then-insert
//! - Not-found is its own outcome, distinct from decode/storage errors

pub mod pool;
pub mod sql;
pub mod store;
pub mod postgres;
pub mod memory;

pub use pool::{create_pool, create_pool_with_options};
pub use store::{AqStore, StoreError};
pub use postgres::PgAqStore;
pub use memory::MemoryAqStore;
