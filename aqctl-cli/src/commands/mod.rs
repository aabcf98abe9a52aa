//! Command implementations for aqctl CLI

pub mod serve;

pub use serve::run_serve;
