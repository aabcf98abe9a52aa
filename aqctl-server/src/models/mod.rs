//! Domain models with validation at construction
//!
//! Request input is validated when these types are built.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod record;
pub mod pagination;

pub use validation::ValidationError;
pub use record::{AqKey, AqRecord};
pub use pagination::{ListParams, ListQuery};
