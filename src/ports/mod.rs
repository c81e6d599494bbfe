//! Port traits defining external boundaries.
//!
//! The resolution core performs no I/O; the platform catalog reaches it
//! through [`CatalogSource`]. Implementations live in `src/adapters/`.

pub mod catalog;

pub use catalog::{CatalogFuture, CatalogSource};
