//! Live adapters for real external interactions.

pub mod catalog;

pub use catalog::LiveCatalogSource;
