//! Catalog port for fetching the platform tracker document.

use std::future::Future;
use std::pin::Pin;

use crate::error::CatalogError;

/// Boxed future type alias used by [`CatalogSource`] to keep the trait dyn-compatible.
pub type CatalogFuture<'a> =
    Pin<Box<dyn Future<Output = Result<serde_json::Value, CatalogError>> + Send + 'a>>;

/// Fetches the raw platform catalog for a share user.
///
/// The document is returned undecoded so adapters can record it verbatim;
/// [`parse_catalog`](crate::platform::parse_catalog) turns it into platforms.
pub trait CatalogSource: Send + Sync {
    /// Fetches the catalog published under `username`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be retrieved or is not JSON.
    fn fetch(&self, username: &str) -> CatalogFuture<'_>;
}
