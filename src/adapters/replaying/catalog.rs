//! Replaying adapter for the `CatalogSource` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::CatalogError;
use crate::ports::catalog::{CatalogFuture, CatalogSource};

/// Serves recorded catalog documents from a cassette.
pub struct ReplayingCatalogSource {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingCatalogSource {
    /// Create a replaying catalog source backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl CatalogSource for ReplayingCatalogSource {
    fn fetch(&self, _username: &str) -> CatalogFuture<'_> {
        let result = next_output(&self.replayer, "catalog", "fetch")
            .and_then(replay_result::<serde_json::Value>)
            .map_err(CatalogError::Fetch)
            .and_then(|recorded| recorded.map_err(CatalogError::Fetch));
        Box::pin(async move { result })
    }
}
