//! Recording adapter for the `CatalogSource` port.

use std::sync::{Arc, Mutex};

use serde_json::json;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::catalog::{CatalogFuture, CatalogSource};

/// Records catalog fetches while delegating to an inner implementation.
pub struct RecordingCatalogSource {
    inner: Box<dyn CatalogSource>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingCatalogSource {
    /// Creates a new recording catalog source wrapping the given implementation.
    pub fn new(inner: Box<dyn CatalogSource>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl CatalogSource for RecordingCatalogSource {
    fn fetch(&self, username: &str) -> CatalogFuture<'_> {
        let input = json!({ "username": username });
        let username = username.to_string();

        Box::pin(async move {
            let result = self.inner.fetch(&username).await;
            record_result(&self.recorder, "catalog", "fetch", &input, &result);
            result
        })
    }
}
