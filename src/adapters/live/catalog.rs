//! Live adapter for the `CatalogSource` port using a WebDAV share.

use reqwest::Client;

use crate::error::CatalogError;
use crate::ports::catalog::{CatalogFuture, CatalogSource};

/// Default root of the OEM share.
pub const DEFAULT_SHARE_URL: &str = "https://oem-share.canonical.com/share";

/// Tracker document name inside a user's `Platforms` folder.
pub const CATALOG_FILE: &str = "platform-tracker.json";

/// Fetches the tracker document over WebDAV with basic auth.
pub struct LiveCatalogSource {
    client: Client,
    share_url: String,
    password: String,
}

impl LiveCatalogSource {
    /// Creates a live catalog source rooted at `share_url`.
    #[must_use]
    pub fn new(share_url: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            share_url: share_url.into(),
            password: password.into(),
        }
    }

    /// URL of the tracker document for `username`.
    #[must_use]
    pub fn catalog_url(&self, username: &str) -> String {
        let root = self.share_url.trim_end_matches('/');
        format!("{root}/{username}/Platforms/{CATALOG_FILE}")
    }
}

impl CatalogSource for LiveCatalogSource {
    fn fetch(&self, username: &str) -> CatalogFuture<'_> {
        let url = self.catalog_url(username);
        let username = username.to_string();

        Box::pin(async move {
            tracing::debug!(%url, "fetching platform catalog");
            let response = self
                .client
                .get(&url)
                .basic_auth(&username, Some(&self.password))
                .send()
                .await
                .map_err(|e| CatalogError::Fetch(format!("request to {url} failed: {e}")))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| CatalogError::Fetch(format!("failed to read {url}: {e}")))?;

            if !status.is_success() {
                let code = status.as_u16();
                return Err(CatalogError::Fetch(format!("{url} returned {code}")));
            }

            serde_json::from_str(&body).map_err(|e| CatalogError::Parse(e.to_string()))
        })
    }
}
