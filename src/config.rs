//! Environment settings that are not command-line options.
//!
//! Values come from the process environment, after `.env` has been loaded
//! by the binary entrypoint.

use std::env;
use std::path::PathBuf;

use crate::adapters::live::catalog::DEFAULT_SHARE_URL;

/// Share password.
pub const PASSWORD_VAR: &str = "WEBDAV_PASSWORD";
/// Share root URL override.
pub const SHARE_URL_VAR: &str = "OEM_SHARE_URL";
/// Cassette path to record catalog fetches into.
pub const RECORD_VAR: &str = "PLATFORM_TAGGER_RECORD";

/// Settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Password for the share; required unless replaying.
    pub password: Option<String>,
    /// Root URL of the share.
    pub share_url: String,
    /// Where to record the fetched catalog, if anywhere.
    pub record: Option<PathBuf>,
}

impl Settings {
    /// Reads settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            password: get(PASSWORD_VAR),
            share_url: get(SHARE_URL_VAR).unwrap_or_else(|| DEFAULT_SHARE_URL.to_string()),
            record: get(RECORD_VAR).map(PathBuf::from),
        }
    }

    /// The password, or a startup error naming the variable.
    ///
    /// # Errors
    ///
    /// Returns an error string when the password is unset.
    pub fn require_password(&self) -> Result<&str, String> {
        self.password
            .as_deref()
            .ok_or_else(|| format!("environment variable {PASSWORD_VAR} is not set"))
    }
}
