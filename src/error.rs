//! Error types for platform resolution and catalog loading.

use thiserror::Error;

/// Failures of the resolution core. Each one aborts resolution for the
/// current device; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The device name does not end in a numeric index.
    #[error("device name {name} is not valid")]
    InvalidDeviceName {
        /// The rejected input.
        name: String,
    },

    /// The catalog was empty before any filtering.
    #[error("no platforms to match against")]
    NoMatch,

    /// Filtering left no candidates.
    #[error("no platforms left after filtering{}", filter_suffix(.code_name))]
    NoCandidates {
        /// The code-name filter in effect, if any.
        code_name: Option<String>,
    },

    /// No acceptance tier matched and force override was off.
    #[error("device name {device} is not close enough to platform {alternate_names:?}")]
    BindingRejected {
        /// Base name of the device.
        device: String,
        /// Alternate names of the rejected platform.
        alternate_names: Vec<String>,
    },

    /// Tags were requested before a platform was bound.
    #[error("device has no bound platform")]
    Unbound,

    /// The bound platform has no engineer.
    #[error("platform {platform} is missing Canonical_Eng")]
    MissingEngineer {
        /// Primary name of the platform.
        platform: String,
    },

    /// The bound platform has neither a tag field nor a code name.
    #[error("platform {platform} has no tag and no code name")]
    MissingTag {
        /// Primary name of the platform.
        platform: String,
    },

    /// The bound platform's CPU vendor has no vendor tag.
    #[error("unknown cpu vendor {vendor:?} for platform {platform}")]
    UnknownCpuVendor {
        /// Primary name of the platform.
        platform: String,
        /// The raw vendor value, if any.
        vendor: Option<String>,
    },

    /// Exact-name mode found no candidate with the device's code name.
    #[error("platform {code_name} not found")]
    NotFound {
        /// The device's base name.
        code_name: String,
    },
}

fn filter_suffix(code_name: &Option<String>) -> String {
    code_name
        .as_ref()
        .map(|c| format!(" by code name {c}"))
        .unwrap_or_default()
}

/// Failures while obtaining or decoding the platform catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The remote fetch (or its replay) failed.
    #[error("failed to fetch platform catalog: {0}")]
    Fetch(String),

    /// The catalog document is not a list of records.
    #[error("failed to parse platform catalog: {0}")]
    Parse(String),

    /// A record lacks a field required to identify it.
    #[error("platform record {index} is missing {field}")]
    MissingField {
        /// Position of the record in the catalog.
        index: usize,
        /// The missing field name.
        field: &'static str,
    },
}
