//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

use crate::platform::Strategy;

/// Default share user, also the default tracker project.
pub const DEFAULT_USER: &str = "sutton";

/// Top-level CLI parser for `platform-tagger`.
#[derive(Debug, Parser)]
#[command(
    name = "platform-tagger",
    version,
    about = "Resolve a device to its catalog platform and print tracker arguments"
)]
pub struct Cli {
    /// Device name ending in a numeric index, e.g. `acme-falcon-3`.
    pub device: String,

    /// Only consider platforms with this code name, and tag with it.
    #[arg(short, long, env = "PLATFORM_CODE_NAME")]
    pub code_name: Option<String>,

    /// Bind the closest platform even if it is not close enough.
    #[arg(short, long)]
    pub force: bool,

    /// How candidate platforms are selected.
    #[arg(
        short,
        long,
        value_enum,
        env = "PLATFORM_STRATEGY",
        default_value_t = Strategy::StatusChecked
    )]
    pub strategy: Strategy,

    /// Fall back to platforms sharing the device's product family.
    #[arg(long)]
    pub family_fallback: bool,

    /// Add the CPU vendor tag (`ihv-intel` or `ihv-amd`).
    #[arg(long)]
    pub ihv: bool,

    /// Share user whose platform tracker is read.
    #[arg(short, long, env = "WEBDAV_USERNAME", default_value = DEFAULT_USER)]
    pub user: String,

    /// Tracker project; defaults to the share user.
    #[arg(short, long)]
    pub project: Option<String>,

    /// Serve the catalog from a recorded cassette instead of the share.
    #[arg(long, env = "PLATFORM_TAGGER_REPLAY", value_name = "FILE")]
    pub replay: Option<PathBuf>,

    /// Log level or filter directive.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// The tracker project to file against.
    #[must_use]
    pub fn project(&self) -> &str {
        self.project.as_deref().unwrap_or(&self.user)
    }
}
