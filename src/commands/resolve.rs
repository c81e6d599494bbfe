//! Resolve a device against the catalog and build tracker arguments.

use std::fmt;

use tracing::{info, warn};

use crate::cli::Cli;
use crate::context::ServiceContext;
use crate::platform::{
    derive_tags, engineer, parse_catalog, resolve, vendor_tag, Device, FallbackMatcher,
    FamilyPrefixMatcher, ResolveOptions,
};

/// Arguments for the downstream bug-tracker tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerArgs {
    /// Tracker project.
    pub project: String,
    /// Device name as given on the command line.
    pub device: String,
    /// Derived tags, in order.
    pub tags: Vec<String>,
    /// Assignee.
    pub engineer: String,
}

impl fmt::Display for TrackerArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-p {} -u {} -t", self.project, self.device)?;
        for tag in &self.tags {
            write!(f, " {tag}")?;
        }
        write!(f, " -a {}", self.engineer)
    }
}

/// Execute a resolution for the device named in `cli`.
///
/// # Errors
///
/// Returns an error string if the device name is invalid, the catalog
/// cannot be loaded, or resolution or tagging fails.
pub async fn run(ctx: &ServiceContext, cli: &Cli) -> Result<TrackerArgs, String> {
    let mut device = Device::parse(&cli.device)
        .map_err(|e| e.to_string())?
        .with_force(cli.force);

    let document = ctx.catalog.fetch(&cli.user).await.map_err(|e| e.to_string())?;
    let platforms = parse_catalog(&document).map_err(|e| e.to_string())?;
    info!(count = platforms.len(), user = %cli.user, "loaded platform catalog");

    let options = ResolveOptions {
        strategy: cli.strategy,
        code_name: cli.code_name.clone(),
        fallback: cli
            .family_fallback
            .then(|| Box::new(FamilyPrefixMatcher) as Box<dyn FallbackMatcher>),
    };
    let tier = resolve(&mut device, platforms, &options).map_err(|e| e.to_string())?;
    if tier.is_forced() {
        warn!(
            "{} accepted under force override; platform match not verified",
            device.name()
        );
    } else {
        info!(%tier, "platform accepted");
    }

    let mut tags = derive_tags(&device).map_err(|e| e.to_string())?;
    if cli.ihv {
        let vendor = vendor_tag(&device).map_err(|e| e.to_string())?;
        if !tags.iter().any(|t| t == vendor) {
            tags.push(vendor.to_string());
        }
    }
    let engineer = engineer(&device).map_err(|e| e.to_string())?.to_string();

    Ok(TrackerArgs {
        project: cli.project().to_string(),
        device: cli.device.clone(),
        tags,
        engineer,
    })
}
