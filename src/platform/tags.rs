//! Tag derivation for a bound device.

use std::collections::HashSet;

use super::device::Device;
use super::record::Platform;
use crate::error::ResolveError;

fn bound(device: &Device) -> Result<&Platform, ResolveError> {
    device.platform().ok_or(ResolveError::Unbound)
}

/// Derives the device's tags: `[code name,] tag, tag-<index>`, lowercased,
/// with duplicates removed in first-seen order.
///
/// # Errors
///
/// Returns [`ResolveError::Unbound`] before a successful binding,
/// [`ResolveError::MissingTag`] if the platform has no tag source, or
/// [`ResolveError::MissingEngineer`] if it has no engineer.
pub fn derive_tags(device: &Device) -> Result<Vec<String>, ResolveError> {
    let platform = bound(device)?;
    engineer(device)?;

    let tag = platform.tag().ok_or_else(|| ResolveError::MissingTag {
        platform: platform.name().to_string(),
    })?;

    let mut tags = Vec::with_capacity(3);
    if let Some(code_name) = platform.code_name() {
        tags.push(code_name.to_string());
    }
    tags.push(tag.to_string());
    tags.push(format!("{tag}-{}", device.index()));

    let mut seen = HashSet::new();
    Ok(tags
        .into_iter()
        .map(|t| t.to_lowercase())
        .filter(|t| seen.insert(t.clone()))
        .collect())
}

/// Engineer responsible for the bound platform.
///
/// # Errors
///
/// Returns [`ResolveError::Unbound`] or [`ResolveError::MissingEngineer`].
pub fn engineer(device: &Device) -> Result<&str, ResolveError> {
    let platform = bound(device)?;
    platform.engineer().ok_or_else(|| ResolveError::MissingEngineer {
        platform: platform.name().to_string(),
    })
}

/// Vendor tag for the bound platform's CPU vendor: `ihv-intel` or `ihv-amd`.
///
/// # Errors
///
/// Returns [`ResolveError::Unbound`], or [`ResolveError::UnknownCpuVendor`]
/// for any other or missing vendor.
pub fn vendor_tag(device: &Device) -> Result<&'static str, ResolveError> {
    let platform = bound(device)?;
    let vendor = platform.cpu_vendor();
    match vendor.map(str::to_lowercase).as_deref() {
        Some("intel") => Ok("ihv-intel"),
        Some("amd") => Ok("ihv-amd"),
        _ => Err(ResolveError::UnknownCpuVendor {
            platform: platform.name().to_string(),
            vendor: vendor.map(String::from),
        }),
    }
}
