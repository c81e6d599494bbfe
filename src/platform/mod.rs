//! Platform resolution and tag derivation.
//!
//! A [`Device`] parsed from its name is matched against catalog
//! [`Platform`]s by [`resolve`]; once bound, [`derive_tags`] produces the
//! tags the tracker expects.

pub mod binding;
pub mod device;
pub mod distance;
pub mod normalize;
pub mod record;
pub mod resolver;
pub mod tags;

pub use binding::AcceptanceTier;
pub use device::Device;
pub use distance::distance;
pub use normalize::squash;
pub use record::{parse_catalog, Platform, PlatformRecord};
pub use resolver::{resolve, FallbackMatcher, FamilyPrefixMatcher, ResolveOptions, Strategy};
pub use tags::{derive_tags, engineer, vendor_tag};
