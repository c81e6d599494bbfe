//! Device identity parsed from a hyphenated name with a numeric index.

use tracing::warn;

use super::binding::{self, AcceptanceTier};
use super::distance::distance;
use super::normalize::squash;
use super::record::Platform;
use crate::error::ResolveError;

/// A device such as `acme-falcon-3`: base name `acme-falcon`, index `3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    base_name: String,
    squashed_name: String,
    index: u64,
    platform: Option<Platform>,
    force: bool,
}

impl Device {
    /// Parses a device name.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidDeviceName`] when the name does not end
    /// in `-<index>`, or when nothing comparable is left before the index.
    pub fn parse(name: &str) -> Result<Self, ResolveError> {
        let invalid = || ResolveError::InvalidDeviceName {
            name: name.to_string(),
        };

        let (base_name, index) = name.rsplit_once('-').ok_or_else(invalid)?;
        let index: u64 = index.parse().map_err(|_| invalid())?;
        let squashed_name = squash(base_name);
        if squashed_name.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            base_name: base_name.to_string(),
            squashed_name,
            index,
            platform: None,
            force: false,
        })
    }

    /// Enables or disables force override for subsequent bindings.
    #[must_use]
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Name without the trailing index.
    #[must_use]
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Squashed base name.
    #[must_use]
    pub fn squashed_name(&self) -> &str {
        &self.squashed_name
    }

    /// Trailing numeric index.
    #[must_use]
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Full name, `<base>-<index>`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{}-{}", self.base_name, self.index)
    }

    /// The bound platform, if any.
    #[must_use]
    pub fn platform(&self) -> Option<&Platform> {
        self.platform.as_ref()
    }

    /// Binds `platform` if the acceptance policy allows it.
    ///
    /// A rejected binding leaves any earlier binding in place. A forced
    /// binding succeeds but is logged as a warning.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::BindingRejected`] when no tier accepts and
    /// force override is off.
    pub fn bind(&mut self, platform: Platform) -> Result<AcceptanceTier, ResolveError> {
        let theirs: Vec<String> = platform
            .alternate_names()
            .into_iter()
            .map(squash)
            .collect();

        if !platform.is_active() {
            warn!("platform {:?} is not active", platform.alternate_names());
        }

        let score = distance(self, &platform);
        let tier = binding::evaluate(&self.squashed_name, &theirs, score, self.force);
        let Some(tier) = tier else {
            return Err(self.rejection(&platform));
        };

        if tier.is_forced() {
            warn!(
                "Force setting platform: device name {} is not close enough to platform {:?}",
                self.base_name,
                platform.alternate_names()
            );
        }

        self.platform = Some(platform);
        Ok(tier)
    }

    fn rejection(&self, platform: &Platform) -> ResolveError {
        ResolveError::BindingRejected {
            device: self.base_name.clone(),
            alternate_names: platform
                .alternate_names()
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}
