//! Acceptance policy deciding whether a device may bind to a platform.
//!
//! The policy is a pure function of the squashed names, the score and the
//! override flag. [`Device::bind`](super::device::Device::bind) applies it.

use std::fmt;

/// Ratio below which a substring match is accepted.
pub const LOOSE_RATIO: f64 = 0.5;

/// Ratio below which any candidate is accepted.
pub const STRICT_RATIO: f64 = 0.25;

/// The rule that accepted a binding, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptanceTier {
    /// An alternate name starts with the device name.
    Prefix,
    /// An alternate name contains the device name and the ratio is below
    /// [`LOOSE_RATIO`].
    SubstringRatio,
    /// The ratio is below [`STRICT_RATIO`].
    StrictRatio,
    /// Nothing matched but the caller forced the binding.
    Forced,
}

impl AcceptanceTier {
    /// Whether the binding was accepted without verification.
    #[must_use]
    pub fn is_forced(self) -> bool {
        self == Self::Forced
    }
}

impl fmt::Display for AcceptanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Prefix => "prefix",
            Self::SubstringRatio => "substring+ratio",
            Self::StrictRatio => "strict ratio",
            Self::Forced => "forced",
        };
        f.write_str(label)
    }
}

/// Distance relative to the device name length. Infinite for an empty name.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ratio(distance: usize, mine: &str) -> f64 {
    let len = mine.chars().count();
    if len == 0 {
        return f64::INFINITY;
    }
    distance as f64 / len as f64
}

/// Evaluates the tiers in order and returns the first that accepts.
///
/// `mine` and `theirs` must already be squashed. Returns `None` when no tier
/// accepts and `force` is off.
#[must_use]
pub fn evaluate(
    mine: &str,
    theirs: &[String],
    distance: usize,
    force: bool,
) -> Option<AcceptanceTier> {
    if theirs.iter().any(|t| t.starts_with(mine)) {
        return Some(AcceptanceTier::Prefix);
    }
    let ratio = ratio(distance, mine);
    if theirs.iter().any(|t| t.contains(mine)) && ratio < LOOSE_RATIO {
        return Some(AcceptanceTier::SubstringRatio);
    }
    if ratio < STRICT_RATIO {
        return Some(AcceptanceTier::StrictRatio);
    }
    force.then_some(AcceptanceTier::Forced)
}
