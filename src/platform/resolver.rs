//! Chooses the catalog platform a device belongs to and binds it.

use std::fmt;

use clap::ValueEnum;
use tracing::{debug, info};

use super::binding::AcceptanceTier;
use super::device::Device;
use super::distance::distance;
use super::normalize::squash;
use super::record::Platform;
use crate::error::ResolveError;

/// How candidates are selected before the acceptance policy runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Score only active platforms; pick the closest.
    #[default]
    #[value(name = "default", alias = "status-checked")]
    StatusChecked,
    /// Score every platform; inactivity only adds the distance penalty.
    IgnoreStatus,
    /// Pick the platform whose squashed code name equals the device's.
    ExactName,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.to_possible_value().ok_or(fmt::Error)?;
        f.write_str(value.get_name())
    }
}

/// Nominates a candidate when the configured strategy finds none.
pub trait FallbackMatcher: fmt::Debug {
    /// Returns the index into `candidates` of the nominee, if any.
    fn nominate(&self, device: &Device, candidates: &[Platform]) -> Option<usize>;
}

/// Falls back to platforms whose name starts with the device's product
/// family, the first hyphen-separated token of its base name.
///
/// Active platforms are preferred over inactive ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct FamilyPrefixMatcher;

impl FallbackMatcher for FamilyPrefixMatcher {
    fn nominate(&self, device: &Device, candidates: &[Platform]) -> Option<usize> {
        let family = squash(device.base_name().split('-').next().unwrap_or_default());
        if family.is_empty() {
            return None;
        }
        let matches = |p: &Platform| {
            p.alternate_names()
                .into_iter()
                .any(|n| squash(n).starts_with(&family))
        };

        let mut first = None;
        for (i, candidate) in candidates.iter().enumerate() {
            if !matches(candidate) {
                continue;
            }
            if candidate.is_active() {
                return Some(i);
            }
            first.get_or_insert(i);
        }
        first
    }
}

/// Per-invocation resolver configuration.
#[derive(Debug, Default)]
pub struct ResolveOptions {
    /// Candidate selection strategy.
    pub strategy: Strategy,
    /// Restricts candidates to this exact code name and overrides the
    /// winner's code name with it.
    pub code_name: Option<String>,
    /// Consulted when the strategy yields no candidate.
    pub fallback: Option<Box<dyn FallbackMatcher>>,
}

/// Selects the best candidate for `device` and binds it.
///
/// Among equally close candidates the first in catalog order wins; this is
/// observed behavior, not a guarantee.
///
/// # Errors
///
/// - [`ResolveError::NoMatch`] if `candidates` is empty.
/// - [`ResolveError::NoCandidates`] if filtering leaves nothing.
/// - [`ResolveError::NotFound`] if exact-name mode finds nothing.
/// - [`ResolveError::BindingRejected`] if the winner fails the acceptance policy.
pub fn resolve(
    device: &mut Device,
    candidates: Vec<Platform>,
    options: &ResolveOptions,
) -> Result<AcceptanceTier, ResolveError> {
    if candidates.is_empty() {
        return Err(ResolveError::NoMatch);
    }

    let mut candidates: Vec<Platform> = match &options.code_name {
        Some(code_name) => candidates
            .into_iter()
            .filter(|p| p.code_name() == Some(code_name.as_str()))
            .collect(),
        None => candidates,
    };
    let no_candidates = || ResolveError::NoCandidates {
        code_name: options.code_name.clone(),
    };
    if candidates.is_empty() {
        return Err(no_candidates());
    }

    let selected = match options.strategy {
        Strategy::StatusChecked => {
            let active = closest(device, &candidates, Platform::is_active);
            active.ok_or_else(no_candidates)
        }
        Strategy::IgnoreStatus => {
            let any = closest(device, &candidates, |_| true);
            any.ok_or(ResolveError::NoMatch)
        }
        Strategy::ExactName => {
            let found = exact(device, &candidates);
            found.ok_or_else(|| ResolveError::NotFound {
                code_name: device.base_name().to_string(),
            })
        }
    };

    let index = match selected {
        Ok(index) => index,
        Err(err @ (ResolveError::NotFound { .. } | ResolveError::NoCandidates { .. })) => {
            let Some(fallback) = &options.fallback else {
                return Err(err);
            };
            debug!(%err, ?fallback, "strategy found nothing, trying fallback");
            fallback.nominate(device, &candidates).ok_or(err)?
        }
        Err(err) => return Err(err),
    };

    let mut winner = candidates.swap_remove(index);
    if let Some(code_name) = &options.code_name {
        winner.set_code_name(code_name.clone());
    }
    info!(platform = winner.name(), strategy = %options.strategy, "selected platform");

    device.bind(winner)
}

fn closest(
    device: &Device,
    candidates: &[Platform],
    eligible: impl Fn(&Platform) -> bool,
) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .filter(|(_, p)| eligible(p))
        .min_by_key(|(_, p)| distance(device, p))
        .map(|(i, _)| i)
}

fn exact(device: &Device, candidates: &[Platform]) -> Option<usize> {
    candidates.iter().position(|p| {
        let name = p.alt_name().or_else(|| p.code_name());
        name.is_some_and(|n| squash(n) == device.squashed_name())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::record::PlatformRecord;

    fn platform(name: &str, code: Option<&str>, canonical: Option<&str>, status: &str) -> Platform {
        let record = PlatformRecord {
            platform: Some(name.into()),
            code_name: code.map(Into::into),
            canonical_code_name: canonical.map(Into::into),
            status: Some(status.into()),
            ..PlatformRecord::default()
        };
        Platform::from_record(0, record).unwrap()
    }

    fn options(strategy: Strategy) -> ResolveOptions {
        ResolveOptions {
            strategy,
            ..ResolveOptions::default()
        }
    }

    fn bound_name(device: &Device) -> Option<&str> {
        device.platform().map(Platform::name)
    }

    #[test]
    fn empty_catalog_is_no_match() {
        let mut device = Device::parse("falcon-1").unwrap();
        let result = resolve(&mut device, vec![], &ResolveOptions::default());
        assert_eq!(result, Err(ResolveError::NoMatch));
    }

    #[test]
    fn picks_closest_active_platform() {
        let mut device = Device::parse("kestrel-4").unwrap();
        let catalog = vec![
            platform("Kestrel", None, None, "Shipped"),
            platform("Kestrell", None, None, "In-Flight"),
            platform("Osprey", None, None, "In-Flight"),
        ];
        resolve(&mut device, catalog, &options(Strategy::StatusChecked)).unwrap();
        assert_eq!(bound_name(&device), Some("Kestrell"));
    }

    #[test]
    fn ignore_status_scores_inactive_platforms() {
        let mut device = Device::parse("kestrel-4").unwrap();
        let catalog = vec![
            platform("Kestrelx", None, None, "In-Flight"),
            platform("Kestrel", None, None, "Shipped"),
        ];
        let ignore = options(Strategy::IgnoreStatus);
        // 1 vs 0 + 2: the active one still wins.
        resolve(&mut device, catalog.clone(), &ignore).unwrap();
        assert_eq!(bound_name(&device), Some("Kestrelx"));

        let mut device = Device::parse("kestrel-4").unwrap();
        let only_inactive = vec![catalog[1].clone()];
        resolve(&mut device, only_inactive.clone(), &ignore).unwrap();
        assert_eq!(bound_name(&device), Some("Kestrel"));

        let mut device = Device::parse("kestrel-4").unwrap();
        let strict = options(Strategy::StatusChecked);
        let result = resolve(&mut device, only_inactive, &strict);
        assert_eq!(result, Err(ResolveError::NoCandidates { code_name: None }));
    }

    #[test]
    fn first_of_equal_distances_wins() {
        let mut device = Device::parse("hawk-1").unwrap();
        let catalog = vec![
            platform("Hawkx", None, None, "Pipeline"),
            platform("Hawky", None, None, "Pipeline"),
        ];
        resolve(&mut device, catalog, &ResolveOptions::default()).unwrap();
        assert_eq!(bound_name(&device), Some("Hawkx"));
    }

    #[test]
    fn code_name_filter_restricts_and_overrides() {
        let mut device = Device::parse("falcon-lake-2").unwrap();
        let catalog = vec![
            platform("Falcon Lake", None, Some("sutton-a"), "In-Flight"),
            platform("Falcon Lake", None, Some("sutton-b"), "In-Flight"),
        ];
        let opts = ResolveOptions {
            code_name: Some("sutton-b".into()),
            ..ResolveOptions::default()
        };
        resolve(&mut device, catalog.clone(), &opts).unwrap();
        let code_name = device.platform().and_then(Platform::code_name);
        assert_eq!(code_name, Some("sutton-b"));

        let opts = ResolveOptions {
            code_name: Some("sutton-z".into()),
            ..ResolveOptions::default()
        };
        assert_eq!(
            resolve(&mut device, catalog, &opts),
            Err(ResolveError::NoCandidates {
                code_name: Some("sutton-z".into())
            })
        );
    }

    #[test]
    fn exact_name_beats_closer_edit_distance() {
        let mut device = Device::parse("raptor-lake-p-1").unwrap();
        let catalog = vec![
            // Primary name is identical to the device, but its code name is not.
            platform("Raptor Lake P", Some("RPL-PX"), None, "In-Flight"),
            platform("Raptor Lake Mobile", Some("Raptor Lake-P"), None, "In-Flight"),
        ];
        resolve(&mut device, catalog, &options(Strategy::ExactName)).unwrap();
        assert_eq!(bound_name(&device), Some("Raptor Lake Mobile"));
    }

    #[test]
    fn exact_name_reports_not_found() {
        let mut device = Device::parse("raptor-1").unwrap();
        let catalog = vec![platform("Raptor Lake", Some("RPL"), None, "In-Flight")];
        assert_eq!(
            resolve(&mut device, catalog, &options(Strategy::ExactName)),
            Err(ResolveError::NotFound {
                code_name: "raptor".into()
            })
        );
    }

    #[test]
    fn family_fallback_nominates_when_exact_fails() {
        let catalog = vec![
            platform("Raptor Lake", Some("RPL"), None, "Shipped"),
            platform("Raptorx", Some("RPX"), None, "In-Flight"),
        ];
        let opts = ResolveOptions {
            strategy: Strategy::ExactName,
            fallback: Some(Box::new(FamilyPrefixMatcher)),
            ..ResolveOptions::default()
        };
        let mut device = Device::parse("raptor-1").unwrap();
        let tier = resolve(&mut device, catalog, &opts);
        assert_eq!(tier, Ok(AcceptanceTier::Prefix));
        assert_eq!(bound_name(&device), Some("Raptorx"));
    }

    #[test]
    fn family_fallback_covers_all_inactive_catalog() {
        let catalog = vec![
            platform("Osprey", None, None, "Shipped"),
            platform("Raptor Lake", Some("RPL"), None, "Shipped"),
            platform("Raptorx", Some("RPX"), None, "Shipped"),
        ];
        let mut device = Device::parse("raptor-1").unwrap();
        let strict = options(Strategy::StatusChecked);
        let result = resolve(&mut device, catalog.clone(), &strict);
        assert_eq!(result, Err(ResolveError::NoCandidates { code_name: None }));
        assert!(device.platform().is_none());

        let opts = ResolveOptions {
            fallback: Some(Box::new(FamilyPrefixMatcher)),
            ..options(Strategy::StatusChecked)
        };
        let tier = resolve(&mut device, catalog, &opts);
        assert_eq!(tier, Ok(AcceptanceTier::Prefix));
        assert_eq!(bound_name(&device), Some("Raptor Lake"));
    }

    #[test]
    fn squashing_bridges_separators_and_version_suffix() {
        let catalog = vec![
            platform("Hawkeye", None, None, "In-Flight"),
            platform("Hawk 2.0", None, None, "In-Flight"),
        ];
        // "hawk20" vs "hawk2": distance 1 over 6 chars.
        let mut device = Device::parse("hawk-2-0-1").unwrap();
        let tier = resolve(&mut device, catalog.clone(), &ResolveOptions::default());
        assert_eq!(tier, Ok(AcceptanceTier::StrictRatio));
        assert_eq!(bound_name(&device), Some("Hawk 2.0"));

        let mut device = Device::parse("Hawk 2.0-7").unwrap();
        let tier = resolve(&mut device, catalog, &ResolveOptions::default());
        assert_eq!(tier, Ok(AcceptanceTier::Prefix));
        assert_eq!(bound_name(&device), Some("Hawk 2.0"));
        assert_eq!(device.index(), 7);
    }

    #[test]
    fn rejected_winner_propagates() {
        let mut device = Device::parse("zzz-9").unwrap();
        let catalog = vec![platform("Falcon Lake", Some("FLK"), None, "In-Flight")];
        assert!(matches!(
            resolve(&mut device, catalog, &ResolveOptions::default()),
            Err(ResolveError::BindingRejected { .. })
        ));
        assert!(device.platform().is_none());
    }

    #[test]
    fn strategy_names_round_trip_through_clap() {
        let cases = [
            ("default", Strategy::StatusChecked),
            ("status-checked", Strategy::StatusChecked),
            ("ignore-status", Strategy::IgnoreStatus),
            ("Exact-Name", Strategy::ExactName),
        ];
        for (name, strategy) in cases {
            assert_eq!(Strategy::from_str(name, true), Ok(strategy));
        }
        assert_eq!(Strategy::ExactName.to_string(), "exact-name");
    }
}
