//! Edit-distance scoring between a device and a platform.

use strsim::levenshtein;
use tracing::debug;

use super::device::Device;
use super::normalize::squash;
use super::record::Platform;

/// Added to the score of platforms that are not in progress.
pub const INACTIVE_PENALTY: usize = 2;

/// Minimum edit distance between the device's squashed name and any of the
/// platform's squashed alternate names, plus [`INACTIVE_PENALTY`] when the
/// platform is inactive.
#[must_use]
pub fn distance(device: &Device, platform: &Platform) -> usize {
    let mine = device.squashed_name();
    let theirs: Vec<String> = platform
        .alternate_names()
        .into_iter()
        .map(squash)
        .collect();

    let mut distance = theirs
        .iter()
        .map(|their| levenshtein(mine, their))
        .min()
        .unwrap_or(usize::MAX);
    if !platform.is_active() {
        distance = distance.saturating_add(INACTIVE_PENALTY);
    }

    debug!(mine, ?theirs, distance, "scored platform");
    distance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::record::PlatformRecord;

    fn platform(name: &str, status: &str) -> Platform {
        let record = PlatformRecord {
            platform: Some(name.into()),
            status: Some(status.into()),
            ..PlatformRecord::default()
        };
        Platform::from_record(0, record).unwrap()
    }

    fn device(name: &str) -> Device {
        Device::parse(name).unwrap()
    }

    #[test]
    fn zero_for_equal_squashed_names() {
        let falcon = platform("Falcon Lake", "In-Flight");
        assert_eq!(distance(&device("falcon-lake-3"), &falcon), 0);
        assert_eq!(distance(&device("FALCON-lake-1"), &falcon), 0);
        assert_ne!(distance(&device("falcon-lakes-1"), &falcon), 0);
    }

    #[test]
    fn inactive_adds_exact_penalty() {
        let d = device("falcon-lak-1");
        let active = distance(&d, &platform("Falcon Lake", "In-Flight"));
        let inactive = distance(&d, &platform("Falcon Lake", "Shipped"));
        assert_eq!(active, 1);
        assert_eq!(inactive, active + INACTIVE_PENALTY);
    }

    #[test]
    fn takes_minimum_over_alternate_names() {
        let record = PlatformRecord {
            platform: Some("Something Else".into()),
            code_name: Some("Kestrel".into()),
            status: Some("Pipeline".into()),
            ..PlatformRecord::default()
        };
        let p = Platform::from_record(0, record).unwrap();
        assert_eq!(distance(&device("kestral-2"), &p), 1);
    }

    #[test]
    fn symmetric_over_names() {
        let pairs = [
            ("abcd", "xbcde"),
            ("kestrel", "kestral"),
            ("falconlake", "flk"),
            ("raptorlakep", "raptorlakemobile"),
            ("a", "zzzzzz"),
            ("osprey", "osprey"),
        ];
        for (left, right) in pairs {
            let forward = distance(&device(&format!("{left}-1")), &platform(right, "Pipeline"));
            let backward = distance(&device(&format!("{right}-1")), &platform(left, "Pipeline"));
            assert_eq!(forward, backward, "{left} vs {right}");
        }
    }

    #[test]
    fn symmetric_with_inactive_penalty() {
        let forward = distance(&device("hawk-1"), &platform("Hawkeye", "Shipped"));
        let backward = distance(&device("hawkeye-1"), &platform("Hawk", "Shipped"));
        assert_eq!(forward, 3 + INACTIVE_PENALTY);
        assert_eq!(forward, backward);
    }

    #[test]
    fn compares_squashed_forms() {
        // "Hawk 2.0" squashes to "hawk2"; "hawk-2-0" keeps its zero as "hawk20".
        let hawk = platform("Hawk 2.0", "In-Flight");
        assert_eq!(distance(&device("hawk-2-0-1"), &hawk), 1);
        assert_eq!(distance(&device("hawk-2.0-1"), &hawk), 0);
        assert_eq!(distance(&device("hawk 2-1"), &hawk), 0);
    }
}
