//! Name normalization shared by devices and platforms.

/// Squash a name into its comparable form: lowercase, with hyphens,
/// whitespace and every literal `.0` removed.
///
/// Names are only ever compared in this form.
#[must_use]
pub fn squash(name: &str) -> String {
    let mut squashed: String = name
        .to_lowercase()
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect();
    // Removing one `.0` can join a `.` with a following `0`, so repeat
    // until the result is stable.
    while squashed.contains(".0") {
        squashed = squashed.replace(".0", "");
    }
    squashed
}
