//! Version comparison against the configured expectation

use crate::parser::types::ExtractedVersion;
use crate::verdict::Verdict;
use crate::version::expected::ExpectedSpec;
use crate::version::normalized::NormalizedVersion;

/// Decide whether `extracted` satisfies `expected`.
///
/// A mismatch is always CRITICAL; a version string with no numeric structure
/// is UNKNOWN, since the probe cannot judge it at all.
pub fn compare(extracted: &ExtractedVersion, expected: &ExpectedSpec) -> Verdict {
    let Ok(actual) = NormalizedVersion::parse(extracted.as_str()) else {
        return Verdict::unknown(format!("could not parse version string: {extracted}"));
    };

    match expected {
        ExpectedSpec::Any => Verdict::ok(format!("version {extracted}")),
        ExpectedSpec::Exact(v) if actual == v.normalized => {
            Verdict::ok(format!("version {extracted} matches expected {v}"))
        }
        ExpectedSpec::Exact(v) => Verdict::critical(format!(
            "version mismatch: expected {v}, got {extracted}"
        )),
        ExpectedSpec::Minimum(v) if actual >= v.normalized => {
            Verdict::ok(format!("version {extracted} satisfies minimum {v}"))
        }
        ExpectedSpec::Minimum(v) => Verdict::critical(format!(
            "version too old: expected >= {v}, got {extracted}"
        )),
        ExpectedSpec::Range(lo, _) if actual < lo.normalized => Verdict::critical(format!(
            "version below lower bound: expected >= {lo}, got {extracted}"
        )),
        ExpectedSpec::Range(_, hi) if actual > hi.normalized => Verdict::critical(format!(
            "version above upper bound: expected <= {hi}, got {extracted}"
        )),
        ExpectedSpec::Range(lo, hi) => {
            Verdict::ok(format!("version {extracted} within range {lo}..{hi}"))
        }
        ExpectedSpec::Pattern { raw, regex } if regex.is_match(extracted.as_str()) => {
            Verdict::ok(format!("version {extracted} matches '{raw}'"))
        }
        ExpectedSpec::Pattern { raw, .. } => Verdict::critical(format!(
            "version mismatch: expected to match '{raw}', got {extracted}"
        )),
    }
}
