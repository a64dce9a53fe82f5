// Copyright 2025 the Sliceview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `round`

/// How a data depth is matched against the currently displayed slice.
///
/// Real-number equality on depths is fragile once data has been scaled,
/// transformed, or interpolated, so the matching rule is an explicit policy
/// rather than a hard-coded comparison. [`SlicePolicy::Nearest`] is the
/// default: it buckets both sides to the nearest integer slice, which is
/// what datasets snapped at ingestion expect. [`SlicePolicy::Exact`] keeps
/// the strict behavior for integer-valued data that is known to line up.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub enum SlicePolicy {
    /// Strict equality: `z == depth_index`.
    Exact,
    /// Match when `|z - depth_index|` is at most the given tolerance.
    Tolerance(f64),
    /// Round both depths to the nearest integer slice before comparing.
    #[default]
    Nearest,
}

impl SlicePolicy {
    /// Returns `true` if a datum at depth `z` belongs to the slice at
    /// `depth_index` under this policy.
    #[must_use]
    pub fn matches(&self, z: f64, depth_index: f64) -> bool {
        match *self {
            Self::Exact => z == depth_index,
            Self::Tolerance(eps) => (z - depth_index).abs() <= eps,
            Self::Nearest => z.round() == depth_index.round(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SlicePolicy;

    #[test]
    fn exact_is_strict() {
        let policy = SlicePolicy::Exact;
        assert!(policy.matches(3.0, 3.0));
        assert!(!policy.matches(3.0 + 1e-12, 3.0));
    }

    #[test]
    fn tolerance_is_a_closed_band() {
        let policy = SlicePolicy::Tolerance(0.25);
        assert!(policy.matches(3.2, 3.0));
        assert!(policy.matches(2.75, 3.0));
        assert!(!policy.matches(3.3, 3.0));
    }

    #[test]
    fn nearest_buckets_both_sides() {
        let policy = SlicePolicy::Nearest;
        assert!(policy.matches(2.9, 3.0));
        assert!(policy.matches(3.0, 3.4));
        assert!(!policy.matches(2.4, 3.0));
    }

    #[test]
    fn default_is_nearest() {
        assert_eq!(SlicePolicy::default(), SlicePolicy::Nearest);
    }
}
