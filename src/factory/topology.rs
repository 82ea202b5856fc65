//! The versioned rule topology.

use crate::ruleset::RuleKind;

/// Bumped whenever a rule is added, removed, or reordered. Tuned
/// coefficient vectors are only meaningful against the version they were
/// trained on.
pub const TOPOLOGY_VERSION: u32 = 1;

/// Canonical coefficient order: position `i` of every coefficient vector
/// is the weight for `TOPOLOGY[i]` (each rule contributes to exactly one
/// feature, declared by [`RuleKind::feature`]).
const TOPOLOGY: [RuleKind; 11] = [
    RuleKind::HasTitleElement,
    RuleKind::HasTitleInClassOrId,
    RuleKind::IsAboveTheFoldTitle,
    RuleKind::HasGoodTitleLength,
    RuleKind::IsLargerImage,
    RuleKind::HasImageInClassOrId,
    RuleKind::IsAboveTheFoldImage,
    RuleKind::HasPriceSymbol,
    RuleKind::HasPriceInClassOrId,
    RuleKind::IsAboveTheFoldPrice,
    RuleKind::HasPriceishPattern,
];

/// The (rule, feature) edges in canonical order.
pub fn topology() -> &'static [RuleKind] {
    &TOPOLOGY
}

/// Expected coefficient vector length.
pub fn topology_size() -> usize {
    TOPOLOGY.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_topology_has_no_duplicate_rules() {
        let unique: HashSet<_> = topology().iter().collect();
        assert_eq!(unique.len(), topology_size());
    }

    #[test]
    fn test_every_feature_has_rules() {
        use crate::ruleset::Feature;
        for feature in Feature::ALL {
            assert!(
                topology().iter().any(|rule| rule.feature() == feature),
                "no rules contribute to {feature}"
            );
        }
    }
}
