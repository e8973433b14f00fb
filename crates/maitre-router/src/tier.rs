// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model tiers and upward fallback.

use serde::Serialize;

use crate::classifier::Complexity;

/// Model capability tiers, ordered from cheapest to most capable.
///
/// The derived `Ord` follows declaration order, so `Lite < Standard < Advanced`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ModelTier {
    Lite,
    Standard,
    Advanced,
}

impl ModelTier {
    /// Tier a classification is routed to.
    pub fn for_complexity(complexity: Complexity) -> Self {
        match complexity {
            Complexity::Simple => ModelTier::Lite,
            Complexity::Medium => ModelTier::Standard,
            Complexity::Complex => ModelTier::Advanced,
        }
    }

    /// Next tier to fall back to after a failure, or `None` once the most
    /// capable tier has been reached. Never moves downward.
    pub fn next(self) -> Option<Self> {
        match self {
            ModelTier::Lite => Some(ModelTier::Standard),
            ModelTier::Standard => Some(ModelTier::Advanced),
            ModelTier::Advanced => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn next_tier_moves_up() {
        assert_eq!(ModelTier::Lite.next(), Some(ModelTier::Standard));
        assert_eq!(ModelTier::Standard.next(), Some(ModelTier::Advanced));
        assert_eq!(ModelTier::Advanced.next(), None);
    }

    #[test]
    fn next_is_always_greater() {
        for tier in ModelTier::iter() {
            if let Some(next) = tier.next() {
                assert!(next > tier, "{next} should be above {tier}");
            }
        }
    }

    #[test]
    fn route_each_complexity() {
        assert_eq!(ModelTier::for_complexity(Complexity::Simple), ModelTier::Lite);
        assert_eq!(
            ModelTier::for_complexity(Complexity::Medium),
            ModelTier::Standard
        );
        assert_eq!(
            ModelTier::for_complexity(Complexity::Complex),
            ModelTier::Advanced
        );
    }

    #[test]
    fn tier_display() {
        assert_eq!(ModelTier::Lite.to_string(), "lite");
        assert_eq!(ModelTier::Standard.to_string(), "standard");
        assert_eq!(ModelTier::Advanced.to_string(), "advanced");
    }
}
