// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request-scoped record of completion attempts.

use std::time::Duration;

use maitre_core::TokenUsage;
use maitre_router::ModelTier;

/// How a single attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptResult {
    Succeeded { usage: TokenUsage },
    Failed { error: String },
}

/// One call to the completion service.
#[derive(Debug, Clone)]
pub struct AttemptRecord {
    pub tier: ModelTier,
    pub model: String,
    pub elapsed: Duration,
    pub result: AttemptResult,
}

/// Ordered attempts made while answering one query.
#[derive(Debug, Clone, Default)]
pub struct AttemptLog {
    records: Vec<AttemptRecord>,
}

impl AttemptLog {
    pub fn push(&mut self, record: AttemptRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[AttemptRecord] {
        &self.records
    }

    /// Tiers tried, in order.
    pub fn tiers(&self) -> Vec<ModelTier> {
        self.records.iter().map(|r| r.tier).collect()
    }

    /// Whether each attempt targeted a strictly higher tier than the one before.
    pub fn is_strictly_ascending(&self) -> bool {
        self.records.windows(2).all(|w| w[0].tier < w[1].tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tier: ModelTier) -> AttemptRecord {
        AttemptRecord {
            tier,
            model: tier.to_string(),
            elapsed: Duration::ZERO,
            result: AttemptResult::Failed {
                error: "x".into(),
            },
        }
    }

    #[test]
    fn ascending_detection() {
        let mut log = AttemptLog::default();
        assert!(log.is_strictly_ascending());
        log.push(record(ModelTier::Lite));
        log.push(record(ModelTier::Advanced));
        assert!(log.is_strictly_ascending());
        log.push(record(ModelTier::Advanced));
        assert!(!log.is_strictly_ascending());
        assert_eq!(log.len(), 3);
    }
}
