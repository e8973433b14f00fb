// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for tier escalation under arbitrary upstream failures.

use std::sync::Arc;
use std::time::Duration;

use maitre_agent::{AttemptLog, ChatOrchestrator, ChatOutcome, ChatQuery, SystemPrompt};
use maitre_config::model::{ChatConfig, RoutingConfig};
use maitre_resilience::SlidingWindowLimiter;
use maitre_router::{ModelRouter, ModelTier};
use maitre_test_utils::MockProvider;
use proptest::prelude::*;

const MODELS: [&str; 3] = ["lite-model", "standard-model", "advanced-model"];

/// One query per starting tier: lite, standard, advanced.
const QUERIES: [&str; 3] = [
    "what is total sales today",
    "compare the lunch and dinner trend and explain why they differ",
    "optimize this join and explain the architecture",
];

fn run(query: &str, failing: [bool; 3], max_attempts: usize) -> ChatOutcome {
    let mut provider = MockProvider::new();
    for (model, fails) in MODELS.iter().zip(failing) {
        if fails {
            provider = provider.failing_model(*model, "upstream error");
        }
    }
    let routing = RoutingConfig {
        lite_model: MODELS[0].into(),
        standard_model: MODELS[1].into(),
        advanced_model: MODELS[2].into(),
        max_attempts,
        ..RoutingConfig::default()
    };
    let orchestrator = ChatOrchestrator::new(
        Arc::new(provider),
        Arc::new(SlidingWindowLimiter::new(100, Duration::from_secs(60))),
        ModelRouter::new(routing),
        ChatConfig::default(),
        SystemPrompt::new("Be brief.", None),
    );

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(orchestrator.answer(ChatQuery::new(query, "user-1")))
}

fn tier_index(tier: ModelTier) -> usize {
    match tier {
        ModelTier::Lite => 0,
        ModelTier::Standard => 1,
        ModelTier::Advanced => 2,
    }
}

proptest! {
    #[test]
    fn escalation_is_monotonic_and_bounded(
        start in 0usize..3,
        failing in prop::array::uniform3(any::<bool>()),
        max_attempts in 1usize..=3,
    ) {
        let outcome = run(QUERIES[start], failing, max_attempts);

        let attempts: AttemptLog = match outcome {
            ChatOutcome::Succeeded(answer) => {
                prop_assert!(!failing[tier_index(answer.tier)]);
                answer.attempts
            }
            ChatOutcome::Exhausted { attempts, .. } => attempts,
            ChatOutcome::Rejected(err) => {
                return Err(TestCaseError::fail(format!("unexpected rejection: {err}")));
            }
        };

        let tiers = attempts.tiers();
        prop_assert!(!attempts.is_empty());
        prop_assert!(attempts.is_strictly_ascending());
        prop_assert!(attempts.len() <= max_attempts);
        prop_assert_eq!(tier_index(tiers[0]), start);
        // Every tier before the last one failed.
        for tier in &tiers[..tiers.len() - 1] {
            prop_assert!(failing[tier_index(*tier)]);
        }
    }
}
