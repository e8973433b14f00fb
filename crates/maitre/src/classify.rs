// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `maitre classify`: offline view of how a query would be routed.

use std::fmt::Write;

use maitre_config::MaitreConfig;
use maitre_router::{MAX_SCORE, ModelRouter, RoutingDecision};

pub fn run_classify(config: &MaitreConfig, query: &str) -> String {
    let router = ModelRouter::new(config.routing.clone());
    render_decision(&router.plan(query))
}

fn render_decision(decision: &RoutingDecision) -> String {
    let mut out = String::new();
    let score = &decision.score;
    let _ = writeln!(
        out,
        "score:      {}/{MAX_SCORE} ({})",
        score.score, score.complexity
    );
    let _ = writeln!(out, "tier:       {}", decision.tier);
    let _ = writeln!(out, "model:      {}", decision.model);
    let _ = writeln!(out, "max tokens: {}", decision.max_tokens);
    if score.reasons.is_empty() {
        let _ = writeln!(out, "reasons:    none");
    } else {
        let _ = writeln!(out, "reasons:");
        for reason in &score.reasons {
            let _ = writeln!(out, "  - {reason}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complex_query_lists_tier_and_reasons() {
        let config = MaitreConfig::default();
        let out = run_classify(
            &config,
            "Analyze the sales trend over the past 6 months and compare performance across \
             different menu categories. What strategy would you recommend?",
        );
        assert!(out.contains("(complex)"));
        assert!(out.contains("tier:       advanced"));
        assert!(out.contains(&config.routing.advanced_model));
        assert!(out.contains("  - "));
    }

    #[test]
    fn empty_query_has_no_reasons() {
        let out = run_classify(&MaitreConfig::default(), "");
        assert!(out.starts_with("score:      0/10 (simple)"));
        assert!(out.contains("reasons:    none"));
    }
}
