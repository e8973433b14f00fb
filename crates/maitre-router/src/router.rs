// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model routing: complexity score to tier, tier to model and token budget.

use maitre_config::model::RoutingConfig;
use tracing::debug;

use crate::classifier::{ComplexityScore, ComplexityScorer};
use crate::tier::ModelTier;

/// Initial routing decision for a query.
#[derive(Debug, Clone)]
pub struct RoutingDecision {
    /// Score that drove the decision.
    pub score: ComplexityScore,
    /// Tier the first attempt targets.
    pub tier: ModelTier,
    /// Model identifier for `tier`.
    pub model: String,
    /// Max tokens for `tier`.
    pub max_tokens: u32,
}

/// Maps queries to model tiers using the configured models.
#[derive(Debug, Clone)]
pub struct ModelRouter {
    scorer: ComplexityScorer,
    config: RoutingConfig,
}

impl ModelRouter {
    /// Create a new model router with the given configuration.
    pub fn new(config: RoutingConfig) -> Self {
        Self {
            scorer: ComplexityScorer::new(),
            config,
        }
    }

    /// Routing configuration in use.
    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Tier for a score: simple to lite, medium to standard, complex to advanced.
    pub fn route(&self, score: &ComplexityScore) -> ModelTier {
        ModelTier::for_complexity(score.complexity)
    }

    /// Score a query and resolve its initial tier, model and token budget.
    pub fn plan(&self, query: &str) -> RoutingDecision {
        let score = self.scorer.score(query);
        let tier = self.route(&score);
        let model = self.model_for_tier(tier).to_string();
        let max_tokens = self.max_tokens_for_tier(tier);

        debug!(
            score = score.score,
            complexity = %score.complexity,
            tier = %tier,
            model = model.as_str(),
            "routed query"
        );

        RoutingDecision {
            score,
            tier,
            model,
            max_tokens,
        }
    }

    /// Configured model identifier for a tier.
    pub fn model_for_tier(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Lite => &self.config.lite_model,
            ModelTier::Standard => &self.config.standard_model,
            ModelTier::Advanced => &self.config.advanced_model,
        }
    }

    /// Configured response token budget for a tier.
    pub fn max_tokens_for_tier(&self, tier: ModelTier) -> u32 {
        match tier {
            ModelTier::Lite => self.config.lite_max_tokens,
            ModelTier::Standard => self.config.standard_max_tokens,
            ModelTier::Advanced => self.config.advanced_max_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Complexity;

    fn router() -> ModelRouter {
        ModelRouter::new(RoutingConfig::default())
    }

    fn score_of(complexity: Complexity) -> ComplexityScore {
        let score = match complexity {
            Complexity::Simple => 1,
            Complexity::Medium => 5,
            Complexity::Complex => 9,
        };
        ComplexityScore {
            score,
            complexity,
            reasons: vec![],
        }
    }

    #[test]
    fn route_is_exhaustive() {
        let r = router();
        assert_eq!(r.route(&score_of(Complexity::Simple)), ModelTier::Lite);
        assert_eq!(r.route(&score_of(Complexity::Medium)), ModelTier::Standard);
        assert_eq!(r.route(&score_of(Complexity::Complex)), ModelTier::Advanced);
    }

    #[test]
    fn plan_simple_query_uses_lite_model() {
        let decision = router().plan("what is total sales today");
        assert_eq!(decision.tier, ModelTier::Lite);
        assert!(decision.model.contains("haiku"));
        assert_eq!(decision.max_tokens, 1024);
    }

    #[test]
    fn plan_complex_query_uses_advanced_model() {
        let decision = router().plan("optimize this join and explain the architecture");
        assert_eq!(decision.tier, ModelTier::Advanced);
        assert!(decision.model.contains("opus"));
        assert_eq!(decision.max_tokens, 4096);
    }

    #[test]
    fn plan_medium_query_uses_standard_model() {
        let decision =
            router().plan("compare the lunch and dinner trend and explain why they differ");
        assert_eq!(decision.score.complexity, Complexity::Medium);
        assert_eq!(decision.tier, ModelTier::Standard);
        assert!(decision.model.contains("sonnet"));
    }

    #[test]
    fn custom_models_are_used() {
        let config = RoutingConfig {
            lite_model: "small".into(),
            standard_model: "mid".into(),
            advanced_model: "big".into(),
            ..RoutingConfig::default()
        };
        let r = ModelRouter::new(config);
        assert_eq!(r.model_for_tier(ModelTier::Lite), "small");
        assert_eq!(r.model_for_tier(ModelTier::Standard), "mid");
        assert_eq!(r.model_for_tier(ModelTier::Advanced), "big");
    }
}
