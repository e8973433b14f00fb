// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic query complexity scoring.
//!
//! Scores business-data questions on a 0-10 scale from keyword and length
//! signals. No LLM pre-call, no network, no shared state.

use serde::Serialize;

/// Highest possible complexity score.
pub const MAX_SCORE: u8 = 10;

/// Complexity classification derived from the clamped score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Complexity {
    /// Score 0-3: single figures, greetings, lookups.
    Simple,
    /// Score 4-6: comparisons and short analyses.
    Medium,
    /// Score 7-10: multi-part analysis, design questions.
    Complex,
}

impl Complexity {
    /// Classify a clamped score.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=3 => Complexity::Simple,
            4..=6 => Complexity::Medium,
            _ => Complexity::Complex,
        }
    }
}

/// Result of scoring a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplexityScore {
    /// Clamped score in `0..=MAX_SCORE`.
    pub score: u8,
    /// Classification of `score`.
    pub complexity: Complexity,
    /// Human-readable contributions, in the order they were applied.
    pub reasons: Vec<String>,
}

/// Keywords that each add one point (case-insensitive substring match).
const COMPLEX_KEYWORDS: &[&str] = &[
    "analyze",
    "analysis",
    "compare",
    "comparison",
    "correlat",
    "trend",
    "forecast",
    "predict",
    "optimize",
    "optimization",
    "explain",
    "why",
    "strategy",
    "recommend",
    "join",
    "index",
    "performance",
    "breakdown",
    "over time",
    "year over year",
    "month over month",
    "architecture",
];

/// Phrases that add three points once, however many match.
const ARCHITECTURE_INDICATORS: &[&str] = &[
    "architecture",
    "system design",
    "database design",
    "schema",
    "data model",
    "scalab",
    "infrastructure",
    "microservice",
];

/// Phrases that each subtract one point.
const SIMPLE_INDICATORS: &[&str] = &[
    "what is",
    "what's",
    "how many",
    "how much",
    "show me",
    "list all",
    "total sales",
    "today",
    "yesterday",
    "hello",
    "thank",
];

const LONG_QUERY_CHARS: usize = 200;
const MEDIUM_QUERY_CHARS: usize = 100;
const QUESTION_MARK_THRESHOLD: usize = 2;
const ARCHITECTURE_WEIGHT: i32 = 3;

/// Keyword-weighted complexity scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplexityScorer;

impl ComplexityScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score a query. Always succeeds; empty input scores 0 (simple).
    pub fn score(&self, query: &str) -> ComplexityScore {
        let mut raw: i32 = 0;
        let mut reasons = Vec::new();
        let lower = query.to_lowercase();

        let length = query.chars().count();
        if length > LONG_QUERY_CHARS {
            raw += 2;
            reasons.push(format!("long query, {length} chars (+2)"));
        } else if length > MEDIUM_QUERY_CHARS {
            raw += 1;
            reasons.push(format!("medium-length query, {length} chars (+1)"));
        }

        let questions = query.matches('?').count();
        if questions > QUESTION_MARK_THRESHOLD {
            raw += 2;
            reasons.push(format!("{questions} question marks (+2)"));
        }

        for keyword in COMPLEX_KEYWORDS.iter().filter(|k| lower.contains(*k)) {
            raw += 1;
            reasons.push(format!("complex keyword `{keyword}` (+1)"));
        }

        if let Some(phrase) = ARCHITECTURE_INDICATORS.iter().find(|p| lower.contains(*p)) {
            raw += ARCHITECTURE_WEIGHT;
            reasons.push(format!("architecture/design indicator `{phrase}` (+3)"));
        }

        for phrase in SIMPLE_INDICATORS.iter().filter(|p| lower.contains(*p)) {
            raw -= 1;
            reasons.push(format!("simple indicator `{phrase}` (-1)"));
        }

        let score = raw.clamp(0, i32::from(MAX_SCORE)) as u8;
        if i32::from(score) != raw {
            reasons.push(format!("clamped from {raw} to {score}"));
        }

        ComplexityScore {
            score,
            complexity: Complexity::from_score(score),
            reasons,
        }
    }
}
