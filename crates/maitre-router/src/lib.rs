// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query complexity scoring and model routing for the Maitre chatbot.
//!
//! This crate provides:
//! - [`ComplexityScorer`]: keyword-weighted complexity score (pure, zero latency)
//! - [`ModelTier`]: the ordered lite/standard/advanced tiers and their upward fallback
//! - [`ModelRouter`]: maps a score to a tier and resolves the tier's model and token budget

pub mod classifier;
pub mod router;
pub mod tier;

pub use classifier::{Complexity, ComplexityScore, ComplexityScorer, MAX_SCORE};
pub use router::{ModelRouter, RoutingDecision};
pub use tier::ModelTier;
