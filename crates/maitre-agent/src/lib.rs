// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat orchestration for the Maitre chatbot.
//!
//! [`ChatOrchestrator::answer`] validates a query, checks the caller's quota,
//! routes the query to a model tier and escalates through higher tiers when
//! the completion service fails. Every request ends in exactly one
//! [`ChatOutcome`].

pub mod attempt;
pub mod context;
pub mod orchestrator;

pub use attempt::{AttemptLog, AttemptRecord, AttemptResult};
pub use context::SystemPrompt;
pub use orchestrator::{ChatAnswer, ChatOrchestrator, ChatOutcome, ChatQuery};
