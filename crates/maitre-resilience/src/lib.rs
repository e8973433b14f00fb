// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request admission control for the Maitre chatbot.
//!
//! [`RateLimiter`] is the admission contract; [`SlidingWindowLimiter`] is the
//! in-process implementation keyed by caller identifier. Deployments that run
//! several instances put a shared store behind the same trait.

pub mod rate_limit;

pub use rate_limit::{RateLimitDecision, RateLimiter, SlidingWindowLimiter, spawn_sweeper};
