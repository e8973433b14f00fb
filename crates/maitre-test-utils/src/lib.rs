// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Maitre integration tests.
//!
//! # Components
//!
//! - [`MockProvider`] - scripted completion provider that can fail or stall
//!   per model and records every request it receives

pub mod mock_provider;

pub use mock_provider::MockProvider;
