// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Maitre business-data chatbot.
//!
//! This crate provides the error taxonomy, the chat and completion types, and
//! the [`CompletionProvider`] trait that every model backend implements. All
//! other workspace crates build on these definitions.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{ErrorKind, MaitreError};
pub use traits::CompletionProvider;
pub use types::{ChatTurn, CompletionRequest, CompletionResponse, Role, TokenUsage};
