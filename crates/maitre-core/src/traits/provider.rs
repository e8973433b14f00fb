// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion provider trait for LLM backends.

use async_trait::async_trait;

use crate::error::MaitreError;
use crate::types::{CompletionRequest, CompletionResponse};

/// Backend that turns a prompt into generated text.
///
/// A single call targets exactly one model (`request.model`). Implementations
/// report transport failures, non-success statuses and malformed bodies as
/// [`MaitreError::Provider`] so the orchestrator can escalate tiers.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &str;

    /// Sends a completion request and returns the full response.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, MaitreError>;
}
