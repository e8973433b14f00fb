// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider for deterministic testing.

use std::collections::{HashMap, HashSet, VecDeque};

use async_trait::async_trait;
use tokio::sync::Mutex;

use maitre_core::types::{CompletionRequest, CompletionResponse, TokenUsage};
use maitre_core::{CompletionProvider, MaitreError};

/// A mock provider returning pre-configured responses.
///
/// Successful replies are popped from a FIFO queue (default text
/// `"mock response"` once empty). Models registered with
/// [`failing_model`](Self::failing_model) always error; models registered
/// with [`stalled_model`](Self::stalled_model) never answer.
pub struct MockProvider {
    responses: Mutex<VecDeque<String>>,
    failing: HashMap<String, String>,
    stalled: HashSet<String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockProvider {
    /// Create a mock provider with an empty response queue.
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            failing: HashMap::new(),
            stalled: HashSet::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock provider pre-loaded with the given responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from(responses)),
            ..Self::new()
        }
    }

    /// Make every call for `model` fail with `message`.
    pub fn failing_model(mut self, model: impl Into<String>, message: impl Into<String>) -> Self {
        self.failing.insert(model.into(), message.into());
        self
    }

    /// Make every call for `model` hang until cancelled.
    pub fn stalled_model(mut self, model: impl Into<String>) -> Self {
        self.stalled.insert(model.into());
        self
    }

    /// Add a response to the end of the queue.
    pub async fn add_response(&self, text: String) {
        self.responses.lock().await.push_back(text);
    }

    /// All requests received so far, in order.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }

    /// Models requested so far, in order.
    pub async fn attempted_models(&self) -> Vec<String> {
        self.requests
            .lock()
            .await
            .iter()
            .map(|r| r.model.clone())
            .collect()
    }

    async fn next_response(&self) -> String {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock response".to_string())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, MaitreError> {
        self.requests.lock().await.push(request.clone());

        if self.stalled.contains(&request.model) {
            std::future::pending::<()>().await;
        }

        if let Some(message) = self.failing.get(&request.model) {
            return Err(MaitreError::Provider {
                model: request.model,
                message: message.clone(),
                source: None,
            });
        }

        Ok(CompletionResponse {
            id: format!("mock-resp-{}", uuid::Uuid::new_v4()),
            content: self.next_response().await,
            model: request.model,
            stop_reason: Some("end_turn".to_string()),
            usage: TokenUsage {
                input_tokens: 10,
                output_tokens: 20,
            },
        })
    }
}
