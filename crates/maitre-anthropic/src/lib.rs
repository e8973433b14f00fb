// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Messages API provider for the Maitre chatbot.
//!
//! [`AnthropicClient`] speaks HTTP; [`AnthropicProvider`] adapts it to the
//! workspace-wide [`CompletionProvider`] trait.

pub mod client;
pub mod types;

use async_trait::async_trait;
use maitre_config::model::AnthropicConfig;
use maitre_core::types::{CompletionRequest, CompletionResponse, Role, TokenUsage};
use maitre_core::{CompletionProvider, MaitreError};

pub use client::AnthropicClient;

use crate::types::{ApiMessage, MessageRequest, ResponseContentBlock};

/// Completion provider backed by the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicProvider {
    client: AnthropicClient,
}

impl AnthropicProvider {
    pub fn new(client: AnthropicClient) -> Self {
        Self { client }
    }

    /// Build a provider from the `[anthropic]` config section.
    pub fn from_config(config: &AnthropicConfig) -> Result<Self, MaitreError> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            MaitreError::Config(
                "anthropic.api_key is not set (use MAITRE_ANTHROPIC_API_KEY)".to_string(),
            )
        })?;
        let client = AnthropicClient::new(
            api_key,
            config.api_version.clone(),
            config.base_url.clone(),
        )?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl CompletionProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, MaitreError> {
        let model = request.model.clone();
        let api_request = to_api_request(request);
        let response = self.client.complete_message(&api_request).await?;

        let text: Vec<&str> = response
            .content
            .iter()
            .filter_map(|block| match block {
                ResponseContentBlock::Text { text } => Some(text.as_str()),
                ResponseContentBlock::Other => None,
            })
            .collect();

        if text.is_empty() {
            return Err(MaitreError::Provider {
                model,
                message: "response contained no text content".to_string(),
                source: None,
            });
        }

        Ok(CompletionResponse {
            id: response.id,
            content: text.join(""),
            model: response.model,
            stop_reason: response.stop_reason,
            usage: TokenUsage {
                input_tokens: response.usage.input_tokens,
                output_tokens: response.usage.output_tokens,
            },
        })
    }
}

fn to_api_request(request: CompletionRequest) -> MessageRequest {
    MessageRequest {
        model: request.model,
        messages: request
            .messages
            .into_iter()
            .map(|turn| ApiMessage {
                role: match turn.role {
                    Role::User => "user".to_string(),
                    Role::Assistant => "assistant".to_string(),
                },
                content: turn.content,
            })
            .collect(),
        system: request.system,
        max_tokens: request.max_tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maitre_core::ChatTurn;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(base_url: &str) -> AnthropicProvider {
        let client = AnthropicClient::new(
            "test-api-key".into(),
            "2023-06-01".into(),
            base_url.to_string(),
        )
        .unwrap();
        AnthropicProvider::new(client)
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "claude-haiku-4-5-20250901".into(),
            system: Some("You are the restaurant assistant.".into()),
            messages: vec![
                ChatTurn::user("how many tables are open?"),
                ChatTurn::assistant("Four tables are open."),
                ChatTurn::user("what is total sales today"),
            ],
            max_tokens: 256,
        }
    }

    #[tokio::test]
    async fn complete_maps_request_and_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "model": "claude-haiku-4-5-20250901",
                "system": "You are the restaurant assistant.",
                "max_tokens": 256,
                "messages": [
                    {"role": "user", "content": "how many tables are open?"},
                    {"role": "assistant", "content": "Four tables are open."},
                    {"role": "user", "content": "what is total sales today"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "msg_1",
                "type": "message",
                "role": "assistant",
                "content": [
                    {"type": "text", "text": "Sales today are "},
                    {"type": "text", "text": "$4,210."}
                ],
                "model": "claude-haiku-4-5-20250901",
                "stop_reason": "end_turn",
                "usage": {"input_tokens": 42, "output_tokens": 7}
            })))
            .mount(&server)
            .await;

        let response = provider(&server.uri()).complete(request()).await.unwrap();
        assert_eq!(response.content, "Sales today are $4,210.");
        assert_eq!(response.usage.input_tokens, 42);
        assert_eq!(response.usage.output_tokens, 7);
        assert_eq!(response.stop_reason.as_deref(), Some("end_turn"));
    }

    #[tokio::test]
    async fn response_without_text_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "msg_2",
                "content": [{"type": "tool_use", "id": "t", "name": "x", "input": {}}],
                "model": "claude-haiku-4-5-20250901",
                "stop_reason": "tool_use",
                "usage": {"input_tokens": 1, "output_tokens": 1}
            })))
            .mount(&server)
            .await;

        let err = provider(&server.uri()).complete(request()).await.unwrap_err();
        assert!(err.is_upstream());
        assert!(err.to_string().contains("no text content"), "got: {err}");
    }

    #[test]
    fn missing_api_key_is_config_error() {
        let err = AnthropicProvider::from_config(&AnthropicConfig::default()).unwrap_err();
        assert!(matches!(err, MaitreError::Config(_)));
    }
}
