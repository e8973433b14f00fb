// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Anthropic Messages API.
//!
//! One call is one attempt: failures are returned immediately so the caller
//! can escalate to the next model tier instead of retrying the same model.

use std::time::Duration;

use maitre_core::MaitreError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, MessageRequest, MessageResponse};

/// Transport-level ceiling; the orchestrator's per-attempt timeout is shorter.
const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP client for Anthropic API communication.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    base_url: String,
}

impl AnthropicClient {
    /// Creates a new client with auth headers preset.
    pub fn new(
        api_key: String,
        api_version: String,
        base_url: String,
    ) -> Result<Self, MaitreError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&api_key)
                .map_err(|e| MaitreError::Config(format!("invalid API key header value: {e}")))?,
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_str(&api_version).map_err(|e| {
                MaitreError::Config(format!("invalid API version header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| MaitreError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Sends a non-streaming request and returns the parsed response.
    pub async fn complete_message(
        &self,
        request: &MessageRequest,
    ) -> Result<MessageResponse, MaitreError> {
        let model = request.model.as_str();

        let response = self
            .client
            .post(&self.base_url)
            .json(request)
            .send()
            .await
            .map_err(|e| MaitreError::Provider {
                model: model.to_string(),
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model, "completion response received");

        let body = response.text().await.map_err(|e| MaitreError::Provider {
            model: model.to_string(),
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "Anthropic API error ({}): {}",
                    api_err.error.type_, api_err.error.message
                ),
                Err(_) => format!("API returned {status}: {body}"),
            };
            warn!(status = %status, model, "completion request failed");
            return Err(MaitreError::Provider {
                model: model.to_string(),
                message,
                source: None,
            });
        }

        serde_json::from_str(&body).map_err(|e| MaitreError::Provider {
            model: model.to_string(),
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}
