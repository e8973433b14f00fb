// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway.
//!
//! Handles POST /api/chat and GET /health.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::{
    Json,
    extract::{ConnectInfo, State, rejection::JsonRejection},
    http::{Extensions, HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use maitre_agent::{ChatAnswer, ChatOutcome, ChatQuery};
use maitre_core::types::ChatTurn;
use maitre_core::{ErrorKind, MaitreError};
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use crate::server::GatewayState;

/// Identifier used when a request carries nothing to key the rate limit on.
pub const ANONYMOUS_IDENTIFIER: &str = "anonymous";

/// Request body for POST /api/chat.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub query: String,
    /// Prior turns, oldest first.
    #[serde(default)]
    pub conversation_history: Vec<ChatTurn>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Token counts reported by the completion service.
#[derive(Debug, Serialize)]
pub struct TokensUsed {
    pub input: u32,
    pub output: u32,
}

/// Response body for a successful POST /api/chat.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub model: String,
    pub complexity: String,
    pub tier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<TokensUsed>,
    /// Number of tiers tried.
    pub attempts: usize,
    /// Milliseconds spent handling the request.
    pub processing_time: u64,
}

impl ChatResponse {
    fn from_answer(answer: ChatAnswer, processing_time: u64) -> Self {
        let usage = answer.usage;
        let reported = usage.input_tokens > 0 || usage.output_tokens > 0;
        let tokens_used = reported.then_some(TokensUsed {
            input: usage.input_tokens,
            output: usage.output_tokens,
        });
        Self {
            response: answer.text,
            model: answer.model,
            complexity: answer.complexity.complexity.to_string(),
            tier: answer.tier.to_string(),
            tokens_used,
            attempts: answer.attempts.len(),
            processing_time,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Seconds to wait before retrying, for rate-limit rejections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
    pub processing_time: u64,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// POST /api/chat
///
/// Runs the query through the orchestrator and maps its outcome to a status:
/// 200 answered, 400 invalid, 429 rate limited, 503 every tier failed.
pub async fn post_chat(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    extensions: Extensions,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let started = Instant::now();

    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected malformed chat request");
            return error_response(
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Invalid request".to_string(),
                    details: Some(rejection.body_text()),
                    retry_after: None,
                    processing_time: millis(started.elapsed()),
                },
                None,
            );
        }
    };

    let peer = extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let identifier = client_identifier(&body, &headers, peer);
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("chat", %request_id, identifier = identifier.as_str());

    let query = ChatQuery::new(body.query, identifier).with_history(body.conversation_history);
    let outcome = state.orchestrator.answer(query).instrument(span).await;
    let processing_time = millis(started.elapsed());

    match outcome {
        ChatOutcome::Succeeded(answer) => (
            StatusCode::OK,
            Json(ChatResponse::from_answer(answer, processing_time)),
        )
            .into_response(),
        ChatOutcome::Rejected(err) => rejection_response(&err, processing_time),
        ChatOutcome::Exhausted { error, .. } => error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            ErrorResponse {
                error: "All models are currently unavailable".to_string(),
                details: Some(error.to_string()),
                retry_after: None,
                processing_time,
            },
            None,
        ),
    }
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// Rate-limit key for a request.
///
/// Precedence: `userId`, `sessionId`, first `X-Forwarded-For` hop, peer
/// address, then [`ANONYMOUS_IDENTIFIER`]. Blank values are skipped.
pub fn client_identifier(
    body: &ChatRequest,
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
) -> String {
    let non_blank = |value: &str| {
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    };

    body.user_id
        .as_deref()
        .and_then(non_blank)
        .or_else(|| body.session_id.as_deref().and_then(non_blank))
        .or_else(|| {
            headers
                .get("x-forwarded-for")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .and_then(non_blank)
        })
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| ANONYMOUS_IDENTIFIER.to_string())
}

fn rejection_response(err: &MaitreError, processing_time: u64) -> Response {
    match err.kind() {
        ErrorKind::Validation => error_response(
            StatusCode::BAD_REQUEST,
            ErrorResponse {
                error: "Invalid request".to_string(),
                details: Some(err.to_string()),
                retry_after: None,
                processing_time,
            },
            None,
        ),
        ErrorKind::RateLimited => {
            let retry_after = err.retry_after().map(|d| d.as_secs().max(1)).unwrap_or(1);
            error_response(
                StatusCode::TOO_MANY_REQUESTS,
                ErrorResponse {
                    error: "Too many requests".to_string(),
                    details: Some(err.to_string()),
                    retry_after: Some(retry_after),
                    processing_time,
                },
                Some(retry_after),
            )
        }
        _ => {
            tracing::error!(error = %err, "unexpected rejection");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "Internal server error".to_string(),
                    details: None,
                    retry_after: None,
                    processing_time,
                },
                None,
            )
        }
    }
}

fn error_response(status: StatusCode, body: ErrorResponse, retry_after: Option<u64>) -> Response {
    let mut response = (status, Json(body)).into_response();
    if let Some(secs) = retry_after {
        response
            .headers_mut()
            .insert(header::RETRY_AFTER, HeaderValue::from(secs));
    }
    response
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(user_id: Option<&str>, session_id: Option<&str>) -> ChatRequest {
        ChatRequest {
            query: "hi".to_string(),
            conversation_history: vec![],
            user_id: user_id.map(String::from),
            session_id: session_id.map(String::from),
        }
    }

    #[test]
    fn chat_request_deserializes_camel_case() {
        let json = r#"{
            "query": "How many orders today?",
            "conversationHistory": [
                {"role": "user", "content": "hello"},
                {"role": "model", "content": "hi there"}
            ],
            "userId": "u-1"
        }"#;
        let req: ChatRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.query, "How many orders today?");
        assert_eq!(req.conversation_history.len(), 2);
        assert_eq!(req.conversation_history[1], ChatTurn::assistant("hi there"));
        assert_eq!(req.user_id.as_deref(), Some("u-1"));
        assert!(req.session_id.is_none());
    }

    #[test]
    fn identifier_precedence() {
        let peer: SocketAddr = "10.0.0.9:5555".parse().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7, 10.0.0.1"));

        assert_eq!(
            client_identifier(&request(Some("u"), Some("s")), &headers, Some(peer)),
            "u"
        );
        assert_eq!(
            client_identifier(&request(Some("  "), Some("s")), &headers, Some(peer)),
            "s"
        );
        assert_eq!(
            client_identifier(&request(None, None), &headers, Some(peer)),
            "203.0.113.7"
        );
        assert_eq!(
            client_identifier(&request(None, None), &HeaderMap::new(), Some(peer)),
            "10.0.0.9"
        );
        assert_eq!(
            client_identifier(&request(None, None), &HeaderMap::new(), None),
            ANONYMOUS_IDENTIFIER
        );
    }

    #[test]
    fn error_response_omits_empty_fields() {
        let resp = ErrorResponse {
            error: "Invalid request".to_string(),
            details: None,
            retry_after: None,
            processing_time: 3,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"error":"Invalid request","processingTime":3}"#);
    }

    #[test]
    fn health_response_serializes() {
        let resp = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
            uptime_secs: 42,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"uptimeSecs\":42"));
    }

    #[test]
    fn rate_limit_rejection_sets_retry_after_header() {
        let err = MaitreError::RateLimited {
            reason: "rate limit exceeded, retry after 12 seconds".to_string(),
            retry_after: Duration::from_secs(12),
        };
        let response = rejection_response(&err, 1);
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "12");
    }
}
