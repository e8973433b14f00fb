// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Maitre chatbot.
//!
//! Local, deterministic failures (validation, rate limiting) are kept apart
//! from upstream failures (provider errors, timeouts). Only the latter take
//! part in tier fallback.

use std::time::Duration;

use thiserror::Error;

/// The primary error type used across the workspace.
#[derive(Debug, Error)]
pub enum MaitreError {
    /// Configuration errors (invalid values, unreadable context file).
    #[error("configuration error: {0}")]
    Config(String),

    /// The query failed local validation (empty, oversized).
    #[error("invalid query: {message}")]
    Validation { message: String },

    /// The caller is over its request quota.
    #[error("{reason}")]
    RateLimited {
        reason: String,
        retry_after: Duration,
    },

    /// The completion service failed for a single model.
    #[error("provider error ({model}): {message}")]
    Provider {
        model: String,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An upstream call did not finish in time.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: Duration },

    /// Every eligible model tier failed.
    #[error("all model tiers failed after {attempts} attempt(s): {last}")]
    Exhausted {
        attempts: usize,
        last: Box<MaitreError>,
    },

    /// HTTP gateway errors (bind failure, server crash).
    #[error("gateway error: {message}")]
    Gateway {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Coarse error category, used by callers that react per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Config,
    Validation,
    RateLimited,
    Upstream,
    Exhausted,
    Gateway,
    Internal,
}

impl MaitreError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MaitreError::Config(_) => ErrorKind::Config,
            MaitreError::Validation { .. } => ErrorKind::Validation,
            MaitreError::RateLimited { .. } => ErrorKind::RateLimited,
            MaitreError::Provider { .. } | MaitreError::Timeout { .. } => ErrorKind::Upstream,
            MaitreError::Exhausted { .. } => ErrorKind::Exhausted,
            MaitreError::Gateway { .. } => ErrorKind::Gateway,
            MaitreError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Whether this error may be answered by escalating to the next model tier.
    pub fn is_upstream(&self) -> bool {
        self.kind() == ErrorKind::Upstream
    }

    /// Suggested wait before retrying, for rate-limit rejections.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            MaitreError::RateLimited { retry_after, .. } => Some(*retry_after),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_kinds() {
        let provider = MaitreError::Provider {
            model: "lite".into(),
            message: "503".into(),
            source: None,
        };
        let timeout = MaitreError::Timeout {
            duration: Duration::from_secs(5),
        };
        assert!(provider.is_upstream());
        assert!(timeout.is_upstream());
        assert!(
            !MaitreError::Validation {
                message: "empty".into()
            }
            .is_upstream()
        );
        assert!(
            !MaitreError::RateLimited {
                reason: "x".into(),
                retry_after: Duration::from_secs(1)
            }
            .is_upstream()
        );
    }

    #[test]
    fn exhausted_message_includes_last_error() {
        let err = MaitreError::Exhausted {
            attempts: 3,
            last: Box::new(MaitreError::Provider {
                model: "claude-opus".into(),
                message: "API returned 500".into(),
                source: None,
            }),
        };
        let msg = err.to_string();
        assert!(msg.contains("3 attempt"));
        assert!(msg.contains("claude-opus"));
        assert!(msg.contains("API returned 500"));
        assert_eq!(err.kind(), ErrorKind::Exhausted);
    }

    #[test]
    fn kind_display_is_snake_case() {
        assert_eq!(ErrorKind::RateLimited.to_string(), "rate_limited");
        assert_eq!(ErrorKind::Upstream.to_string(), "upstream");
    }

    #[test]
    fn retry_after_only_for_rate_limits() {
        let limited = MaitreError::RateLimited {
            reason: "x".into(),
            retry_after: Duration::from_secs(7),
        };
        assert_eq!(limited.retry_after(), Some(Duration::from_secs(7)));
        assert_eq!(MaitreError::Internal("x".into()).retry_after(), None);
    }
}
