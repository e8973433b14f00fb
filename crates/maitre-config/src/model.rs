// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Maitre chatbot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Top-level Maitre configuration.
///
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MaitreConfig {
    /// Assistant identity, prompt and logging.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Completion service credentials and endpoint.
    #[serde(default)]
    pub anthropic: AnthropicConfig,

    /// Model tiers and fallback limits.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Per-identifier request quota.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Query validation and conversation history limits.
    #[serde(default)]
    pub chat: ChatConfig,

    /// HTTP listener settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Assistant identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the assistant.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Inline system instruction. Falls back to a built-in prompt when unset.
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Path to a file holding the restaurant business context (menu, tables,
    /// recent sales summary). Read once at startup and appended to the
    /// system instruction.
    #[serde(default)]
    pub context_file: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            system_prompt: None,
            context_file: None,
        }
    }
}

fn default_agent_name() -> String {
    "maitre".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Completion service configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnthropicConfig {
    /// API key. Usually supplied via `MAITRE_ANTHROPIC_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API version header value.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Messages endpoint URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl std::fmt::Debug for AnthropicConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("api_version", &self.api_version)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_version: default_api_version(),
            base_url: default_base_url(),
        }
    }
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

fn default_base_url() -> String {
    "https://api.anthropic.com/v1/messages".to_string()
}

/// Model tier configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Model identifier for the lite tier (simple queries).
    #[serde(default = "default_lite_model")]
    pub lite_model: String,

    /// Model identifier for the standard tier (medium queries).
    #[serde(default = "default_standard_model")]
    pub standard_model: String,

    /// Model identifier for the advanced tier (complex queries).
    #[serde(default = "default_advanced_model")]
    pub advanced_model: String,

    /// Max tokens for lite tier responses.
    #[serde(default = "default_lite_max_tokens")]
    pub lite_max_tokens: u32,

    /// Max tokens for standard tier responses.
    #[serde(default = "default_standard_max_tokens")]
    pub standard_max_tokens: u32,

    /// Max tokens for advanced tier responses.
    #[serde(default = "default_advanced_max_tokens")]
    pub advanced_max_tokens: u32,

    /// Upper bound on completion attempts per query (1-3).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Timeout for a single completion attempt, in seconds.
    #[serde(default = "default_attempt_timeout_secs")]
    pub attempt_timeout_secs: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            lite_model: default_lite_model(),
            standard_model: default_standard_model(),
            advanced_model: default_advanced_model(),
            lite_max_tokens: default_lite_max_tokens(),
            standard_max_tokens: default_standard_max_tokens(),
            advanced_max_tokens: default_advanced_max_tokens(),
            max_attempts: default_max_attempts(),
            attempt_timeout_secs: default_attempt_timeout_secs(),
        }
    }
}

fn default_lite_model() -> String {
    "claude-haiku-4-5-20250901".to_string()
}

fn default_standard_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_advanced_model() -> String {
    "claude-opus-4-20250514".to_string()
}

fn default_lite_max_tokens() -> u32 {
    1024
}

fn default_standard_max_tokens() -> u32 {
    2048
}

fn default_advanced_max_tokens() -> u32 {
    4096
}

fn default_max_attempts() -> usize {
    3
}

fn default_attempt_timeout_secs() -> u64 {
    30
}

/// Sliding-window rate limit configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RateLimitConfig {
    /// Maximum requests per identifier inside one window.
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Window length in seconds.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// How often idle identifiers are dropped, in seconds.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

fn default_max_requests() -> u32 {
    10
}

fn default_window_secs() -> u64 {
    60
}

fn default_sweep_interval_secs() -> u64 {
    300
}

/// Query and history limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    /// Longest accepted query, in characters.
    #[serde(default = "default_max_query_chars")]
    pub max_query_chars: usize,

    /// Number of most recent prior turns forwarded to the model.
    #[serde(default = "default_max_history_turns")]
    pub max_history_turns: usize,

    /// Combined length of the forwarded history turns, in characters.
    #[serde(default = "default_max_history_chars")]
    pub max_history_chars: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_query_chars: default_max_query_chars(),
            max_history_turns: default_max_history_turns(),
            max_history_chars: default_max_history_chars(),
        }
    }
}

fn default_max_query_chars() -> usize {
    2000
}

fn default_max_history_turns() -> usize {
    10
}

fn default_max_history_chars() -> usize {
    20_000
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}
