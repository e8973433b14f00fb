// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes.

use crate::diagnostic::ConfigError;
use crate::model::MaitreConfig;

/// Highest useful attempt count: one per model tier.
const MAX_TIER_ATTEMPTS: usize = 3;

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects all errors instead of failing on the first one.
pub fn validate_config(config: &MaitreConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.gateway.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("gateway.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    for (key, model) in [
        ("routing.lite_model", &config.routing.lite_model),
        ("routing.standard_model", &config.routing.standard_model),
        ("routing.advanced_model", &config.routing.advanced_model),
    ] {
        if model.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{key} must not be empty"),
            });
        }
    }

    for (key, tokens) in [
        ("routing.lite_max_tokens", config.routing.lite_max_tokens),
        ("routing.standard_max_tokens", config.routing.standard_max_tokens),
        ("routing.advanced_max_tokens", config.routing.advanced_max_tokens),
    ] {
        if tokens == 0 {
            errors.push(ConfigError::Validation {
                message: format!("{key} must be at least 1"),
            });
        }
    }

    if config.routing.max_attempts == 0 || config.routing.max_attempts > MAX_TIER_ATTEMPTS {
        errors.push(ConfigError::Validation {
            message: format!(
                "routing.max_attempts must be between 1 and {MAX_TIER_ATTEMPTS}, got {}",
                config.routing.max_attempts
            ),
        });
    }

    if config.routing.attempt_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "routing.attempt_timeout_secs must be at least 1".to_string(),
        });
    }

    if config.rate_limit.max_requests == 0 {
        errors.push(ConfigError::Validation {
            message: "rate_limit.max_requests must be at least 1".to_string(),
        });
    }

    if config.rate_limit.window_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "rate_limit.window_secs must be at least 1".to_string(),
        });
    }

    if config.rate_limit.sweep_interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "rate_limit.sweep_interval_secs must be at least 1".to_string(),
        });
    }

    if config.chat.max_query_chars == 0 {
        errors.push(ConfigError::Validation {
            message: "chat.max_query_chars must be at least 1".to_string(),
        });
    }

    if config.chat.max_history_chars == 0 {
        errors.push(ConfigError::Validation {
            message: "chat.max_history_chars must be at least 1".to_string(),
        });
    }

    if let Some(path) = &config.agent.context_file {
        if path.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "agent.context_file must not be an empty path".to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&MaitreConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_error() {
        let mut config = MaitreConfig::default();
        config.rate_limit.max_requests = 0;
        config.rate_limit.window_secs = 0;
        config.routing.max_attempts = 4;
        config.gateway.host = "  ".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn rejects_bad_host() {
        let mut config = MaitreConfig::default();
        config.gateway.host = "not a host!".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("not a valid IP"));
    }

    #[test]
    fn rejects_zero_history_chars() {
        let mut config = MaitreConfig::default();
        config.chat.max_history_chars = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("chat.max_history_chars"));
    }

    #[test]
    fn rejects_empty_model() {
        let mut config = MaitreConfig::default();
        config.routing.advanced_model = String::new();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("routing.advanced_model"));
    }
}
