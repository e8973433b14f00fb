// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Maitre configuration system.

use maitre_config::diagnostic::ConfigError;
use maitre_config::model::MaitreConfig;
use maitre_config::{load_and_validate_str, load_config_from_str};

#[test]
fn valid_toml_deserializes_into_maitre_config() {
    let toml = r#"
[agent]
name = "bistro-bot"
log_level = "debug"
system_prompt = "You answer questions about the restaurant."
context_file = "/var/lib/maitre/context.md"

[anthropic]
api_key = "sk-ant-123"

[routing]
lite_model = "lite-model"
standard_model = "standard-model"
advanced_model = "advanced-model"
max_attempts = 2
attempt_timeout_secs = 10

[rate_limit]
max_requests = 5
window_secs = 30

[chat]
max_query_chars = 500
max_history_turns = 4

[gateway]
host = "0.0.0.0"
port = 8080
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "bistro-bot");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(
        config.agent.context_file.as_deref(),
        Some("/var/lib/maitre/context.md")
    );
    assert_eq!(config.anthropic.api_key.as_deref(), Some("sk-ant-123"));
    assert_eq!(config.routing.lite_model, "lite-model");
    assert_eq!(config.routing.max_attempts, 2);
    assert_eq!(config.routing.attempt_timeout_secs, 10);
    assert_eq!(config.rate_limit.max_requests, 5);
    assert_eq!(config.rate_limit.window_secs, 30);
    assert_eq!(config.rate_limit.sweep_interval_secs, 300);
    assert_eq!(config.chat.max_query_chars, 500);
    assert_eq!(config.chat.max_history_turns, 4);
    assert_eq!(config.gateway.host, "0.0.0.0");
    assert_eq!(config.gateway.port, 8080);
}

#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.agent.name, "maitre");
    assert_eq!(config.agent.log_level, "info");
    assert!(config.agent.system_prompt.is_none());
    assert!(config.anthropic.api_key.is_none());
    assert_eq!(config.anthropic.api_version, "2023-06-01");
    assert!(config.routing.lite_model.contains("haiku"));
    assert!(config.routing.standard_model.contains("sonnet"));
    assert!(config.routing.advanced_model.contains("opus"));
    assert_eq!(config.routing.max_attempts, 3);
    assert_eq!(config.rate_limit.max_requests, 10);
    assert_eq!(config.rate_limit.window_secs, 60);
    assert_eq!(config.chat.max_query_chars, 2000);
    assert_eq!(config.gateway.host, "127.0.0.1");
    assert_eq!(config.gateway.port, 3000);
}

#[test]
fn unknown_field_produces_error() {
    let toml = r#"
[rate_limit]
max_reqests = 5
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("max_reqests"),
        "error should mention unknown field, got: {err_str}"
    );
}

#[test]
fn unknown_field_gets_suggestion_and_span() {
    let toml = "[rate_limit]\nmax_reqests = 5\n";

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key,
            suggestion,
            span,
            ..
        } => {
            assert_eq!(key, "max_reqests");
            assert_eq!(suggestion.as_deref(), Some("max_requests"));
            assert!(span.is_some());
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn invalid_type_is_reported() {
    let toml = r#"
[gateway]
port = "eighty"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject wrong type");
    assert!(matches!(errors[0], ConfigError::InvalidType { .. }));
}

#[test]
fn semantic_validation_runs_after_parse() {
    let toml = r#"
[routing]
max_attempts = 0

[rate_limit]
window_secs = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert_eq!(errors.len(), 2);
    assert!(
        errors
            .iter()
            .all(|e| matches!(e, ConfigError::Validation { .. }))
    );
}

#[test]
fn env_var_overrides_rate_limit() {
    use figment::{
        Figment, Jail,
        providers::{Format, Serialized, Toml},
    };

    Jail::expect_with(|jail| {
        jail.set_env("MAITRE_RATE_LIMIT_MAX_REQUESTS", "42");
        jail.set_env("MAITRE_ANTHROPIC_API_KEY", "from-env");

        let config: MaitreConfig = Figment::new()
            .merge(Serialized::defaults(MaitreConfig::default()))
            .merge(Toml::string("[rate_limit]\nmax_requests = 5\n"))
            .merge(maitre_config::loader::env_provider())
            .extract()?;

        assert_eq!(config.rate_limit.max_requests, 42);
        assert_eq!(config.anthropic.api_key.as_deref(), Some("from-env"));
        Ok(())
    });
}

#[test]
fn api_key_is_redacted_in_debug() {
    let mut config = MaitreConfig::default();
    config.anthropic.api_key = Some("sk-secret".to_string());
    let debug = format!("{:?}", config.anthropic);
    assert!(!debug.contains("sk-secret"));
    assert!(debug.contains("[redacted]"));
}
