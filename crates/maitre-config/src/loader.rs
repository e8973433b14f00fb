// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./maitre.toml` > `~/.config/maitre/maitre.toml` > `/etc/maitre/maitre.toml`
//! with environment variable overrides via `MAITRE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::MaitreConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/maitre/maitre.toml";

/// Config sections addressable from the environment, longest first so that
/// `rate_limit_` is tried before any shorter section sharing a prefix.
const ENV_SECTIONS: &[&str] = &[
    "rate_limit",
    "anthropic",
    "routing",
    "gateway",
    "agent",
    "chat",
];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/maitre/maitre.toml`
/// 3. `~/.config/maitre/maitre.toml`
/// 4. `./maitre.toml`
/// 5. `MAITRE_*` environment variables
pub fn load_config() -> Result<MaitreConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<MaitreConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MaitreConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<MaitreConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MaitreConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the layered Figment before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(MaitreConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("maitre").join(crate::CONFIG_FILE_NAME))
                .unwrap_or_default(),
        ))
        .merge(Toml::file(crate::CONFIG_FILE_NAME))
        .merge(env_provider())
}

/// Environment provider mapping `MAITRE_<SECTION>_<KEY>` to `section.key`.
///
/// Keys themselves contain underscores (`max_requests`), so splitting on `_`
/// is ambiguous; only the known section prefix is converted.
pub fn env_provider() -> Env {
    Env::prefixed("MAITRE_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a prefix-stripped env var name to a lowercase dotted config path.
pub fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in ENV_SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key
}
