// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `maitre config`: print the merged configuration.

use maitre_config::MaitreConfig;

const REDACTED: &str = "[redacted]";

/// Render `config` as TOML with secrets replaced.
pub fn render_effective_config(config: &MaitreConfig) -> Result<String, toml::ser::Error> {
    let mut shown = config.clone();
    if shown.anthropic.api_key.is_some() {
        shown.anthropic.api_key = Some(REDACTED.to_string());
    }
    toml::to_string_pretty(&shown)
}
