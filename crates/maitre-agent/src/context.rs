// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! System instruction assembly.
//!
//! The restaurant's business context is read once at startup and handed to
//! the orchestrator, so tests can build prompts without touching the disk.

use maitre_config::model::AgentConfig;
use maitre_core::MaitreError;

/// System instruction sent with every completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPrompt {
    text: String,
}

impl SystemPrompt {
    /// Combine an instruction with optional business context.
    pub fn new(instruction: impl Into<String>, business_context: Option<&str>) -> Self {
        let mut text = instruction.into();
        if let Some(context) = business_context.map(str::trim).filter(|c| !c.is_empty()) {
            text.push_str("\n\nBusiness data:\n");
            text.push_str(context);
        }
        Self { text }
    }

    /// Built-in instruction naming the assistant.
    pub fn default_instruction(name: &str) -> String {
        format!(
            "You are {name}, the assistant built into a restaurant point-of-sale system. \
             Answer questions about sales, orders, tables, menu items and staff activity \
             using only the business data provided. If the data does not contain the \
             answer, say so plainly. Keep answers short and use plain numbers."
        )
    }

    /// Build the prompt from `[agent]`, reading `context_file` if set.
    pub async fn from_config(config: &AgentConfig) -> Result<Self, MaitreError> {
        let instruction = config
            .system_prompt
            .clone()
            .unwrap_or_else(|| Self::default_instruction(&config.name));

        let context = match &config.context_file {
            Some(path) => Some(tokio::fs::read_to_string(path).await.map_err(|e| {
                MaitreError::Config(format!("failed to read agent.context_file `{path}`: {e}"))
            })?),
            None => None,
        };

        Ok(Self::new(instruction, context.as_deref()))
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}
