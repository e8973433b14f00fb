// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query orchestration state machine.
//!
//! `Validating -> RateChecking -> Scoring -> Attempting* -> {Succeeded, Rejected, Exhausted}`
//!
//! Validation and rate-limit failures are terminal rejections. Upstream
//! failures escalate to the next tier while tiers and attempts remain.

use std::sync::Arc;
use std::time::{Duration, Instant};

use maitre_config::model::ChatConfig;
use maitre_core::types::{ChatTurn, CompletionRequest, CompletionResponse, Role, TokenUsage};
use maitre_core::{CompletionProvider, MaitreError};
use maitre_resilience::RateLimiter;
use maitre_router::{ComplexityScore, ModelRouter, ModelTier};
use tracing::{error, info, warn};

use crate::attempt::{AttemptLog, AttemptRecord, AttemptResult};
use crate::context::SystemPrompt;

/// An incoming question.
#[derive(Debug, Clone)]
pub struct ChatQuery {
    pub query: String,
    /// Prior turns, oldest first.
    pub history: Vec<ChatTurn>,
    /// Rate-limit key (user id, session id or network address).
    pub identifier: String,
}

impl ChatQuery {
    pub fn new(query: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            history: Vec::new(),
            identifier: identifier.into(),
        }
    }

    pub fn with_history(mut self, history: Vec<ChatTurn>) -> Self {
        self.history = history;
        self
    }
}

/// A successful answer.
#[derive(Debug, Clone)]
pub struct ChatAnswer {
    pub text: String,
    /// Tier that produced the answer.
    pub tier: ModelTier,
    /// Model identifier reported by the provider.
    pub model: String,
    pub complexity: ComplexityScore,
    pub usage: TokenUsage,
    pub attempts: AttemptLog,
    pub processing_time: Duration,
}

/// Terminal state of one query.
#[derive(Debug)]
pub enum ChatOutcome {
    Succeeded(ChatAnswer),
    /// Local rejection: [`MaitreError::Validation`] or [`MaitreError::RateLimited`].
    Rejected(MaitreError),
    /// No tier produced an answer. `error` is the last upstream error.
    Exhausted {
        attempts: AttemptLog,
        error: MaitreError,
    },
}

impl ChatOutcome {
    /// Flatten into a `Result`, wrapping exhaustion in [`MaitreError::Exhausted`].
    pub fn into_result(self) -> Result<ChatAnswer, MaitreError> {
        match self {
            ChatOutcome::Succeeded(answer) => Ok(answer),
            ChatOutcome::Rejected(err) => Err(err),
            ChatOutcome::Exhausted { attempts, error } => Err(MaitreError::Exhausted {
                attempts: attempts.len(),
                last: Box::new(error),
            }),
        }
    }
}

enum ChatState {
    Validating,
    RateChecking,
    Scoring,
    Attempting {
        tier: ModelTier,
        score: ComplexityScore,
    },
}

/// Ties validation, rate limiting, routing and tier fallback together.
pub struct ChatOrchestrator {
    provider: Arc<dyn CompletionProvider>,
    limiter: Arc<dyn RateLimiter>,
    router: ModelRouter,
    chat: ChatConfig,
    prompt: SystemPrompt,
}

impl ChatOrchestrator {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        limiter: Arc<dyn RateLimiter>,
        router: ModelRouter,
        chat: ChatConfig,
        prompt: SystemPrompt,
    ) -> Self {
        Self {
            provider,
            limiter,
            router,
            chat,
            prompt,
        }
    }

    pub fn router(&self) -> &ModelRouter {
        &self.router
    }

    fn max_attempts(&self) -> usize {
        self.router.config().max_attempts
    }

    fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(self.router.config().attempt_timeout_secs)
    }

    /// Answer a query. Never panics and never hides the final failure.
    pub async fn answer(&self, query: ChatQuery) -> ChatOutcome {
        let started = Instant::now();
        let mut attempts = AttemptLog::default();
        let mut state = ChatState::Validating;

        loop {
            state = match state {
                ChatState::Validating => match self.validate(&query) {
                    Ok(()) => ChatState::RateChecking,
                    Err(err) => return ChatOutcome::Rejected(err),
                },

                ChatState::RateChecking => {
                    let decision = self
                        .limiter
                        .check_and_record(&query.identifier, Instant::now())
                        .await;
                    match decision.into_result() {
                        Ok(_) => ChatState::Scoring,
                        Err(err) => return ChatOutcome::Rejected(err),
                    }
                }

                ChatState::Scoring => {
                    let decision = self.router.plan(&query.query);
                    ChatState::Attempting {
                        tier: decision.tier,
                        score: decision.score,
                    }
                }

                ChatState::Attempting { tier, score } => {
                    let model = self.router.model_for_tier(tier).to_string();
                    let attempt_started = Instant::now();
                    let result = self.attempt(self.build_request(tier, &query)).await;
                    let elapsed = attempt_started.elapsed();

                    match result {
                        Ok(response) => {
                            attempts.push(AttemptRecord {
                                tier,
                                model,
                                elapsed,
                                result: AttemptResult::Succeeded {
                                    usage: response.usage,
                                },
                            });
                            info!(
                                tier = %tier,
                                model = response.model.as_str(),
                                attempts = attempts.len(),
                                input_tokens = response.usage.input_tokens,
                                output_tokens = response.usage.output_tokens,
                                "query answered"
                            );
                            return ChatOutcome::Succeeded(ChatAnswer {
                                text: response.content,
                                tier,
                                model: response.model,
                                complexity: score,
                                usage: response.usage,
                                attempts,
                                processing_time: started.elapsed(),
                            });
                        }
                        Err(err) => {
                            attempts.push(AttemptRecord {
                                tier,
                                model: model.clone(),
                                elapsed,
                                result: AttemptResult::Failed {
                                    error: err.to_string(),
                                },
                            });

                            let can_escalate =
                                err.is_upstream() && attempts.len() < self.max_attempts();
                            let next = tier.next().filter(|_| can_escalate);
                            match next {
                                Some(next) => {
                                    warn!(
                                        tier = %tier,
                                        model = model.as_str(),
                                        next = %next,
                                        error = %err,
                                        "tier attempt failed, escalating"
                                    );
                                    ChatState::Attempting { tier: next, score }
                                }
                                None => {
                                    error!(
                                        tiers = ?attempts.tiers(),
                                        error = %err,
                                        "all model tiers failed"
                                    );
                                    return ChatOutcome::Exhausted {
                                        attempts,
                                        error: err,
                                    };
                                }
                            }
                        }
                    }
                }
            };
        }
    }

    /// Check the query and the history turns that would be forwarded with it.
    fn validate(&self, query: &ChatQuery) -> Result<(), MaitreError> {
        if query.query.trim().is_empty() {
            return Err(MaitreError::Validation {
                message: "query must not be empty".to_string(),
            });
        }
        let length = query.query.chars().count();
        if length > self.chat.max_query_chars {
            return Err(MaitreError::Validation {
                message: format!(
                    "query is {length} characters, the limit is {}",
                    self.chat.max_query_chars
                ),
            });
        }

        let history = recent_history(&query.history, self.chat.max_history_turns);
        let empty_turn = history
            .iter()
            .position(|turn| turn.content.trim().is_empty());
        if let Some(position) = empty_turn {
            return Err(MaitreError::Validation {
                message: format!("conversation history turn {} is empty", position + 1),
            });
        }
        let history_length: usize = history
            .iter()
            .map(|turn| turn.content.chars().count())
            .sum();
        if history_length > self.chat.max_history_chars {
            return Err(MaitreError::Validation {
                message: format!(
                    "conversation history is {history_length} characters, the limit is {}",
                    self.chat.max_history_chars
                ),
            });
        }
        Ok(())
    }

    fn build_request(&self, tier: ModelTier, query: &ChatQuery) -> CompletionRequest {
        let mut messages = recent_history(&query.history, self.chat.max_history_turns);
        messages.push(ChatTurn::user(query.query.trim()));

        CompletionRequest {
            model: self.router.model_for_tier(tier).to_string(),
            system: Some(self.prompt.as_str().to_string()),
            messages,
            max_tokens: self.router.max_tokens_for_tier(tier),
        }
    }

    async fn attempt(&self, request: CompletionRequest) -> Result<CompletionResponse, MaitreError> {
        let timeout = self.attempt_timeout();
        tokio::time::timeout(timeout, self.provider.complete(request))
            .await
            .unwrap_or(Err(MaitreError::Timeout { duration: timeout }))
    }
}

/// The last `limit` turns, starting at a user turn.
fn recent_history(history: &[ChatTurn], limit: usize) -> Vec<ChatTurn> {
    let start = history.len().saturating_sub(limit);
    history[start..]
        .iter()
        .skip_while(|turn| turn.role != Role::User)
        .cloned()
        .collect()
}
