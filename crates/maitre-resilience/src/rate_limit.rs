// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sliding-window rate limiting per identifier.
//!
//! Each identifier owns the timestamps of its requests inside the trailing
//! window. The evict/check/record step for one identifier runs under that
//! identifier's map-shard lock, so concurrent requests from the same caller
//! cannot both take the last slot.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use maitre_config::model::RateLimitConfig;
use maitre_core::MaitreError;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Outcome of an admission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Request recorded. `remaining` slots are left in the current window.
    Allowed { remaining: u32 },
    /// Request refused and not recorded.
    Limited {
        retry_after: Duration,
        reason: String,
    },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }

    /// Convert a refusal into [`MaitreError::RateLimited`].
    pub fn into_result(self) -> Result<u32, MaitreError> {
        match self {
            RateLimitDecision::Allowed { remaining } => Ok(remaining),
            RateLimitDecision::Limited {
                retry_after,
                reason,
            } => Err(MaitreError::RateLimited {
                reason,
                retry_after,
            }),
        }
    }
}

/// Admission contract: check the quota for `identifier` and, if there is room,
/// count this request against it.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    async fn check_and_record(&self, identifier: &str, now: Instant) -> RateLimitDecision;
}

/// In-memory sliding-window limiter.
///
/// State grows with the number of distinct identifiers; [`sweep`](Self::sweep)
/// drops identifiers whose windows have emptied.
#[derive(Debug)]
pub struct SlidingWindowLimiter {
    max_requests: u32,
    window: Duration,
    windows: DashMap<String, VecDeque<Instant>>,
}

impl SlidingWindowLimiter {
    /// Create a limiter allowing `max_requests` per `window`.
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: DashMap::new(),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(
            config.max_requests,
            Duration::from_secs(config.window_secs),
        )
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Synchronous form of [`RateLimiter::check_and_record`].
    pub fn check(&self, identifier: &str, now: Instant) -> RateLimitDecision {
        let mut entry = self.windows.entry(identifier.to_owned()).or_default();
        let timestamps = entry.value_mut();
        evict_expired(timestamps, now, self.window);

        let used = timestamps.len() as u32;
        if used < self.max_requests {
            // Callers read `now` before taking the lock; keep the deque ordered.
            let position = timestamps.partition_point(|t| *t <= now);
            timestamps.insert(position, now);
            return RateLimitDecision::Allowed {
                remaining: self.max_requests - used - 1,
            };
        }

        // Evicted above, so the front is still inside the window.
        let oldest_age = timestamps
            .front()
            .map(|t| now.saturating_duration_since(*t))
            .unwrap_or_default();
        let retry_after = self.window.saturating_sub(oldest_age);
        let secs = whole_seconds_up(retry_after);

        warn!(
            identifier,
            limit = self.max_requests,
            retry_after_secs = secs,
            "rate limit exceeded"
        );

        RateLimitDecision::Limited {
            retry_after: Duration::from_secs(secs),
            reason: format!("rate limit exceeded, retry after {secs} seconds"),
        }
    }

    /// Drop expired timestamps everywhere and forget identifiers left empty.
    /// Returns the number of identifiers removed.
    pub fn sweep(&self, now: Instant) -> usize {
        let before = self.windows.len();
        self.windows.retain(|_, timestamps| {
            evict_expired(timestamps, now, self.window);
            !timestamps.is_empty()
        });
        let removed = before.saturating_sub(self.windows.len());
        if removed > 0 {
            debug!(removed, remaining = self.windows.len(), "swept idle rate-limit entries");
        }
        removed
    }

    /// Number of identifiers currently holding state.
    pub fn tracked_identifiers(&self) -> usize {
        self.windows.len()
    }
}

#[async_trait]
impl RateLimiter for SlidingWindowLimiter {
    async fn check_and_record(&self, identifier: &str, now: Instant) -> RateLimitDecision {
        self.check(identifier, now)
    }
}

/// A timestamp exactly `window` old has left the window.
fn evict_expired(timestamps: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(oldest) = timestamps.front() {
        if now.saturating_duration_since(*oldest) >= window {
            timestamps.pop_front();
        } else {
            break;
        }
    }
}

fn whole_seconds_up(duration: Duration) -> u64 {
    let secs = duration.as_secs() + u64::from(duration.subsec_nanos() > 0);
    secs.max(1)
}

/// Periodically sweep idle identifiers until `cancel` fires.
pub fn spawn_sweeper(
    limiter: Arc<SlidingWindowLimiter>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("rate-limit sweeper stopped");
                    break;
                }
                _ = ticker.tick() => {
                    limiter.sweep(tokio::time::Instant::now().into_std());
                }
            }
        }
    })
}
