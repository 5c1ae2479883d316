//! Fetch-until-nonempty retry loop
//!
//! The site now and then serves a page that renders without its listing, or
//! with a zero total. Nothing distinguishes that from a real outage at this
//! level, so every failed attempt is retried after a fixed delay. The number
//! of attempts is unbounded unless the policy says otherwise.

use crate::config::PacingConfig;
use crate::pacing::Pacer;
use crate::{KinoportError, Result};
use std::future::Future;
use std::time::Duration;

/// Delay and bound applied to every retried fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Pause after each failed attempt
    pub delay: Duration,

    /// Give up after this many attempts; `None` never gives up
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    pub fn unbounded(delay: Duration) -> Self {
        Self {
            delay,
            max_attempts: None,
        }
    }

    pub fn bounded(delay: Duration, max_attempts: u32) -> Self {
        Self {
            delay,
            max_attempts: Some(max_attempts),
        }
    }

    pub fn from_config(pacing: &PacingConfig) -> Self {
        Self {
            delay: pacing.retry_delay(),
            max_attempts: pacing.max_attempts,
        }
    }
}

/// Outcome of a single fetch + parse + extract cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchAttempt<T> {
    /// The cycle produced a usable, non-empty result
    Success(T),

    /// Transport error, unreadable page or empty result
    TransientFailure(String),
}

/// A value together with the number of attempts it took
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retried<T> {
    pub value: T,
    pub attempts: u32,
}

/// Runs `attempt` until it succeeds or the policy's bound is reached
///
/// `attempt` receives the 1-based attempt number. After each transient
/// failure the pacer waits `policy.delay`, except after the final attempt
/// of a bounded policy, which fails with `RetriesExhausted` instead.
///
/// # Arguments
///
/// * `policy` - Delay between attempts and optional attempt bound
/// * `pacer` - Performs the delay
/// * `target` - Human readable name of what is fetched, for progress output
/// * `attempt` - One fetch + parse + extract cycle
pub async fn fetch_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    pacer: &dyn Pacer,
    target: &str,
    mut attempt: F,
) -> Result<Retried<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = FetchAttempt<T>>,
{
    let mut attempt_number: u32 = 1;

    loop {
        if attempt_number == 1 {
            tracing::info!("Fetching {}", target);
        } else {
            tracing::info!("Fetching {} (try #{})", target, attempt_number);
        }

        match attempt(attempt_number).await {
            FetchAttempt::Success(value) => {
                return Ok(Retried {
                    value,
                    attempts: attempt_number,
                });
            }
            FetchAttempt::TransientFailure(reason) => {
                tracing::warn!(
                    "Attempt #{} for {} yielded nothing: {}",
                    attempt_number,
                    target,
                    reason
                );

                if let Some(max_attempts) = policy.max_attempts {
                    if attempt_number >= max_attempts {
                        return Err(KinoportError::RetriesExhausted {
                            target: target.to_string(),
                            attempts: attempt_number,
                        });
                    }
                }

                pacer.pause(policy.delay).await;
                attempt_number = attempt_number.saturating_add(1);
            }
        }
    }
}
