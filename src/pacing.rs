//! Request pacing
//!
//! Every pause between remote calls goes through a [`Pacer`], so the harvest
//! and replay loops can run without real delays under test.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// Enforces a minimum interval between remote calls
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Waits out `delay` before the next remote call
    async fn pause(&self, delay: Duration);
}

/// Pacer that actually sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepPacer;

#[async_trait]
impl Pacer for SleepPacer {
    async fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Pacer that returns immediately and remembers every requested pause
#[derive(Debug, Default)]
pub struct RecordingPacer {
    pauses: Mutex<Vec<Duration>>,
}

impl RecordingPacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// All pauses requested so far, in order
    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    /// Number of pauses of exactly `delay`
    pub fn count_of(&self, delay: Duration) -> usize {
        self.pauses().iter().filter(|d| **d == delay).count()
    }
}

#[async_trait]
impl Pacer for RecordingPacer {
    async fn pause(&self, delay: Duration) {
        if let Ok(mut pauses) = self.pauses.lock() {
            pauses.push(delay);
        }
    }
}
