//! Cancellation tokens for the pagination loop.
//!
//! A token is checked between pages, so an in-flight request always completes
//! (or times out) before cancellation takes effect.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared cancel flag with an optional deadline.
///
/// Clones observe the same flag, so one clone can cancel a fetch that runs
/// with another.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancellationToken {
    /// A token that is never cancelled unless [`Self::cancel`] is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// A token that reports cancelled once `timeout` has elapsed from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: Some(deadline),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
            || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}
