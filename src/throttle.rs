//! Pauses between remote calls.
//!
//! The pipeline never issues two requests back to back: after each search
//! page, detail page and geocoding call it waits on a [`Throttle`]. Tests
//! swap in [`NoDelay`] or their own implementation; the control flow stays
//! the same.

use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait Throttle: Send + Sync {
    async fn pause(&self, delay: Duration);
}

/// Sleeps for the full delay on the current task.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleep;

#[async_trait]
impl Throttle for TokioSleep {
    async fn pause(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Throttle for NoDelay {
    async fn pause(&self, _delay: Duration) {}
}
