//! Minimum-interval pacing for provider calls
//!
//! Free-tier market data providers reject bursts, so consecutive provider
//! calls made for one query wait for their turn on a [`Pacer`]. Each query
//! gets its own pacer; concurrent queries never wait on each other.

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Gate consulted before each provider call
#[async_trait]
pub trait Pacer: Send + Sync + fmt::Debug {
    /// Resolve once the caller may issue its request
    async fn wait_turn(&self);
}

/// Allows one call per interval; the first call goes through immediately
pub struct IntervalPacer {
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    interval: Duration,
}

impl IntervalPacer {
    /// Returns `None` for a zero interval
    pub fn new(interval: Duration) -> Option<Self> {
        let quota = Quota::with_period(interval)?.allow_burst(NonZeroU32::MIN);
        Some(Self {
            limiter: RateLimiter::direct(quota),
            interval,
        })
    }
}

impl fmt::Debug for IntervalPacer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntervalPacer")
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Pacer for IntervalPacer {
    async fn wait_turn(&self) {
        self.limiter.until_ready().await;
    }
}

/// Never waits
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPacing;

#[async_trait]
impl Pacer for NoPacing {
    async fn wait_turn(&self) {}
}

/// Pick a pacer for the configured interval
pub fn pacer_for(interval: Duration) -> Arc<dyn Pacer> {
    match IntervalPacer::new(interval) {
        Some(pacer) => Arc::new(pacer),
        None => Arc::new(NoPacing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_zero_interval_disables_pacing() {
        assert!(IntervalPacer::new(Duration::ZERO).is_none());
        let pacer = pacer_for(Duration::ZERO);
        assert!(format!("{pacer:?}").contains("NoPacing"));
    }

    #[tokio::test]
    async fn test_first_turn_is_immediate() {
        let pacer = IntervalPacer::new(Duration::from_secs(60)).unwrap();
        let start = Instant::now();
        pacer.wait_turn().await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_turns_are_spaced() {
        let pacer = IntervalPacer::new(Duration::from_millis(50)).unwrap();
        let start = Instant::now();
        for _ in 0..3 {
            pacer.wait_turn().await;
        }
        assert!(start.elapsed() >= Duration::from_millis(90));
    }

    #[tokio::test]
    async fn test_separate_pacers_do_not_share_turns() {
        let first = IntervalPacer::new(Duration::from_secs(60)).unwrap();
        let second = IntervalPacer::new(Duration::from_secs(60)).unwrap();
        let start = Instant::now();
        first.wait_turn().await;
        second.wait_turn().await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
