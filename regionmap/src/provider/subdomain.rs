//! Subdomain selection for load spreading across mirror endpoints.
//!
//! The tile host exposes a small set of equivalent subdomains. Which one
//! serves a given request has no effect on the response, only on how load
//! distributes, so the choice is behind a trait and the default selector is
//! deterministic. Tests can pin it; callers wanting different spreading can
//! inject their own.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Strategy for picking one of `count` equivalent endpoints.
pub trait SubdomainSelector: Send + Sync {
    /// Returns an index in `0..count`.
    fn next(&self, count: usize) -> usize;
}

/// Cycles through the endpoints in order.
#[derive(Debug, Default)]
pub struct RoundRobinSelector {
    counter: AtomicUsize,
}

impl RoundRobinSelector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SubdomainSelector for RoundRobinSelector {
    fn next(&self, count: usize) -> usize {
        self.counter.fetch_add(1, Ordering::Relaxed) % count.max(1)
    }
}
