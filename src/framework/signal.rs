//! # Handoff Signal
//!
//! A counting semaphore used to pass payload-less completion events from one
//! pipeline stage to the next. One instance sits at each stage boundary
//! (`found` between explorers and extractors, `extracted` between extractors
//! and transporters).

use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{trace, warn};

/// Unbounded counting semaphore starting at zero.
///
/// Cloning is cheap and every clone refers to the same counter.
///
/// * [`signal`](Signal::signal) increments the count and wakes at most one waiter.
/// * [`wait_one`](Signal::wait_one) waits until the count is positive and then
///   decrements it. Each unit is consumed by exactly one waiter.
///
/// Waiting is cancel-safe: dropping a pending `wait_one` future never consumes
/// a unit, so it can sit in a `tokio::select!` next to a cancellation token.
#[derive(Clone, Debug)]
pub struct Signal {
    name: &'static str,
    permits: Arc<Semaphore>,
}

impl Signal {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            permits: Arc::new(Semaphore::new(0)),
        }
    }

    /// Stage boundary this signal sits on, used as the `signal` log field.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Publishes one event.
    pub fn signal(&self) {
        self.permits.add_permits(1);
        trace!(signal = self.name, pending = self.pending(), "Event published");
    }

    /// Consumes one event, waiting for it if none is outstanding.
    pub async fn wait_one(&self) {
        match self.permits.acquire().await {
            Ok(permit) => {
                permit.forget();
                trace!(signal = self.name, pending = self.pending(), "Event consumed");
            }
            // Never closed today; a closed signal just stops blocking.
            Err(_) => warn!(signal = self.name, "Signal closed"),
        }
    }

    /// Number of events published but not yet consumed.
    pub fn pending(&self) -> usize {
        self.permits.available_permits()
    }
}
