//! # Event Sink
//!
//! Workers never print directly. Every [`PipelineEvent`] goes through an
//! [`EventSink`], which is responsible for serializing output so that lines from
//! different workers never interleave.
//!
//! The print lock lives here and nowhere else. It is independent of the
//! [`SharedState`](crate::state::SharedState) lock that guards idle counts.
//! Idle-count reports are emitted while the state lock is held, so the only
//! nesting is state lock, then print lock. `emit` must never call back into the
//! shared state.

use crate::model::PipelineEvent;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

/// Destination for pipeline events.
pub trait EventSink: Send + Sync {
    /// Emits one event as one complete line.
    fn emit(&self, event: PipelineEvent);
}

/// Shared handle to a sink, as held by every worker.
pub type SharedSink = Arc<dyn EventSink>;

/// Production sink: writes each event as a structured `tracing` line.
#[derive(Default)]
pub struct TracingSink {
    print_lock: Mutex<()>,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedSink {
        Arc::new(Self::new())
    }
}

impl EventSink for TracingSink {
    fn emit(&self, event: PipelineEvent) {
        let _line = self
            .print_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        match (event.worker(), event.idle()) {
            (Some(worker), Some(idle)) => {
                info!(role = %worker.role, worker = worker.index, idle, "{event}")
            }
            (Some(worker), None) => info!(role = %worker.role, worker = worker.index, "{event}"),
            (None, _) => info!("{event}"),
        }
    }
}
