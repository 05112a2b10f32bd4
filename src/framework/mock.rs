//! # Recording Sink & Testing Guide
//!
//! [`RecordingSink`] implements [`EventSink`] by storing every event in memory,
//! in emission order. It replaces the console when a test needs to assert on
//! what the pipeline reported.
//!
//! ## When to use it
//!
//! | Feature | RecordingSink | TracingSink |
//! |---------|---------------|-------------|
//! | **Output** | In-memory `Vec` | `tracing` lines |
//! | **Assertions** | Counts, order, idle values | None |
//! | **Use Case** | Unit and integration tests | The binary |
//!
//! ## Pattern: drive a pipeline on paused time
//!
//! ```rust
//! use mining_pipeline::framework::mock::RecordingSink;
//! use mining_pipeline::lifecycle::MiningSystem;
//! use mining_pipeline::model::{Delay, PipelineConfig, PipelineEvent};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main(flavor = "current_thread", start_paused = true)]
//! async fn main() {
//!     let sink = Arc::new(RecordingSink::new());
//!     let config = PipelineConfig {
//!         explorers: 1,
//!         explore_delay: Delay::fixed_secs(1),
//!         explorer_cycles: Some(2),
//!         ..PipelineConfig::default()
//!     };
//!     let system = MiningSystem::start(config, sink.clone()).unwrap();
//!
//!     tokio::time::sleep(Duration::from_secs(60)).await;
//!     assert_eq!(sink.count(|e| matches!(e, PipelineEvent::TargetFound { .. })), 2);
//!
//!     system.shutdown_and_join().await.unwrap();
//! }
//! ```

use crate::framework::sink::EventSink;
use crate::model::{PipelineEvent, Role};
use std::sync::{Mutex, PoisonError};

/// Sink that keeps every event for later inspection.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<PipelineEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events so far, in emission order.
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded events matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&PipelineEvent) -> bool) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|event| predicate(event))
            .count()
    }

    /// Recorded events about workers of `role`.
    pub fn events_for(&self, role: Role) -> Vec<PipelineEvent> {
        self.events()
            .into_iter()
            .filter(|event| event.worker().is_some_and(|w| w.role == role))
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: PipelineEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
