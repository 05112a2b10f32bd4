//! # Explorer
//!
//! Explorers produce discovery events. Each one loops forever: report
//! "exploring", spend a random amount of time searching, report "target found"
//! and publish one unit on the `found` signal.
//!
//! Explorers touch no shared state and never wait on each other; the timed
//! search is their only suspension point.

use crate::framework::{SharedSink, Signal, Worker};
use crate::model::{Delay, PipelineEvent, WorkerId};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub struct Explorer {
    id: WorkerId,
    found: Signal,
    sink: SharedSink,
    delay: Delay,
    cycles: Option<u32>,
}

impl Explorer {
    pub fn new(id: WorkerId, found: Signal, sink: SharedSink, delay: Delay) -> Self {
        Self {
            id,
            found,
            sink,
            delay,
            cycles: None,
        }
    }

    /// Stops the explorer by itself after `cycles` discoveries.
    pub fn with_cycle_limit(mut self, cycles: Option<u32>) -> Self {
        self.cycles = cycles;
        self
    }
}

#[async_trait]
impl Worker for Explorer {
    fn id(&self) -> WorkerId {
        self.id
    }

    async fn run(self, cancel: CancellationToken) {
        let id = self.id;
        let mut discovered: u32 = 0;

        while self.cycles.is_none_or(|limit| discovered < limit) {
            self.sink.emit(PipelineEvent::Exploring { worker: id });

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(%id, discovered, "Explorer cancelled");
                    return;
                }
                _ = tokio::time::sleep(self.delay.sample()) => {}
            }

            self.sink.emit(PipelineEvent::TargetFound { worker: id });
            self.found.signal();
            discovered += 1;
        }

        debug!(%id, discovered, "Explorer reached cycle limit");
    }
}
