//! # Transporter
//!
//! Transporters consume extraction-complete events. Each loop iteration waits
//! for one unit on `extracted`, marks itself busy, spends a fixed transport
//! time and marks itself idle again, reporting the idle transporter count on
//! both transitions from inside the critical section. A transporter cancelled
//! mid-transport gives its slot back and reports [`PipelineEvent::Abandoned`].
//!
//! Transport time is deliberately fixed: it models infrastructure capacity,
//! not discovery variance.

use crate::framework::{SharedSink, Signal, Worker};
use crate::model::{PipelineEvent, WorkerId};
use crate::state::SharedState;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Clone)]
pub struct TransporterContext {
    pub extracted: Signal,
    pub state: Arc<SharedState>,
    pub sink: SharedSink,
    pub transport_time: Duration,
}

pub struct Transporter {
    id: WorkerId,
    ctx: TransporterContext,
}

impl Transporter {
    pub fn new(id: WorkerId, ctx: TransporterContext) -> Self {
        Self { id, ctx }
    }
}

#[async_trait]
impl Worker for Transporter {
    fn id(&self) -> WorkerId {
        self.id
    }

    async fn run(self, cancel: CancellationToken) {
        let id = self.id;
        let ctx = self.ctx;
        let mut delivered: u64 = 0;

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ctx.extracted.wait_one() => {}
            }

            ctx.state.begin_transport(|idle| {
                ctx.sink.emit(PipelineEvent::Transporting { worker: id, idle })
            });

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    ctx.state.finish_transport(|idle| {
                        ctx.sink.emit(PipelineEvent::Abandoned { worker: id, idle })
                    });
                    break;
                }
                _ = tokio::time::sleep(ctx.transport_time) => {}
            }

            ctx.state.finish_transport(|idle| {
                ctx.sink.emit(PipelineEvent::Transported { worker: id, idle })
            });
            delivered += 1;
        }

        debug!(%id, delivered, "Transporter cancelled");
    }
}
