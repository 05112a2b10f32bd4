//! # Extractor
//!
//! Extractors turn discovery events into extraction-complete events, one for
//! one. Each loop iteration:
//!
//! 1. Waits for one unit on `found`.
//! 2. Marks itself busy in [`SharedState`] (clearing its yield) and reports the
//!    idle extractor count while still inside the critical section.
//! 3. Spends a random amount of time extracting.
//! 4. Stores the quantity it produced, marks itself idle and reports both.
//! 5. Publishes one unit on `extracted`.
//!
//! Steps 1 and 3 are the only suspension points and the only places
//! cancellation is observed. If cancelled during step 3 the extractor gives its
//! idle slot back and reports [`PipelineEvent::Abandoned`] before exiting, so
//! idle counts stay consistent after teardown.

use crate::framework::{SharedSink, Signal, Worker};
use crate::model::{Delay, PipelineEvent, WorkerId, YieldRange};
use crate::state::SharedState;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Everything an extractor works with besides its own identity.
#[derive(Clone)]
pub struct ExtractorContext {
    pub found: Signal,
    pub extracted: Signal,
    pub state: Arc<SharedState>,
    pub sink: SharedSink,
    pub delay: Delay,
    pub yield_range: YieldRange,
}

pub struct Extractor {
    id: WorkerId,
    ctx: ExtractorContext,
}

impl Extractor {
    pub fn new(id: WorkerId, ctx: ExtractorContext) -> Self {
        Self { id, ctx }
    }
}

#[async_trait]
impl Worker for Extractor {
    fn id(&self) -> WorkerId {
        self.id
    }

    async fn run(self, cancel: CancellationToken) {
        let id = self.id;
        let ctx = self.ctx;
        let mut completed: u64 = 0;

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ctx.found.wait_one() => {}
            }

            ctx.state.begin_extraction(id, |idle| {
                ctx.sink.emit(PipelineEvent::Extracting { worker: id, idle })
            });

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    ctx.state.finish_extraction(|idle| {
                        ctx.sink.emit(PipelineEvent::Abandoned { worker: id, idle })
                    });
                    break;
                }
                _ = tokio::time::sleep(ctx.delay.sample()) => {}
            }

            let quantity = ctx.yield_range.sample();
            ctx.state.record_yield(id, quantity);
            ctx.state.finish_extraction(|idle| {
                ctx.sink.emit(PipelineEvent::Extracted {
                    worker: id,
                    quantity,
                    idle,
                })
            });

            ctx.extracted.signal();
            completed += 1;
        }

        debug!(%id, completed, "Extractor cancelled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::RecordingSink;
    use crate::model::Role;
    use std::time::Duration;

    fn context(sink: Arc<RecordingSink>, extractors: usize) -> ExtractorContext {
        ExtractorContext {
            found: Signal::new("found"),
            extracted: Signal::new("extracted"),
            state: Arc::new(SharedState::new(extractors, 1)),
            sink,
            delay: Delay::fixed_secs(3),
            yield_range: YieldRange::default(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_discovery_becomes_one_extraction() {
        let sink = Arc::new(RecordingSink::new());
        let ctx = context(sink.clone(), 2);
        let cancel = CancellationToken::new();
        let tasks: Vec<_> = (1..=2)
            .map(|index| {
                let extractor = Extractor::new(WorkerId::new(Role::Extractor, index), ctx.clone());
                tokio::spawn(extractor.run(cancel.clone()))
            })
            .collect();

        for _ in 0..5 {
            ctx.found.signal();
        }
        tokio::time::sleep(Duration::from_secs(60)).await;

        assert_eq!(ctx.found.pending(), 0);
        assert_eq!(ctx.extracted.pending(), 5);
        assert_eq!(
            sink.count(|e| matches!(e, PipelineEvent::Extracting { .. })),
            5
        );
        for event in sink.events() {
            if let PipelineEvent::Extracted { quantity, idle, .. } = event {
                assert!((1..=6).contains(&quantity));
                assert!((1..=2).contains(&idle));
            }
        }
        assert_eq!(ctx.state.snapshot().idle_extractors, 2);

        cancel.cancel();
        for task in tasks {
            task.await.unwrap();
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_extraction_restores_idle_count() {
        let sink = Arc::new(RecordingSink::new());
        let ctx = context(sink.clone(), 1);
        let id = WorkerId::new(Role::Extractor, 1);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(Extractor::new(id, ctx.clone()).run(cancel.clone()));

        ctx.found.signal();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(ctx.state.snapshot().idle_extractors, 0);
        assert_eq!(ctx.state.yield_of(id), 0);

        cancel.cancel();
        task.await.unwrap();

        assert_eq!(ctx.state.snapshot().idle_extractors, 1);
        assert_eq!(ctx.extracted.pending(), 0);
        assert_eq!(
            sink.events(),
            vec![
                PipelineEvent::Extracting { worker: id, idle: 0 },
                PipelineEvent::Abandoned { worker: id, idle: 1 },
            ]
        );
    }
}
