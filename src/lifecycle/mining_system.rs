use crate::explorer::Explorer;
use crate::extractor::{Extractor, ExtractorContext};
use crate::framework::{PipelineError, SharedSink, Signal, WorkerPool};
use crate::model::{PipelineConfig, PipelineEvent, Role, WorkerId};
use crate::state::{SharedState, StateSnapshot};
use crate::transporter::{Transporter, TransporterContext};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Phases of a [`MiningSystem`], in the only order they can occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    Starting,
    Running,
    ShuttingDown,
    Terminated,
}

/// The lifecycle controller of the extraction pipeline.
///
/// `MiningSystem` is responsible for:
/// - **Startup**: building the shared state and both handoff signals, reporting
///   the initial idle status, installing the interrupt trigger and spawning
///   every worker pool
/// - **Ownership**: it holds every [`WorkerPool`], so it is the only component
///   able to cancel workers
/// - **Shutdown**: cancelling every worker uniformly once the trigger fires
///
/// # Architecture
///
/// ```text
/// Explorer ──found──▶ Extractor ──extracted──▶ Transporter
///                        │                        │
///                        └──── SharedState ───────┘
/// ```
///
/// # Example
///
/// ```ignore
/// let system = MiningSystem::start(PipelineConfig::default(), TracingSink::shared())?;
///
/// // Runs until Ctrl-C (or `system.trigger().cancel()`), then cancels everything.
/// system.run_until_triggered().await?;
/// ```
pub struct MiningSystem {
    state: LifecycleState,
    shared: Arc<SharedState>,
    found: Signal,
    extracted: Signal,
    sink: SharedSink,
    trigger: CancellationToken,
    pools: Vec<WorkerPool>,
}

impl MiningSystem {
    /// Validates `config` and starts every worker.
    ///
    /// This method:
    /// 1. Creates the shared state with every extractor and transporter idle
    /// 2. Creates the `found` and `extracted` signals, both at zero
    /// 3. Reports the initial waiting status of extractors and transporters
    /// 4. Installs the interrupt trigger
    /// 5. Spawns the explorer, extractor and transporter pools
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(config: PipelineConfig, sink: SharedSink) -> Result<Self, PipelineError> {
        config.validate()?;
        info!(state = ?LifecycleState::Starting, "Lifecycle state changed");

        let shared = Arc::new(SharedState::new(config.extractors, config.transporters));
        let found = Signal::new("found");
        let extracted = Signal::new("extracted");

        for role in [Role::Extractor, Role::Transporter] {
            for index in 1..=config.pool_size(role) {
                sink.emit(PipelineEvent::Waiting {
                    worker: WorkerId::new(role, index),
                });
            }
        }

        let trigger = CancellationToken::new();
        install_interrupt_trigger(trigger.clone());

        let explorers = WorkerPool::spawn(Role::Explorer, config.explorers, |id| {
            Explorer::new(id, found.clone(), sink.clone(), config.explore_delay)
                .with_cycle_limit(config.explorer_cycles)
        });

        let extractor_ctx = ExtractorContext {
            found: found.clone(),
            extracted: extracted.clone(),
            state: Arc::clone(&shared),
            sink: Arc::clone(&sink),
            delay: config.extraction_delay,
            yield_range: config.yield_range,
        };
        let extractors = WorkerPool::spawn(Role::Extractor, config.extractors, |id| {
            Extractor::new(id, extractor_ctx.clone())
        });

        let transporter_ctx = TransporterContext {
            extracted: extracted.clone(),
            state: Arc::clone(&shared),
            sink: Arc::clone(&sink),
            transport_time: config.transport_time,
        };
        let transporters = WorkerPool::spawn(Role::Transporter, config.transporters, |id| {
            Transporter::new(id, transporter_ctx.clone())
        });

        let system = Self {
            state: LifecycleState::Running,
            shared,
            found,
            extracted,
            sink,
            trigger,
            pools: vec![explorers, extractors, transporters],
        };
        info!(
            state = ?system.state,
            explorers = config.explorers,
            extractors = config.extractors,
            transporters = config.transporters,
            "Lifecycle state changed"
        );
        Ok(system)
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Token that starts shutdown when cancelled. The interrupt handler
    /// cancels it on Ctrl-C; callers may cancel it directly.
    pub fn trigger(&self) -> CancellationToken {
        self.trigger.clone()
    }

    pub fn snapshot(&self) -> StateSnapshot {
        self.shared.snapshot()
    }

    pub fn pools(&self) -> &[WorkerPool] {
        &self.pools
    }

    /// Discovery and extraction events published but not yet consumed.
    pub fn pending(&self) -> (usize, usize) {
        (self.found.pending(), self.extracted.pending())
    }

    /// Stays in `Running` until the trigger fires, then shuts down.
    pub async fn run_until_triggered(mut self) -> Result<(), PipelineError> {
        self.trigger.cancelled().await;
        self.shutdown()
    }

    /// Requests cancellation of every worker and returns without waiting.
    ///
    /// Workers stop at their next suspension point. Calling this twice is an
    /// error.
    pub fn shutdown(&mut self) -> Result<(), PipelineError> {
        if self.state == LifecycleState::Terminated {
            return Err(PipelineError::AlreadyShutDown);
        }

        self.state = LifecycleState::ShuttingDown;
        info!(state = ?self.state, "Lifecycle state changed");
        self.trigger.cancel();

        for signal in [&self.found, &self.extracted] {
            debug!(signal = signal.name(), pending = signal.pending(), "Undelivered events");
        }
        self.sink.emit(PipelineEvent::CancelAll);
        for pool in &self.pools {
            debug!(role = %pool.role(), workers = pool.len(), "Cancelling pool");
            pool.cancel_all(self.sink.as_ref());
        }

        self.state = LifecycleState::Terminated;
        self.sink.emit(PipelineEvent::Terminated);
        info!(state = ?self.state, "Lifecycle state changed");
        Ok(())
    }

    /// Shuts down (if not already done) and waits for every worker task.
    ///
    /// # Returns
    ///
    /// - `Ok(snapshot)` with the final shared state once every worker stopped
    /// - `Err(PipelineError::WorkerPanicked)` for the first worker that panicked
    pub async fn shutdown_and_join(mut self) -> Result<StateSnapshot, PipelineError> {
        if self.state != LifecycleState::Terminated {
            self.shutdown()?;
        }

        for pool in self.pools {
            pool.join().await?;
        }

        let snapshot = self.shared.snapshot();
        info!(?snapshot, "All workers stopped");
        Ok(snapshot)
    }
}

/// Cancels `trigger` on Ctrl-C. The listener ends quietly once the trigger is
/// cancelled by anything else.
fn install_interrupt_trigger(trigger: CancellationToken) {
    tokio::spawn(async move {
        tokio::select! {
            _ = trigger.cancelled() => {}
            result = tokio::signal::ctrl_c() => match result {
                Ok(()) => {
                    info!("Interrupt received");
                    trigger.cancel();
                }
                Err(e) => error!(error = %e, "Failed to listen for interrupt"),
            }
        }
    });
}
