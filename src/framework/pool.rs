//! # Worker Pools
//!
//! A [`WorkerPool`] is a fixed set of workers of one [`Role`], spawned at
//! startup and owned by the lifecycle controller. Each worker gets its own
//! [`CancellationToken`]; the pool is the only place those tokens are kept, so
//! nothing but the owner of the pool can stop a worker.

use crate::framework::error::PipelineError;
use crate::framework::sink::EventSink;
use crate::model::{PipelineEvent, Role, WorkerId};
use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// One long-running pipeline worker.
///
/// Implementations loop until `cancel` fires and must only observe the token at
/// their suspension points (timed work and handoff waits), never inside a
/// critical section.
#[async_trait]
pub trait Worker: Send + 'static {
    fn id(&self) -> WorkerId;

    async fn run(self, cancel: CancellationToken);
}

/// A spawned worker: its identity, its stop token and its task.
#[derive(Debug)]
pub struct WorkerHandle {
    id: WorkerId,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl WorkerHandle {
    pub fn id(&self) -> WorkerId {
        self.id
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Fixed-size group of workers sharing a role.
#[derive(Debug)]
pub struct WorkerPool {
    role: Role,
    workers: Vec<WorkerHandle>,
}

impl WorkerPool {
    /// Spawns `count` workers built by `make`, numbered from 1.
    pub fn spawn<W, F>(role: Role, count: usize, mut make: F) -> Self
    where
        W: Worker,
        F: FnMut(WorkerId) -> W,
    {
        let workers = (1..=count)
            .map(|index| {
                let worker = make(WorkerId::new(role, index));
                let id = worker.id();
                let cancel = CancellationToken::new();
                let task = tokio::spawn(worker.run(cancel.clone()));
                debug!(%id, "Worker spawned");
                WorkerHandle { id, cancel, task }
            })
            .collect();
        Self { role, workers }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    pub fn workers(&self) -> &[WorkerHandle] {
        &self.workers
    }

    /// Requests cancellation of every worker, reporting each request.
    ///
    /// Returns immediately; a worker stops at its next suspension point.
    pub fn cancel_all(&self, sink: &dyn EventSink) {
        for worker in &self.workers {
            worker.cancel.cancel();
            sink.emit(PipelineEvent::Cancelling { worker: worker.id });
        }
    }

    /// Waits for every worker task to end.
    ///
    /// Only meaningful after [`cancel_all`](Self::cancel_all) or for workers
    /// that stop on their own.
    pub async fn join(self) -> Result<(), PipelineError> {
        for worker in self.workers {
            worker
                .task
                .await
                .map_err(|source| PipelineError::WorkerPanicked {
                    worker: worker.id,
                    source,
                })?;
            debug!(id = %worker.id, "Worker joined");
        }
        Ok(())
    }
}
