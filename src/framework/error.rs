//! # Pipeline Errors
//!
//! The synchronization core is infallible. These errors only cover starting
//! and stopping a pipeline.

use crate::model::{ConfigError, WorkerId};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("Worker {worker} panicked: {source}")]
    WorkerPanicked {
        worker: WorkerId,
        #[source]
        source: tokio::task::JoinError,
    },
    #[error("Pipeline already shut down")]
    AlreadyShutDown,
}
