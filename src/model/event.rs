//! # Pipeline Events
//!
//! Every observable state transition of the pipeline is one [`PipelineEvent`].
//! The set of events is part of the system contract; the wording produced by
//! [`Display`] is presentation only.

use super::{Role, WorkerId};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A single reportable transition, emitted through an
/// [`EventSink`](crate::framework::EventSink).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// Initial idle status of an extractor or transporter, reported at startup.
    Waiting { worker: WorkerId },
    /// An explorer started searching.
    Exploring { worker: WorkerId },
    /// An explorer found material; one discovery event is published.
    TargetFound { worker: WorkerId },
    /// An extractor claimed a discovery. `idle` is the idle extractor count
    /// right after the decrement.
    Extracting { worker: WorkerId, idle: usize },
    /// An extractor finished. `idle` is the idle extractor count right after
    /// the increment.
    Extracted {
        worker: WorkerId,
        quantity: u32,
        idle: usize,
    },
    /// A transporter claimed an extraction.
    Transporting { worker: WorkerId, idle: usize },
    /// A transporter finished and is waiting again.
    Transported { worker: WorkerId, idle: usize },
    /// An extractor or transporter was cancelled mid-work and gave its slot
    /// back. `idle` is the idle count of its role right after the increment.
    Abandoned { worker: WorkerId, idle: usize },
    /// Shutdown started.
    CancelAll,
    /// Cancellation was requested for one worker.
    Cancelling { worker: WorkerId },
    /// Every worker has been signaled to stop.
    Terminated,
}

impl PipelineEvent {
    /// The worker this event is about, if any.
    pub fn worker(&self) -> Option<WorkerId> {
        match self {
            PipelineEvent::Waiting { worker }
            | PipelineEvent::Exploring { worker }
            | PipelineEvent::TargetFound { worker }
            | PipelineEvent::Extracting { worker, .. }
            | PipelineEvent::Extracted { worker, .. }
            | PipelineEvent::Transporting { worker, .. }
            | PipelineEvent::Transported { worker, .. }
            | PipelineEvent::Abandoned { worker, .. }
            | PipelineEvent::Cancelling { worker } => Some(*worker),
            PipelineEvent::CancelAll | PipelineEvent::Terminated => None,
        }
    }

    /// The idle count carried by the event, if it reports one.
    pub fn idle(&self) -> Option<usize> {
        match self {
            PipelineEvent::Extracting { idle, .. }
            | PipelineEvent::Extracted { idle, .. }
            | PipelineEvent::Transporting { idle, .. }
            | PipelineEvent::Transported { idle, .. }
            | PipelineEvent::Abandoned { idle, .. } => Some(*idle),
            _ => None,
        }
    }
}

impl Display for PipelineEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineEvent::Waiting { worker } => write!(f, "{worker}: waiting..."),
            PipelineEvent::Exploring { worker } => write!(f, "{worker}: exploring..."),
            PipelineEvent::TargetFound { worker } => write!(f, "{worker}: target found"),
            PipelineEvent::Extracting { worker, idle } => {
                write!(f, "{worker}: mining...\tIdle extractors: {idle}")
            }
            PipelineEvent::Extracted {
                worker,
                quantity,
                idle,
            } => write!(
                f,
                "{worker}: mined quantity = {quantity}\tIdle extractors: {idle}"
            ),
            PipelineEvent::Transporting { worker, idle } => {
                write!(f, "{worker}: transporting...\tIdle transporters: {idle}")
            }
            PipelineEvent::Transported { worker, idle } => {
                write!(f, "{worker}: waiting...\tIdle transporters: {idle}")
            }
            PipelineEvent::Abandoned { worker, idle } => {
                let pool = match worker.role {
                    Role::Transporter => "transporters",
                    _ => "extractors",
                };
                write!(f, "{worker}: work abandoned\tIdle {pool}: {idle}")
            }
            PipelineEvent::CancelAll => f.write_str("Cancel all workers"),
            PipelineEvent::Cancelling { worker } => write!(f, "Cancelling {worker}"),
            PipelineEvent::Terminated => f.write_str("Terminated."),
        }
    }
}
