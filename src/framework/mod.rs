//! Generic building blocks for running a staged worker pipeline.
//!
//! # Main Components
//!
//! - [`Signal`] - Counting semaphore that hands events from one stage to the next
//! - [`Worker`] / [`WorkerPool`] - Fixed-size, individually cancellable groups of workers
//! - [`EventSink`] - Serialized destination for reported events
//! - [`PipelineError`] - Errors raised while starting or stopping a pipeline
//!
//! # Testing
//!
//! See [`mock`] module for a sink that records events instead of printing them.

pub mod error;
pub mod mock;
pub mod pool;
pub mod signal;
pub mod sink;

pub use error::*;
pub use pool::*;
pub use signal::*;
pub use sink::*;
