//! # System Lifecycle & Orchestration
//!
//! This module starts, owns and stops every worker of the pipeline.
//!
//! ## States
//!
//! ```text
//! Starting ──▶ Running ──▶ ShuttingDown ──▶ Terminated
//! ```
//!
//! - **Starting**: shared state and signals are created, extractors and
//!   transporters report that they are waiting, the interrupt trigger is
//!   installed and all pools are spawned.
//! - **Running**: no supervision. Workers loop independently until the trigger
//!   fires.
//! - **ShuttingDown**: every worker's token is cancelled, one report per worker.
//! - **Terminated**: all workers have been told to stop. [`MiningSystem::shutdown`]
//!   does not wait for them; [`MiningSystem::shutdown_and_join`] does.
//!
//! ## Cancellation
//!
//! Cancellation is cooperative. A worker notices it only while parked on a
//! handoff signal or during its timed work, never inside the shared-state
//! critical section, so idle counts can't be left half-updated.
//!
//! ## Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging for the binary.
//! See the [`tracing`] module for the output format.

pub mod mining_system;
pub mod tracing;

pub use self::mining_system::*;
pub use self::tracing::*;
