//! # Mining Pipeline
//!
//! > **A three-stage worker pipeline coordinated by counting semaphores.**
//!
//! Explorers discover material, extractors mine it and transporters haul it
//! away. Each stage runs as a fixed pool of Tokio tasks; stages hand work to
//! each other through payload-less counting semaphores, and the only mutable
//! shared data (idle counters and per-extractor yields) sits behind a single
//! lock.
//!
//! ## 🏗️ Data Flow
//!
//! ```text
//! Explorer ──found──▶ Extractor ──extracted──▶ Transporter
//! ```
//!
//! - Every `found` unit is consumed by exactly one extractor, and every
//!   extraction publishes exactly one `extracted` unit.
//! - Which worker picks up which unit is not specified, and the two signals are
//!   independent of each other.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Two separate locks
//! Idle counts are guarded by [`SharedState`](state::SharedState). Output is
//! serialized by the [`EventSink`](framework::EventSink). Idle-count reports
//! are emitted inside the state's critical section, so the locks always nest in
//! one order: state, then print. Neither is held across an `.await`.
//!
//! ### 2. Cooperative cancellation
//! Each worker owns a `CancellationToken` and checks it only at its suspension
//! points (`tokio::select!` over the token and the sleep or signal wait).
//!
//! ### 3. Explicit ownership
//! The [`MiningSystem`](lifecycle::MiningSystem) holds every
//! [`WorkerPool`](framework::WorkerPool). There are no global arrays of handles.
//!
//! ## 🗺️ Module Tour
//!
//! - [`framework`]: signals, worker pools, event sinks, errors.
//! - [`model`]: worker identities, events, configuration.
//! - [`state`]: the shared idle counters and yields.
//! - [`explorer`], [`extractor`], [`transporter`]: the three roles.
//! - [`lifecycle`]: startup, interrupt handling, shutdown and tracing setup.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run until Ctrl-C
//! cargo run
//!
//! # Include worker debug logs
//! RUST_LOG=debug cargo run
//! ```

pub mod explorer;
pub mod extractor;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod state;
pub mod transporter;
