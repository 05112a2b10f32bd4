//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global subscriber once, at process start.
//!
//! ## Configuration
//!
//! Compact format without the crate/module prefix (`with_target(false)`).
//! Verbosity comes from `RUST_LOG` and defaults to `info`:
//!
//! ```bash
//! # Pipeline events only
//! cargo run
//!
//! # Also show worker spawn/join and abandoned work
//! RUST_LOG=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Pipeline events** (`info`): every [`PipelineEvent`](crate::model::PipelineEvent),
//!   written by [`TracingSink`](crate::framework::TracingSink) with `role`,
//!   `worker` and `idle` fields
//! - **Lifecycle** (`info`): state changes of the
//!   [`MiningSystem`](super::MiningSystem)
//! - **Workers** (`debug`): spawn, join, cancellation and abandoned work
//!
//! ## Output Example
//!
//! ```text
//! INFO Extractor-2: waiting...
//! INFO Explorer-1: exploring...
//! INFO Explorer-1: target found
//! INFO Extractor-1: mining...	Idle extractors: 2 role=Extractor worker=1 idle=2
//! INFO Extractor-1: mined quantity = 5	Idle extractors: 3 role=Extractor worker=1 idle=3
//! INFO Transporter-1: transporting...	Idle transporters: 2 role=Transporter worker=1 idle=2
//! ```
use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
