//! Plain data shared by every part of the pipeline: worker identities,
//! reportable events and configuration.

pub mod config;
pub mod error;
pub mod event;
pub mod worker;

pub use config::*;
pub use error::*;
pub use event::*;
pub use worker::*;
