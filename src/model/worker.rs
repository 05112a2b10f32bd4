use serde::{Deserialize, Serialize};

use std::fmt::Display;

/// The three worker roles of the pipeline.
///
/// Each role runs as a fixed-size pool for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Explorer,
    Extractor,
    Transporter,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Explorer => "Explorer",
            Role::Extractor => "Extractor",
            Role::Transporter => "Transporter",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a single worker: its role plus a 1-based index within the pool.
///
/// Renders as `Explorer-1`, `Extractor-3`, etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkerId {
    pub role: Role,
    pub index: usize,
}

impl WorkerId {
    pub fn new(role: Role, index: usize) -> Self {
        Self { role, index }
    }

    /// Zero-based position of this worker, used to address per-worker slots.
    pub fn slot(&self) -> usize {
        self.index.saturating_sub(1)
    }
}

impl Display for WorkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.role, self.index)
    }
}
