//! # Shared State
//!
//! Idle-worker counters for the extractor and transporter pools, plus one
//! [`YieldRecord`](SharedState::yield_of) slot per extractor.
//!
//! ## Locking rules
//!
//! - Idle counts are only touched inside [`SharedState`]'s critical section,
//!   which never spans an `.await`. Timed work always happens outside it.
//! - Every mutating call takes a `report` closure that runs inside the critical
//!   section with the count it just produced. Reports of one role therefore come
//!   out in exactly the order of the updates, each one step from the previous.
//! - Lock order is state lock, then print lock. A report may take the print
//!   lock; nothing holding the print lock ever calls back into the state.
//! - The critical section is not reentrant. Calling back into the state from a
//!   `report` closure panics instead of deadlocking.
//! - Yield slots are single-writer (the owning extractor) and use atomics, so
//!   storing a yield does not take the lock. Resetting a slot at the start of an
//!   extraction happens inside the critical section together with the decrement.

use crate::model::{Role, WorkerId};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};

thread_local! {
    // True while this thread is inside a critical section.
    static IN_CRITICAL: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as inside a critical section until dropped,
/// including when the section unwinds.
struct CriticalGuard;

impl CriticalGuard {
    fn enter() -> Self {
        let reentered = IN_CRITICAL.with(|held| held.replace(true));
        assert!(!reentered, "shared state critical section entered twice");
        CriticalGuard
    }
}

impl Drop for CriticalGuard {
    fn drop(&mut self) {
        IN_CRITICAL.with(|held| held.set(false));
    }
}

#[derive(Debug)]
struct IdleCounts {
    extractors: usize,
    transporters: usize,
}

/// Point-in-time copy of the shared state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub idle_extractors: usize,
    pub idle_transporters: usize,
    /// Last yield of each extractor, indexed by slot (`Extractor-1` is 0).
    pub yields: Vec<u32>,
}

#[derive(Debug)]
pub struct SharedState {
    idle: Mutex<IdleCounts>,
    extractor_pool: usize,
    transporter_pool: usize,
    yields: Box<[AtomicU32]>,
}

impl SharedState {
    /// Creates state with every worker idle and every yield at zero.
    pub fn new(extractors: usize, transporters: usize) -> Self {
        Self {
            idle: Mutex::new(IdleCounts {
                extractors,
                transporters,
            }),
            extractor_pool: extractors,
            transporter_pool: transporters,
            yields: (0..extractors).map(|_| AtomicU32::new(0)).collect(),
        }
    }

    fn critical<R>(&self, f: impl FnOnce(&mut IdleCounts) -> R) -> R {
        // Checked before locking: a nested lock() on the same thread would
        // deadlock rather than fail.
        let _guard = CriticalGuard::enter();
        let mut idle = self.idle.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut idle)
    }

    pub fn pool_size(&self, role: Role) -> usize {
        match role {
            Role::Extractor => self.extractor_pool,
            Role::Transporter => self.transporter_pool,
            Role::Explorer => 0,
        }
    }

    /// Marks `worker` busy and clears its yield, then reports the new idle
    /// count before releasing the lock.
    pub fn begin_extraction(&self, worker: WorkerId, report: impl FnOnce(usize)) -> usize {
        self.critical(|idle| {
            debug_assert!(idle.extractors > 0, "no idle extractor for {worker}");
            idle.extractors = idle.extractors.saturating_sub(1);
            if let Some(slot) = self.yields.get(worker.slot()) {
                slot.store(0, Ordering::Release);
            }
            report(idle.extractors);
            idle.extractors
        })
    }

    /// Stores the quantity `worker` just produced. Lock-free: only the owning
    /// extractor writes its slot.
    pub fn record_yield(&self, worker: WorkerId, quantity: u32) {
        if let Some(slot) = self.yields.get(worker.slot()) {
            slot.store(quantity, Ordering::Release);
        }
    }

    /// Marks one extractor idle again and reports the new idle count before
    /// releasing the lock.
    pub fn finish_extraction(&self, report: impl FnOnce(usize)) -> usize {
        let pool = self.pool_size(Role::Extractor);
        self.critical(|idle| {
            debug_assert!(idle.extractors < pool);
            idle.extractors = (idle.extractors + 1).min(pool);
            report(idle.extractors);
            idle.extractors
        })
    }

    /// Marks one transporter busy and reports the new idle count before
    /// releasing the lock.
    pub fn begin_transport(&self, report: impl FnOnce(usize)) -> usize {
        self.critical(|idle| {
            debug_assert!(idle.transporters > 0, "no idle transporter");
            idle.transporters = idle.transporters.saturating_sub(1);
            report(idle.transporters);
            idle.transporters
        })
    }

    /// Marks one transporter idle again and reports the new idle count before
    /// releasing the lock.
    pub fn finish_transport(&self, report: impl FnOnce(usize)) -> usize {
        let pool = self.pool_size(Role::Transporter);
        self.critical(|idle| {
            debug_assert!(idle.transporters < pool);
            idle.transporters = (idle.transporters + 1).min(pool);
            report(idle.transporters);
            idle.transporters
        })
    }

    /// Last quantity produced by `worker`, or 0 while it is extracting.
    pub fn yield_of(&self, worker: WorkerId) -> u32 {
        self.yields
            .get(worker.slot())
            .map_or(0, |slot| slot.load(Ordering::Acquire))
    }

    pub fn snapshot(&self) -> StateSnapshot {
        let (idle_extractors, idle_transporters) =
            self.critical(|idle| (idle.extractors, idle.transporters));
        StateSnapshot {
            idle_extractors,
            idle_transporters,
            yields: self
                .yields
                .iter()
                .map(|slot| slot.load(Ordering::Acquire))
                .collect(),
        }
    }
}
