//! Generated query records and the buffer pool they are drawn from.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Start label for queries that are not bucketed by time.
pub const NOT_TIME_BUCKETED: &str = "n/a";

/// One generated benchmark query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Query {
    /// Groups results of the same kind and parameters.
    pub human_label: String,
    /// Label plus the window start, unique per query in practice.
    pub human_description: String,
    /// Window start as RFC 3339, or [`NOT_TIME_BUCKETED`].
    pub start_label: String,
    /// Query text in the generator's dialect.
    pub body: String,
}

impl Query {
    /// Overwrite all fields in place, reusing existing allocations.
    pub fn populate(&mut self, human_label: &str, start_label: &str, body: &str) {
        self.human_label.clear();
        self.human_label.push_str(human_label);

        self.start_label.clear();
        self.start_label.push_str(start_label);

        self.human_description.clear();
        self.human_description.push_str(human_label);
        self.human_description.push_str(": ");
        self.human_description.push_str(start_label);

        self.body.clear();
        self.body.push_str(body);
    }

    /// Empty every field, keeping capacity.
    pub fn reset(&mut self) {
        self.human_label.clear();
        self.human_description.clear();
        self.start_label.clear();
        self.body.clear();
    }

    /// True when the start label is the [`NOT_TIME_BUCKETED`] sentinel.
    pub fn is_time_bucketed(&self) -> bool {
        self.start_label != NOT_TIME_BUCKETED
    }
}

/// Reusable [`Query`] buffers.
///
/// `checkout` hands out a buffer the caller owns exclusively; `release` gives
/// it back once the transport is done with it. When no idle buffer exists a
/// fresh one is allocated, so a buffer that is never released only costs pool
/// capacity.
#[derive(Debug)]
pub struct QueryPool {
    idle: Mutex<Vec<Query>>,
    max_idle: usize,
    allocated: AtomicU64,
    reused: AtomicU64,
}

impl QueryPool {
    pub const DEFAULT_MAX_IDLE: usize = 1024;

    pub fn new() -> Self {
        Self::with_max_idle(Self::DEFAULT_MAX_IDLE)
    }

    /// Pool that keeps at most `max_idle` released buffers.
    pub fn with_max_idle(max_idle: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            max_idle,
            allocated: AtomicU64::new(0),
            reused: AtomicU64::new(0),
        }
    }

    /// Take an empty buffer.
    pub fn checkout(&self) -> Query {
        let recycled = self.lock_idle().pop();
        match recycled {
            Some(query) => {
                self.reused.fetch_add(1, Ordering::Relaxed);
                query
            }
            None => {
                self.allocated.fetch_add(1, Ordering::Relaxed);
                Query::default()
            }
        }
    }

    /// Return a buffer. Dropped instead when the pool is full.
    pub fn release(&self, mut query: Query) {
        query.reset();
        let mut idle = self.lock_idle();
        if idle.len() < self.max_idle {
            idle.push(query);
        }
    }

    pub fn idle_len(&self) -> usize {
        self.lock_idle().len()
    }

    /// Buffers created because no idle one was available.
    pub fn allocated(&self) -> u64 {
        self.allocated.load(Ordering::Relaxed)
    }

    /// Checkouts served from released buffers.
    pub fn reused(&self) -> u64 {
        self.reused.load(Ordering::Relaxed)
    }

    fn lock_idle(&self) -> std::sync::MutexGuard<'_, Vec<Query>> {
        // A panic while holding the lock cannot leave the Vec inconsistent.
        self.idle
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for QueryPool {
    fn default() -> Self {
        Self::new()
    }
}
