//! Completion counters and statistics snapshots.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Statistics about job system utilization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStats {
    /// Number of worker threads.
    pub worker_count: usize,
    /// Units of work submitted so far (one per `execute`, one per dispatch group).
    pub submitted_jobs: u64,
    /// Units of work that finished running, including those that panicked.
    pub completed_jobs: u64,
    /// Units of work whose body panicked.
    pub panicked_jobs: u64,
    /// Items currently waiting in the queue.
    pub queued_jobs: usize,
    /// Slots in the queue, including the always-empty sentinel.
    pub queue_capacity: usize,
}

impl JobStats {
    /// Units submitted but not yet completed.
    #[must_use]
    pub const fn pending_jobs(&self) -> u64 {
        self.submitted_jobs.saturating_sub(self.completed_jobs)
    }
}

/// Submitted/completed counter pair shared by the producer and the workers.
///
/// Both counters only grow. The system is busy while `completed < submitted`.
#[derive(Debug, Default)]
pub(crate) struct JobCounters {
    submitted: AtomicU64,
    completed: AtomicU64,
    panicked: AtomicU64,
}

impl JobCounters {
    pub fn record_submitted(&self, units: u64) {
        self.submitted.fetch_add(units, Ordering::Release);
    }

    pub fn record_completed(&self) {
        self.completed.fetch_add(1, Ordering::Release);
    }

    pub fn record_panicked(&self) {
        self.panicked.fetch_add(1, Ordering::Relaxed);
    }

    /// Lock-free busy check.
    ///
    /// `completed` is read first: it never runs ahead of `submitted`, so
    /// reading it first keeps the snapshot consistent even if more work is
    /// submitted between the two loads.
    pub fn is_busy(&self) -> bool {
        let completed = self.completed.load(Ordering::Acquire);
        let submitted = self.submitted.load(Ordering::Acquire);
        completed < submitted
    }

    pub fn snapshot(&self, worker_count: usize, queued_jobs: usize, queue_capacity: usize) -> JobStats {
        let completed_jobs = self.completed.load(Ordering::Acquire);
        JobStats {
            worker_count,
            submitted_jobs: self.submitted.load(Ordering::Acquire),
            completed_jobs,
            panicked_jobs: self.panicked.load(Ordering::Relaxed),
            queued_jobs,
            queue_capacity,
        }
    }
}
