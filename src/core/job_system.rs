//! The job system: a fixed worker pool fed by one bounded queue.
//!
//! Submission bumps a "submitted" counter before enqueueing, workers bump a
//! "completed" counter after running each item, and the system is busy while
//! the two differ. Producers never park: when the queue is full, and while
//! waiting for completion, they wake a worker and yield (the poll step).
//!
//! # Example
//!
//! ```
//! use prometheus_job_system::{JobSystem, JobSystemConfig};
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use std::sync::Arc;
//!
//! let jobs = JobSystem::new(JobSystemConfig::new().with_worker_count(2))?;
//! let sum = Arc::new(AtomicU32::new(0));
//!
//! let sink = Arc::clone(&sum);
//! jobs.dispatch(100, 10, move |args| {
//!     sink.fetch_add(args.job_index, Ordering::Relaxed);
//! });
//! jobs.wait();
//!
//! assert_eq!(sum.load(Ordering::Relaxed), (0..100).sum::<u32>());
//! # Ok::<(), prometheus_job_system::JobSystemError>(())
//! ```

use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};

use crate::config::JobSystemConfig;
use crate::core::error::JobSystemError;
use crate::core::job::{group_count, group_job, DispatchArgs, Job};
use crate::core::stats::JobStats;
use crate::core::worker::{spawn_worker, Shared};

/// Fixed-size pool of worker threads with counter-based completion tracking.
///
/// Dropping the job system (or calling [`JobSystem::shutdown`]) lets the
/// workers finish everything already queued, then joins them.
pub struct JobSystem {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
    worker_count: usize,
}

impl JobSystem {
    /// Create a job system and start its workers.
    ///
    /// Counters start at zero. The worker count is `max(1, hardware threads)`
    /// unless the configuration fixes it.
    ///
    /// # Errors
    ///
    /// - `JobSystemError::InvalidConfig` if the configuration is invalid
    /// - `JobSystemError::WorkerSpawn` if a worker thread cannot be created;
    ///   workers started before the failure are stopped and joined
    pub fn new(config: JobSystemConfig) -> Result<Self, JobSystemError> {
        config.validate().map_err(JobSystemError::InvalidConfig)?;

        let worker_count = config.resolved_worker_count();
        let shared = Arc::new(Shared::new(config.queue_capacity));

        let mut workers = Vec::with_capacity(worker_count);
        for worker_id in 0..worker_count {
            match spawn_worker(worker_id, Arc::clone(&shared), &config) {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    warn!(worker_id = worker_id, error = %e, "Worker spawn failed, stopping pool");
                    stop_workers(&shared, &mut workers);
                    return Err(e);
                }
            }
        }

        info!(
            worker_count = worker_count,
            queue_capacity = config.queue_capacity,
            "JobSystem initialized"
        );

        Ok(Self {
            shared,
            workers,
            worker_count,
        })
    }

    /// Create a job system with the default configuration.
    ///
    /// # Errors
    ///
    /// See [`JobSystem::new`].
    pub fn with_defaults() -> Result<Self, JobSystemError> {
        Self::new(JobSystemConfig::default())
    }

    /// Submit a single job.
    ///
    /// Returns once the job is queued. While the queue is full the caller
    /// wakes a worker and yields, then retries.
    pub fn execute<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.shared.counters.record_submitted(1);
        self.enqueue(Box::new(job));
    }

    /// Run `job` once for every index in `[0, job_count)`, in groups of
    /// `group_size` consecutive indices.
    ///
    /// Each group is one queued item and one unit of submitted work; its
    /// indices run in order on a single worker. Does nothing if `job_count`
    /// or `group_size` is zero. Returns once every group is queued.
    pub fn dispatch<F>(&self, job_count: u32, group_size: u32, job: F)
    where
        F: Fn(DispatchArgs) + Send + Sync + 'static,
    {
        let groups = group_count(job_count, group_size);
        if groups == 0 {
            return;
        }

        self.shared.counters.record_submitted(u64::from(groups));
        let job = Arc::new(job);
        for group_index in 0..groups {
            self.enqueue(group_job(Arc::clone(&job), group_index, group_size, job_count));
        }
    }

    /// Whether any submitted work has not completed yet.
    ///
    /// Lock-free snapshot; the answer may be stale by the time it is used.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.shared.counters.is_busy()
    }

    /// Block until all submitted work has completed.
    ///
    /// Spins on the poll step rather than parking, so the caller keeps
    /// nudging sleeping workers while it waits. Callers that need a deadline
    /// can poll [`JobSystem::is_busy`] against their own clock instead.
    pub fn wait(&self) {
        while self.is_busy() {
            self.shared.poll();
        }
    }

    /// Wait for all submitted work from an async context.
    ///
    /// Same loop as [`JobSystem::wait`], yielding to the tokio scheduler
    /// between checks instead of the OS.
    #[cfg(feature = "tokio-runtime")]
    pub async fn wait_async(&self) {
        while self.is_busy() {
            self.shared.signal_one();
            tokio::task::yield_now().await;
        }
    }

    /// Number of worker threads.
    #[must_use]
    pub const fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Get current statistics.
    #[must_use]
    pub fn stats(&self) -> JobStats {
        self.shared.counters.snapshot(
            self.worker_count,
            self.shared.queue.len(),
            self.shared.queue.capacity(),
        )
    }

    /// Finish queued work, stop the workers and join them.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn enqueue(&self, job: Job) {
        let mut pending = job;
        let mut backed_off = false;
        while let Err(rejected) = self.shared.queue.push_back(pending) {
            pending = rejected;
            if !backed_off {
                debug!(
                    queue_capacity = self.shared.queue.capacity(),
                    "Job queue is full, backing off"
                );
                backed_off = true;
            }
            self.shared.poll();
        }
        self.shared.signal_one();
    }

    fn stop(&mut self) {
        if self.workers.is_empty() {
            return;
        }
        info!("Shutting down job system");
        stop_workers(&self.shared, &mut self.workers);
        info!(worker_count = self.worker_count, "Job system shut down complete");
    }
}

/// Signal shutdown and join every worker except the calling thread.
///
/// The last handle to a job system can be dropped inside one of its own jobs;
/// that worker cannot join itself and exits on its own once the queue is empty.
fn stop_workers(shared: &Shared, workers: &mut Vec<JoinHandle<()>>) {
    shared.request_shutdown();
    let current = thread::current().id();
    for (worker_id, worker) in workers.drain(..).enumerate() {
        if worker.thread().id() == current {
            debug!(worker_id = worker_id, "Job system dropped on its own worker, detaching it");
            continue;
        }
        match worker.join() {
            Ok(()) => debug!(worker_id = worker_id, "Worker joined successfully"),
            Err(_) => warn!(worker_id = worker_id, "Worker panicked"),
        }
    }
}

impl Drop for JobSystem {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for JobSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobSystem")
            .field("worker_count", &self.worker_count)
            .field("stats", &self.stats())
            .finish()
    }
}
