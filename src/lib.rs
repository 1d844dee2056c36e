//! # Prometheus Job System
//!
//! A lightweight in-process job scheduler: a fixed pool of worker threads
//! that run short-lived jobs submitted from a producer thread, plus a cheap
//! way for the producer to know when everything it submitted has finished.
//!
//! ## How it works
//!
//! - **Bounded queue**: one lock-protected ring buffer (256 slots by default)
//!   shared by all workers. No work stealing, no priorities.
//! - **Workers**: `max(1, hardware threads)` OS threads, each popping a job,
//!   running it, and bumping a completed counter; idle workers sleep on a
//!   condition variable.
//! - **Completion tracking**: submission bumps a submitted counter. The system
//!   is busy while `completed < submitted`; [`JobSystem::wait`] spins with a
//!   poll step (wake a worker, yield) until the two match.
//!
//! ## Submitting work
//!
//! ```rust
//! use prometheus_job_system::{DispatchArgs, JobSystem, JobSystemConfig};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let jobs = JobSystem::new(JobSystemConfig::new().with_worker_count(4))?;
//! let counter = Arc::new(AtomicUsize::new(0));
//!
//! // One job.
//! let c = Arc::clone(&counter);
//! jobs.execute(move || {
//!     c.fetch_add(1, Ordering::Relaxed);
//! });
//!
//! // Parallel-for: 100 indices in groups of 10, one queued item per group.
//! let c = Arc::clone(&counter);
//! jobs.dispatch(100, 10, move |args: DispatchArgs| {
//!     debug_assert_eq!(args.group_index, args.job_index / 10);
//!     c.fetch_add(1, Ordering::Relaxed);
//! });
//!
//! jobs.wait();
//! assert_eq!(counter.load(Ordering::Relaxed), 101);
//! # Ok::<(), prometheus_job_system::JobSystemError>(())
//! ```
//!
//! A panicking job is caught, logged and counted as completed, so `wait`
//! never hangs on it. Dropping a [`JobSystem`] drains the queue and joins the
//! workers. For a single process-wide pool see [`global`].

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core job system: queue, workers, submission and completion tracking.
pub mod core;
/// Configuration for worker count, queue size and thread setup.
pub mod config;
/// Process-wide job system behind free functions.
pub mod global;
/// Shared utilities.
pub mod util;

pub use crate::config::JobSystemConfig;
pub use crate::core::{DispatchArgs, JobStats, JobSystem, JobSystemError};
