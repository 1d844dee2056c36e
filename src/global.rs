//! Process-wide job system with a free-function API.
//!
//! For code that wants one shared pool without threading a [`JobSystem`]
//! handle around. The instance is installed once by [`initialize`] and lives
//! until the process exits; it is never shut down.
//!
//! ```
//! use prometheus_job_system::global;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//!
//! // Another part of the process may have installed it already.
//! let _ = global::initialize();
//!
//! let done = Arc::new(AtomicBool::new(false));
//! let flag = Arc::clone(&done);
//! global::execute(move || flag.store(true, Ordering::Release))?;
//! global::wait();
//! assert!(done.load(Ordering::Acquire));
//! # Ok::<(), prometheus_job_system::JobSystemError>(())
//! ```

use std::sync::OnceLock;

use parking_lot::Mutex;
use tracing::debug;

use crate::config::JobSystemConfig;
use crate::core::{DispatchArgs, JobSystem, JobSystemError};

static GLOBAL: OnceLock<JobSystem> = OnceLock::new();
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Install the process-wide job system with the default configuration.
///
/// # Errors
///
/// - `JobSystemError::AlreadyInitialized` on any call after the first success
/// - any error from [`JobSystem::new`]
pub fn initialize() -> Result<(), JobSystemError> {
    initialize_with(JobSystemConfig::default())
}

/// Install the process-wide job system with `config`.
///
/// Concurrent callers are serialized, so only the winner ever starts worker
/// threads; the others return `AlreadyInitialized` without building a pool.
///
/// # Errors
///
/// See [`initialize`].
pub fn initialize_with(config: JobSystemConfig) -> Result<(), JobSystemError> {
    let _init = INIT_LOCK.lock();
    if GLOBAL.get().is_some() {
        return Err(JobSystemError::AlreadyInitialized);
    }
    let system = JobSystem::new(config)?;
    GLOBAL.set(system).map_err(|_| JobSystemError::AlreadyInitialized)?;
    debug!("Process-wide job system installed");
    Ok(())
}

/// The process-wide job system, if installed.
#[must_use]
pub fn instance() -> Option<&'static JobSystem> {
    GLOBAL.get()
}

fn require() -> Result<&'static JobSystem, JobSystemError> {
    GLOBAL.get().ok_or(JobSystemError::NotInitialized)
}

/// Submit a single job to the process-wide job system.
///
/// # Errors
///
/// Returns `JobSystemError::NotInitialized` before [`initialize`].
pub fn execute<F>(job: F) -> Result<(), JobSystemError>
where
    F: FnOnce() + Send + 'static,
{
    require()?.execute(job);
    Ok(())
}

/// Grouped dispatch on the process-wide job system.
///
/// # Errors
///
/// Returns `JobSystemError::NotInitialized` before [`initialize`].
pub fn dispatch<F>(job_count: u32, group_size: u32, job: F) -> Result<(), JobSystemError>
where
    F: Fn(DispatchArgs) + Send + Sync + 'static,
{
    require()?.dispatch(job_count, group_size, job);
    Ok(())
}

/// Whether the process-wide job system has unfinished work.
///
/// `false` when it was never initialized.
#[must_use]
pub fn is_busy() -> bool {
    GLOBAL.get().is_some_and(JobSystem::is_busy)
}

/// Wait for the process-wide job system to go idle.
///
/// Returns immediately when it was never initialized.
pub fn wait() {
    if let Some(system) = GLOBAL.get() {
        system.wait();
    }
}
