//! Worker threads and the state they share with the submitting side.
//!
//! Every worker runs the same pull loop: pop a job, run it, bump the
//! completed counter. When the queue is empty the worker parks on a
//! `parking_lot::Condvar` until a producer signals it.
//!
//! # Wake protocol
//!
//! Producers signal while holding the wake lock, and a worker re-checks the
//! queue under that same lock before it goes to sleep. A push that lands
//! between a worker's failed pop and its sleep is therefore always followed
//! by a notification the worker can observe.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::{Condvar, Mutex};
use tracing::{debug, error, trace, warn};

use crate::config::JobSystemConfig;
use crate::core::error::JobSystemError;
use crate::core::job::Job;
use crate::core::ring_buffer::RingBuffer;
use crate::core::stats::JobCounters;

/// State guarded by the wake lock.
#[derive(Debug, Default)]
pub(crate) struct WakeState {
    /// Set once when the owning job system is torn down.
    pub shutdown: bool,
}

/// Everything the producer and the workers share.
pub(crate) struct Shared {
    pub queue: RingBuffer<Job>,
    pub counters: JobCounters,
    wake_state: Mutex<WakeState>,
    wake_condvar: Condvar,
}

impl Shared {
    pub fn new(queue_capacity: usize) -> Self {
        Self {
            queue: RingBuffer::new(queue_capacity),
            counters: JobCounters::default(),
            wake_state: Mutex::new(WakeState::default()),
            wake_condvar: Condvar::new(),
        }
    }

    /// Wake one sleeping worker, if any.
    pub fn signal_one(&self) {
        let _state = self.wake_state.lock();
        self.wake_condvar.notify_one();
    }

    /// Poll step: wake one worker and give up the rest of this time slice.
    pub fn poll(&self) {
        self.signal_one();
        thread::yield_now();
    }

    /// Ask every worker to exit once the queue is drained.
    pub fn request_shutdown(&self) {
        let mut state = self.wake_state.lock();
        state.shutdown = true;
        self.wake_condvar.notify_all();
    }
}

/// Spawn worker `worker_id` running the pull loop over `shared`.
pub(crate) fn spawn_worker(
    worker_id: usize,
    shared: Arc<Shared>,
    config: &JobSystemConfig,
) -> Result<JoinHandle<()>, JobSystemError> {
    let mut builder = thread::Builder::new().name(format!("{}-{worker_id}", config.thread_name_prefix));
    if let Some(stack_size) = config.thread_stack_size {
        builder = builder.stack_size(stack_size);
    }
    let pin_to_cores = config.pin_to_cores;

    builder
        .spawn(move || {
            if pin_to_cores {
                pin_current_thread(worker_id);
            }
            debug!(worker_id = worker_id, "Worker thread started");
            run_worker(worker_id, &shared);
            debug!(worker_id = worker_id, "Worker thread exiting");
        })
        .map_err(|source| JobSystemError::WorkerSpawn { worker_id, source })
}

fn run_worker(worker_id: usize, shared: &Shared) {
    loop {
        if let Some(job) = shared.queue.pop_front() {
            run_job(worker_id, shared, job);
            continue;
        }

        let mut state = shared.wake_state.lock();
        if state.shutdown {
            break;
        }
        if shared.queue.is_empty() {
            shared.wake_condvar.wait(&mut state);
        }
    }
}

/// Run one job and record its completion.
///
/// A panicking job is logged and still counted as completed, so `wait`
/// cannot spin forever on work that will never finish.
fn run_job(worker_id: usize, shared: &Shared, job: Job) {
    trace!(worker_id = worker_id, "Worker executing job");
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(job)) {
        shared.counters.record_panicked();
        error!(
            worker_id = worker_id,
            panic = %panic_message(payload.as_ref()),
            "Job panicked"
        );
    }
    shared.counters.record_completed();
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

#[cfg(feature = "affinity")]
fn pin_current_thread(worker_id: usize) {
    let cores = match core_affinity::get_core_ids() {
        Some(cores) if !cores.is_empty() => cores,
        _ => {
            warn!(worker_id = worker_id, "Failed to get core IDs, skipping affinity");
            return;
        }
    };
    let core = cores[worker_id % cores.len()];
    if core_affinity::set_for_current(core) {
        debug!(worker_id = worker_id, core = core.id, "Worker pinned to core");
    } else {
        warn!(worker_id = worker_id, core = core.id, "Failed to pin worker to core");
    }
}

#[cfg(not(feature = "affinity"))]
fn pin_current_thread(worker_id: usize) {
    warn!(
        worker_id = worker_id,
        "Core pinning requested but the `affinity` feature is disabled"
    );
}
