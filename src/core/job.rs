//! Job representation and grouped-dispatch partitioning.

use std::ops::Range;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A unit of work sitting in the queue.
///
/// The queue never inspects a job; it only needs to be able to call it once.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Identifies one invocation of a grouped callable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DispatchArgs {
    /// Logical index of the unit of work, in `[0, job_count)`.
    pub job_index: u32,
    /// Index of the group this invocation belongs to.
    pub group_index: u32,
}

/// Number of groups needed to cover `job_count` indices in chunks of
/// `group_size`. Zero when either argument is zero.
#[must_use]
pub const fn group_count(job_count: u32, group_size: u32) -> u32 {
    if job_count == 0 || group_size == 0 {
        return 0;
    }
    job_count.div_ceil(group_size)
}

/// Job indices covered by group `group_index`.
///
/// The last group is truncated at `job_count`.
#[must_use]
pub fn group_range(group_index: u32, group_size: u32, job_count: u32) -> Range<u32> {
    let offset = group_index.saturating_mul(group_size).min(job_count);
    let end = offset.saturating_add(group_size).min(job_count);
    offset..end
}

/// Build the closure that runs one group of a dispatch.
///
/// Every index of the group is handed to `f` in order, on the calling thread.
pub(crate) fn group_job<F>(f: Arc<F>, group_index: u32, group_size: u32, job_count: u32) -> Job
where
    F: Fn(DispatchArgs) + Send + Sync + 'static,
{
    Box::new(move || {
        for job_index in group_range(group_index, group_size, job_count) {
            f(DispatchArgs { job_index, group_index });
        }
    })
}
