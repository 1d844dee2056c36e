//! Core job system: queue, workers, submission and completion tracking.

pub mod error;
pub mod job;
pub mod job_system;
pub mod ring_buffer;
pub mod stats;
pub(crate) mod worker;

pub use error::{AppResult, JobSystemError};
pub use job::{group_count, group_range, DispatchArgs, Job};
pub use job_system::JobSystem;
pub use ring_buffer::{RingBuffer, DEFAULT_QUEUE_CAPACITY};
pub use stats::JobStats;
