//! Error types for job system operations.

use thiserror::Error;

/// Errors produced while building or addressing a job system.
///
/// Submission itself never fails: a full queue is absorbed by retrying, and a
/// zero-sized dispatch is a no-op. Errors only surface at construction time or
/// when the process-wide instance is used before it exists.
#[derive(Debug, Error)]
pub enum JobSystemError {
    /// Configuration validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Configuration could not be parsed from its source.
    #[error("config error: {0}")]
    Config(String),
    /// The OS refused to create a worker thread.
    #[error("failed to spawn worker {worker_id}: {source}")]
    WorkerSpawn {
        /// Index of the worker that could not be started.
        worker_id: usize,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },
    /// The process-wide job system was already installed.
    #[error("job system already initialized")]
    AlreadyInitialized,
    /// The process-wide job system was used before `initialize`.
    #[error("job system not initialized")]
    NotInitialized,
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
