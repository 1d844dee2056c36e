//! Job system configuration.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::JobSystemError;
use crate::core::ring_buffer::DEFAULT_QUEUE_CAPACITY;

/// Environment variable overriding the worker count.
pub const ENV_WORKERS: &str = "JOB_SYSTEM_WORKERS";
/// Environment variable overriding the queue capacity.
pub const ENV_QUEUE_CAPACITY: &str = "JOB_SYSTEM_QUEUE_CAPACITY";
/// Environment variable overriding the worker thread name prefix.
pub const ENV_THREAD_PREFIX: &str = "JOB_SYSTEM_THREAD_PREFIX";
/// Environment variable overriding the worker stack size in bytes.
pub const ENV_STACK_SIZE: &str = "JOB_SYSTEM_STACK_SIZE";
/// Environment variable enabling core pinning (`true`/`false`/`1`/`0`).
pub const ENV_PIN_CORES: &str = "JOB_SYSTEM_PIN_CORES";

fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

fn default_thread_name_prefix() -> String {
    "job-worker".into()
}

/// Configuration for a [`crate::JobSystem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSystemConfig {
    /// Number of worker threads; `None` uses one per hardware thread.
    #[serde(default)]
    pub worker_count: Option<usize>,
    /// Slots in the job queue. One slot stays empty, so the queue holds
    /// `queue_capacity - 1` pending jobs.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Worker threads are named `{prefix}-{id}`.
    #[serde(default = "default_thread_name_prefix")]
    pub thread_name_prefix: String,
    /// Stack size for worker threads; `None` uses the platform default.
    #[serde(default)]
    pub thread_stack_size: Option<usize>,
    /// Pin worker `i` to core `i % cores` (needs the `affinity` feature).
    #[serde(default)]
    pub pin_to_cores: bool,
}

impl Default for JobSystemConfig {
    fn default() -> Self {
        Self {
            worker_count: None,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            thread_name_prefix: default_thread_name_prefix(),
            thread_stack_size: None,
            pin_to_cores: false,
        }
    }
}

impl JobSystemConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use exactly `worker_count` worker threads.
    #[must_use]
    pub const fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = Some(worker_count);
        self
    }

    /// Set the number of queue slots.
    #[must_use]
    pub const fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }

    /// Set the worker thread name prefix.
    #[must_use]
    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Set the worker thread stack size in bytes.
    #[must_use]
    pub const fn with_thread_stack_size(mut self, stack_size: usize) -> Self {
        self.thread_stack_size = Some(stack_size);
        self
    }

    /// Enable or disable best-effort core pinning.
    #[must_use]
    pub const fn with_core_pinning(mut self, pin_to_cores: bool) -> Self {
        self.pin_to_cores = pin_to_cores;
        self
    }

    /// Worker count after applying the hardware default: `max(1, cpus)`.
    #[must_use]
    pub fn resolved_worker_count(&self) -> usize {
        self.worker_count.unwrap_or_else(num_cpus::get).max(1)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.worker_count == Some(0) {
            return Err("worker_count must be greater than 0".into());
        }
        if self.queue_capacity < 2 {
            return Err("queue_capacity must be at least 2".into());
        }
        if self.thread_name_prefix.is_empty() {
            return Err("thread_name_prefix must not be empty".into());
        }
        if self.thread_stack_size == Some(0) {
            return Err("thread_stack_size must be greater than 0".into());
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate it.
    ///
    /// # Errors
    ///
    /// Returns `JobSystemError::Config` on malformed JSON and
    /// `JobSystemError::InvalidConfig` when validation fails.
    pub fn from_json_str(input: &str) -> Result<Self, JobSystemError> {
        let cfg: Self = serde_json::from_str(input)
            .map_err(|e| JobSystemError::Config(format!("parse error: {e}")))?;
        cfg.validate().map_err(JobSystemError::InvalidConfig)?;
        Ok(cfg)
    }

    /// Build configuration from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    /// Unset variables keep their default values.
    ///
    /// # Errors
    ///
    /// Returns `JobSystemError::Config` when a variable cannot be parsed and
    /// `JobSystemError::InvalidConfig` when validation fails.
    pub fn from_env() -> Result<Self, JobSystemError> {
        let _ = dotenvy::dotenv();

        let mut cfg = Self::default();
        if let Some(workers) = env_parse::<usize>(ENV_WORKERS)? {
            cfg.worker_count = Some(workers);
        }
        if let Some(capacity) = env_parse::<usize>(ENV_QUEUE_CAPACITY)? {
            cfg.queue_capacity = capacity;
        }
        if let Ok(prefix) = env::var(ENV_THREAD_PREFIX) {
            cfg.thread_name_prefix = prefix;
        }
        if let Some(stack_size) = env_parse::<usize>(ENV_STACK_SIZE)? {
            cfg.thread_stack_size = Some(stack_size);
        }
        if let Some(pin) = env_flag(ENV_PIN_CORES)? {
            cfg.pin_to_cores = pin;
        }
        cfg.validate().map_err(JobSystemError::InvalidConfig)?;
        Ok(cfg)
    }
}

fn env_parse<T>(key: &str) -> Result<Option<T>, JobSystemError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| JobSystemError::Config(format!("{key}={raw:?}: {e}"))),
        Err(_) => Ok(None),
    }
}

fn env_flag(key: &str) -> Result<Option<bool>, JobSystemError> {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(JobSystemError::Config(format!("{key}={raw:?}: expected a boolean"))),
        },
        Err(_) => Ok(None),
    }
}
