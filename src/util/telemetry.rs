//! Logging setup for applications and tests that embed the job system.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset: job system events at `info` and up.
pub const DEFAULT_LOG_FILTER: &str = "prometheus_job_system=info";

/// Install a `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_LOG_FILTER`].
///
/// Does nothing if a global subscriber is already set, so it is safe to call
/// from every test.
pub fn init_tracing() {
    init_tracing_with(DEFAULT_LOG_FILTER);
}

/// Like [`init_tracing`] with a caller-chosen fallback filter, e.g.
/// `"prometheus_job_system=trace"` to see every job a worker picks up.
pub fn init_tracing_with(fallback_filter: &str) {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true)
        .try_init();
}
