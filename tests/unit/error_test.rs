//! Tests for error types

use prometheus_job_system::JobSystemError;

#[test]
fn test_error_display() {
    assert_eq!(
        JobSystemError::InvalidConfig("queue_capacity must be at least 2".into()).to_string(),
        "invalid configuration: queue_capacity must be at least 2"
    );
    assert_eq!(JobSystemError::AlreadyInitialized.to_string(), "job system already initialized");
    assert_eq!(JobSystemError::NotInitialized.to_string(), "job system not initialized");
    assert_eq!(
        JobSystemError::Config("parse error: eof".into()).to_string(),
        "config error: parse error: eof"
    );
}
