//! Tests for configuration validation and loading

use prometheus_job_system::config::job_system::{
    ENV_PIN_CORES, ENV_QUEUE_CAPACITY, ENV_STACK_SIZE, ENV_THREAD_PREFIX, ENV_WORKERS,
};
use prometheus_job_system::core::DEFAULT_QUEUE_CAPACITY;
use prometheus_job_system::{JobSystemConfig, JobSystemError};

#[test]
fn test_default_config_is_valid() {
    let cfg = JobSystemConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.worker_count, None);
    assert_eq!(cfg.queue_capacity, DEFAULT_QUEUE_CAPACITY);
    assert_eq!(cfg.thread_name_prefix, "job-worker");
    assert!(!cfg.pin_to_cores);
    assert!(cfg.resolved_worker_count() >= 1);
}

#[test]
fn test_builders_set_fields() {
    let cfg = JobSystemConfig::new()
        .with_worker_count(3)
        .with_queue_capacity(64)
        .with_thread_name_prefix("sim")
        .with_thread_stack_size(1 << 20)
        .with_core_pinning(true);
    assert_eq!(cfg.worker_count, Some(3));
    assert_eq!(cfg.resolved_worker_count(), 3);
    assert_eq!(cfg.queue_capacity, 64);
    assert_eq!(cfg.thread_name_prefix, "sim");
    assert_eq!(cfg.thread_stack_size, Some(1 << 20));
    assert!(cfg.pin_to_cores);
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_config_invalid_worker_count() {
    assert!(JobSystemConfig::new().with_worker_count(0).validate().is_err());
}

#[test]
fn test_config_invalid_queue_capacity() {
    assert!(JobSystemConfig::new().with_queue_capacity(1).validate().is_err());
    assert!(JobSystemConfig::new().with_queue_capacity(2).validate().is_ok());
}

#[test]
fn test_config_invalid_prefix_and_stack() {
    assert!(JobSystemConfig::new().with_thread_name_prefix("").validate().is_err());
    assert!(JobSystemConfig::new().with_thread_stack_size(0).validate().is_err());
}

#[test]
fn test_from_json_fills_defaults() {
    let cfg = JobSystemConfig::from_json_str(r#"{ "worker_count": 4 }"#).unwrap();
    assert_eq!(cfg.worker_count, Some(4));
    assert_eq!(cfg.queue_capacity, DEFAULT_QUEUE_CAPACITY);
    assert_eq!(cfg.thread_name_prefix, "job-worker");
}

#[test]
fn test_from_json_rejects_bad_input() {
    let err = JobSystemConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, JobSystemError::Config(_)));

    let err = JobSystemConfig::from_json_str(r#"{ "queue_capacity": 0 }"#).unwrap_err();
    assert!(matches!(err, JobSystemError::InvalidConfig(_)));
}

#[test]
fn test_json_round_trip_preserves_config() {
    let cfg = JobSystemConfig::new().with_worker_count(2).with_queue_capacity(32);
    let json = serde_json::to_string(&cfg).unwrap();
    assert_eq!(JobSystemConfig::from_json_str(&json).unwrap(), cfg);
}

/// Only test in this binary that touches the environment.
#[test]
fn test_from_env() {
    let vars = [ENV_WORKERS, ENV_QUEUE_CAPACITY, ENV_THREAD_PREFIX, ENV_STACK_SIZE, ENV_PIN_CORES];
    for var in vars {
        std::env::remove_var(var);
    }
    assert_eq!(JobSystemConfig::from_env().unwrap(), JobSystemConfig::default());

    std::env::set_var(ENV_WORKERS, "6");
    std::env::set_var(ENV_QUEUE_CAPACITY, " 512 ");
    std::env::set_var(ENV_THREAD_PREFIX, "env-worker");
    std::env::set_var(ENV_STACK_SIZE, "262144");
    std::env::set_var(ENV_PIN_CORES, "yes");
    let cfg = JobSystemConfig::from_env().unwrap();
    assert_eq!(cfg.worker_count, Some(6));
    assert_eq!(cfg.queue_capacity, 512);
    assert_eq!(cfg.thread_name_prefix, "env-worker");
    assert_eq!(cfg.thread_stack_size, Some(262_144));
    assert!(cfg.pin_to_cores);

    std::env::set_var(ENV_PIN_CORES, "maybe");
    assert!(matches!(JobSystemConfig::from_env(), Err(JobSystemError::Config(_))));
    std::env::set_var(ENV_PIN_CORES, "0");

    std::env::set_var(ENV_WORKERS, "many");
    assert!(matches!(JobSystemConfig::from_env(), Err(JobSystemError::Config(_))));

    std::env::set_var(ENV_WORKERS, "0");
    assert!(matches!(JobSystemConfig::from_env(), Err(JobSystemError::InvalidConfig(_))));

    for var in vars {
        std::env::remove_var(var);
    }
}
