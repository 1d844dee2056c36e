//! Integration tests for the process-wide job system.
//!
//! All checks live in one test function: the global instance is installed
//! once per test binary, so separate tests would race on "before init".

use prometheus_job_system::{global, DispatchArgs, JobSystemConfig, JobSystemError};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;

#[test]
fn test_global_lifecycle() {
    // Before initialization.
    assert!(global::instance().is_none());
    assert!(!global::is_busy());
    global::wait();
    assert!(matches!(global::execute(|| {}), Err(JobSystemError::NotInitialized)));
    assert!(matches!(
        global::dispatch(4, 2, |_: DispatchArgs| {}),
        Err(JobSystemError::NotInitialized)
    ));

    // Invalid config leaves the slot empty.
    let err = global::initialize_with(JobSystemConfig::new().with_worker_count(0)).unwrap_err();
    assert!(matches!(err, JobSystemError::InvalidConfig(_)));
    assert!(global::instance().is_none());

    // Racing initializers: exactly one wins, the rest see AlreadyInitialized.
    let racers: Vec<_> = (0..8)
        .map(|_| thread::spawn(|| global::initialize_with(JobSystemConfig::new().with_worker_count(2))))
        .collect();
    let results: Vec<_> = racers.into_iter().map(|r| r.join().unwrap()).collect();
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, JobSystemError::AlreadyInitialized)));
    assert!(matches!(global::initialize(), Err(JobSystemError::AlreadyInitialized)));
    assert_eq!(global::instance().unwrap().worker_count(), 2);

    let flag = Arc::new(AtomicBool::new(false));
    let flag_clone = Arc::clone(&flag);
    global::execute(move || flag_clone.store(true, Ordering::Release)).unwrap();
    global::wait();
    assert!(flag.load(Ordering::Acquire));

    let counter = Arc::new(AtomicU32::new(0));
    let counter_clone = Arc::clone(&counter);
    global::dispatch(100, 10, move |_| {
        counter_clone.fetch_add(1, Ordering::Relaxed);
    })
    .unwrap();
    global::wait();
    assert!(!global::is_busy());
    assert_eq!(counter.load(Ordering::Relaxed), 100);

    let stats = global::instance().unwrap().stats();
    assert_eq!(stats.submitted_jobs, 11);
    assert_eq!(stats.completed_jobs, 11);
}
