//! Tests for the bounded job queue through its public API

use prometheus_job_system::core::RingBuffer;

#[test]
fn test_capacity_minus_one_items_fit() {
    let rb = RingBuffer::new(256);
    for i in 0..255 {
        assert!(rb.push_back(i).is_ok(), "push {i} should fit");
    }
    assert_eq!(rb.len(), rb.max_len());
    assert_eq!(rb.push_back(255), Err(255));
}

#[test]
fn test_refills_after_drain() {
    let rb = RingBuffer::new(5);
    for _ in 0..3 {
        for i in 0..4 {
            rb.push_back(i).unwrap();
        }
        assert!(rb.push_back(99).is_err());
        for i in 0..4 {
            assert_eq!(rb.pop_front(), Some(i));
        }
        assert!(rb.pop_front().is_none());
    }
}

#[test]
fn test_boxed_closures_round_trip() {
    let rb: RingBuffer<Box<dyn FnOnce() -> u32 + Send>> = RingBuffer::new(4);
    assert!(rb.push_back(Box::new(|| 1_u32)).is_ok());
    assert!(rb.push_back(Box::new(|| 2_u32)).is_ok());
    let results: Vec<u32> = std::iter::from_fn(|| rb.pop_front()).map(|job| job()).collect();
    assert_eq!(results, vec![1, 2]);
}
