//! Fixed-capacity, lock-protected ring buffer used as the shared job queue.
//!
//! Producers append at the tail and workers take from the head. A single
//! `parking_lot::Mutex` guards both ends, so `push_back` and `pop_front` are
//! linearizable with respect to each other. One slot is always left empty to
//! tell "full" apart from "empty", which means a buffer created with
//! `capacity` slots holds at most `capacity - 1` items.

use parking_lot::Mutex;

/// Default number of slots in the job queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Slot storage and cursors, only ever touched under the lock.
struct Slots<T> {
    data: Box<[Option<T>]>,
    /// Next slot to read.
    head: usize,
    /// Next slot to write.
    tail: usize,
}

/// Bounded multi-producer/multi-consumer FIFO queue.
pub struct RingBuffer<T> {
    slots: Mutex<Slots<T>>,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    /// Create a ring buffer with `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity < 2`, since the sentinel slot would leave no room
    /// for any item. Callers going through [`crate::config::JobSystemConfig`]
    /// are validated before reaching this point.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 2, "ring buffer needs at least 2 slots, got {capacity}");
        let data = std::iter::repeat_with(|| None).take(capacity).collect();
        Self {
            slots: Mutex::new(Slots { data, head: 0, tail: 0 }),
            capacity,
        }
    }

    /// Append an item at the tail.
    ///
    /// Never blocks waiting for space.
    ///
    /// # Errors
    ///
    /// Returns the item unchanged when the buffer is full so the caller can
    /// retry with it later.
    pub fn push_back(&self, item: T) -> Result<(), T> {
        let mut slots = self.slots.lock();
        let next = (slots.tail + 1) % self.capacity;
        if next == slots.head {
            return Err(item);
        }
        let tail = slots.tail;
        slots.data[tail] = Some(item);
        slots.tail = next;
        Ok(())
    }

    /// Remove and return the item at the head, or `None` if empty.
    pub fn pop_front(&self) -> Option<T> {
        let mut slots = self.slots.lock();
        if slots.head == slots.tail {
            return None;
        }
        let head = slots.head;
        let item = slots.data[head].take();
        slots.head = (head + 1) % self.capacity;
        item
    }

    /// Number of items currently held.
    pub fn len(&self) -> usize {
        let slots = self.slots.lock();
        (slots.tail + self.capacity - slots.head) % self.capacity
    }

    /// Whether the buffer holds no items.
    pub fn is_empty(&self) -> bool {
        let slots = self.slots.lock();
        slots.head == slots.tail
    }

    /// Number of slots, including the sentinel.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Maximum number of items the buffer can hold at once.
    #[must_use]
    pub const fn max_len(&self) -> usize {
        self.capacity - 1
    }
}

impl<T> Default for RingBuffer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}

impl<T> std::fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}
