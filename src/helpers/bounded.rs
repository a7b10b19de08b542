//! Bounded deque for the device message list
//!
//! Fixed-capacity deque that evicts the oldest item when a new one is pushed
//! at capacity (FIFO eviction).

use std::collections::VecDeque;

/// A bounded deque with FIFO eviction policy
#[derive(Clone, Debug)]
pub struct BoundedDeque<T> {
    cap: usize,
    buf: VecDeque<T>,
}

impl<T> BoundedDeque<T> {
    /// Create a new bounded deque. With `cap == 0` pushes are no-ops.
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            buf: VecDeque::with_capacity(cap.min(1024)),
        }
    }

    /// Push a new value, evicting the oldest if at capacity
    pub fn push(&mut self, value: T) {
        if self.cap == 0 {
            return;
        }
        if self.buf.len() == self.cap {
            self.buf.pop_front();
        }
        self.buf.push_back(value);
    }

    /// Replace the content; only the newest `cap` values are kept
    pub fn replace(&mut self, values: impl IntoIterator<Item = T>) {
        self.buf.clear();
        for value in values {
            self.push(value);
        }
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Most recent item
    pub fn last(&self) -> Option<&T> {
        self.buf.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_deque_eviction() {
        let mut deque = BoundedDeque::new(3);
        deque.push(1);
        deque.push(2);
        deque.push(3);
        deque.push(4);
        assert_eq!(deque.len(), 3);
        assert_eq!(deque.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(deque.last(), Some(&4));
    }

    #[test]
    fn test_bounded_deque_replace_keeps_newest() {
        let mut deque = BoundedDeque::new(2);
        deque.push(9);
        deque.replace([1, 2, 3]);
        assert_eq!(deque.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_bounded_deque_zero_capacity() {
        let mut deque = BoundedDeque::new(0);
        deque.push(1);
        assert!(deque.is_empty());
    }
}
