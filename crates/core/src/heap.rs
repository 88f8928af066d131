//! Binary min-heap used to order Huffman nodes during tree construction.
//!
//! # Ordering
//!
//! Elements are ordered by their `Ord` implementation, smallest first.
//! Elements that compare equal are popped in insertion order (FIFO): every
//! push is stamped with a monotonically increasing sequence number that
//! acts as the secondary key. This makes the tree shape reproducible for a
//! given frequency table.
//!
//! # Growth
//!
//! Storage starts at `INITIAL_CAPACITY` slots and doubles whenever a push
//! finds it full, so inserts are amortized O(1) plus the O(log n) sift.

use std::cmp::Ordering;

use crate::error::{HeapError, Result};

/// Slots allocated by `PriorityQueue::new`.
pub const INITIAL_CAPACITY: usize = 10;

#[derive(Debug, Clone)]
struct Entry<T> {
    item: T,
    seq: u64,
}

impl<T: Ord> Entry<T> {
    fn precedes(&self, other: &Self) -> bool {
        match self.item.cmp(&other.item) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => self.seq < other.seq,
        }
    }
}

/// Min-priority queue with deterministic FIFO tie-breaking.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    entries: Vec<Entry<T>>,
    next_seq: u64,
}

impl<T: Ord> PriorityQueue<T> {
    /// Create an empty queue with `INITIAL_CAPACITY` slots.
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(INITIAL_CAPACITY),
            next_seq: 0,
        }
    }

    /// Insert an element in O(log n).
    pub fn push(&mut self, item: T) {
        if self.entries.len() == self.entries.capacity() {
            let additional = self.entries.capacity().max(INITIAL_CAPACITY);
            self.entries.reserve_exact(additional);
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        self.entries.push(Entry { item, seq });
        self.sift_up(self.entries.len() - 1);
    }

    /// Remove and return the minimum element in O(log n).
    ///
    /// # Errors
    /// Returns `HeapError::EmptyQueue` if the queue holds no elements.
    pub fn pop(&mut self) -> Result<T> {
        if self.entries.is_empty() {
            return Err(HeapError::EmptyQueue.into());
        }

        // Move the last element into the root slot, then restore the heap
        let root = self.entries.swap_remove(0);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }

        Ok(root.item)
    }

    /// Number of elements currently queued.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Allocated slots (grows by doubling).
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if !self.entries[idx].precedes(&self.entries[parent]) {
                break;
            }
            self.entries.swap(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * idx + 1;
            let right = 2 * idx + 2;
            let mut smallest = idx;

            if left < len && self.entries[left].precedes(&self.entries[smallest]) {
                smallest = left;
            }
            if right < len && self.entries[right].precedes(&self.entries[smallest]) {
                smallest = right;
            }

            if smallest == idx {
                break;
            }
            self.entries.swap(idx, smallest);
            idx = smallest;
        }
    }
}

impl<T: Ord> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[derive(Debug, PartialEq, Eq)]
    struct Weighted {
        weight: u64,
        label: char,
    }

    impl PartialOrd for Weighted {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }

    // Weight only, so equal weights exercise the tie-break
    impl Ord for Weighted {
        fn cmp(&self, other: &Self) -> Ordering {
            self.weight.cmp(&other.weight)
        }
    }

    fn w(weight: u64, label: char) -> Weighted {
        Weighted { weight, label }
    }

    #[test]
    fn test_pop_in_ascending_order() {
        let mut queue = PriorityQueue::new();
        for value in [5u32, 3, 9, 1, 7, 2, 8] {
            queue.push(value);
        }

        let mut popped = Vec::new();
        while !queue.is_empty() {
            popped.push(queue.pop().unwrap());
        }
        assert_eq!(popped, vec![1, 2, 3, 5, 7, 8, 9]);
    }

    #[test]
    fn test_pop_empty_queue() {
        let mut queue: PriorityQueue<u32> = PriorityQueue::new();
        assert!(matches!(
            queue.pop(),
            Err(Error::Heap(HeapError::EmptyQueue))
        ));
    }

    #[test]
    fn test_ties_pop_in_insertion_order() {
        let mut queue = PriorityQueue::new();
        queue.push(w(2, 'a'));
        queue.push(w(1, 'b'));
        queue.push(w(2, 'c'));
        queue.push(w(1, 'd'));
        queue.push(w(2, 'e'));

        let labels: Vec<char> = (0..5).map(|_| queue.pop().unwrap().label).collect();
        assert_eq!(labels, vec!['b', 'd', 'a', 'c', 'e']);
    }

    #[test]
    fn test_ties_after_interleaved_pops() {
        let mut queue = PriorityQueue::new();
        queue.push(w(3, 'a'));
        queue.push(w(3, 'b'));
        assert_eq!(queue.pop().unwrap().label, 'a');

        queue.push(w(3, 'c'));
        assert_eq!(queue.pop().unwrap().label, 'b');
        assert_eq!(queue.pop().unwrap().label, 'c');
    }

    #[test]
    fn test_size() {
        let mut queue = PriorityQueue::new();
        assert_eq!(queue.size(), 0);
        assert!(queue.is_empty());

        queue.push(4u8);
        queue.push(2);
        assert_eq!(queue.size(), 2);

        assert_eq!(queue.pop().unwrap(), 2);
        assert_eq!(queue.size(), 1);
    }

    #[test]
    fn test_capacity_doubles() {
        let mut queue = PriorityQueue::new();
        assert!(queue.capacity() >= INITIAL_CAPACITY);

        for i in 0..INITIAL_CAPACITY {
            queue.push(i);
        }
        let before = queue.capacity();
        queue.push(INITIAL_CAPACITY);
        assert!(queue.capacity() >= before * 2);
        assert_eq!(queue.size(), INITIAL_CAPACITY + 1);
    }
}
