//! Priority queue of pending cells
//!
//! Binary heap keyed by a floating-point priority. Entries with equal
//! priority leave the queue in insertion order (FIFO), so traversals driven
//! by the queue are deterministic on flats.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Which end of the priority range is served first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QueueOrder {
    #[default]
    LowestFirst,
    HighestFirst,
}

/// A pending cell with its payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<T> {
    pub row: usize,
    pub col: usize,
    pub payload: T,
    pub priority: f64,
}

#[derive(Debug)]
struct Entry<T> {
    candidate: Candidate<T>,
    seq: u64,
    order: QueueOrder,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// BinaryHeap pops the greatest entry: "greater" means "served earlier".
impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.candidate.priority, other.candidate.priority);
        let by_priority = match self.order {
            QueueOrder::LowestFirst => b.total_cmp(&a),
            QueueOrder::HighestFirst => a.total_cmp(&b),
        };
        by_priority.then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Ordered multiset of candidate cells.
#[derive(Debug)]
pub struct CandidateQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    order: QueueOrder,
    next_seq: u64,
}

impl<T> CandidateQueue<T> {
    pub fn new(order: QueueOrder) -> Self {
        Self {
            heap: BinaryHeap::new(),
            order,
            next_seq: 0,
        }
    }

    pub fn order(&self) -> QueueOrder {
        self.order
    }

    pub fn push(&mut self, row: usize, col: usize, payload: T, priority: f64) {
        let entry = Entry {
            candidate: Candidate {
                row,
                col,
                payload,
                priority,
            },
            seq: self.next_seq,
            order: self.order,
        };
        self.next_seq += 1;
        self.heap.push(entry);
    }

    /// Remove and return the front candidate
    pub fn pop(&mut self) -> Option<Candidate<T>> {
        self.heap.pop().map(|entry| entry.candidate)
    }

    pub fn peek(&self) -> Option<&Candidate<T>> {
        self.heap.peek().map(|entry| &entry.candidate)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl<T> Default for CandidateQueue<T> {
    fn default() -> Self {
        Self::new(QueueOrder::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<T>(queue: &mut CandidateQueue<T>) -> Vec<(usize, usize)> {
        std::iter::from_fn(|| queue.pop().map(|c| (c.row, c.col))).collect()
    }

    #[test]
    fn test_lowest_first() {
        let mut queue = CandidateQueue::new(QueueOrder::LowestFirst);
        queue.push(0, 0, (), 5.0);
        queue.push(0, 1, (), -2.0);
        queue.push(0, 2, (), 3.5);
        queue.push(0, 3, (), 10.0);

        assert_eq!(queue.len(), 4);
        assert_eq!(queue.peek().map(|c| c.priority), Some(-2.0));
        assert_eq!(drain(&mut queue), vec![(0, 1), (0, 2), (0, 0), (0, 3)]);
        assert!(queue.is_empty());
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_highest_first() {
        let mut queue = CandidateQueue::new(QueueOrder::HighestFirst);
        queue.push(1, 0, 'a', 0.25);
        queue.push(1, 1, 'b', 0.75);
        queue.push(1, 2, 'c', 0.5);

        let first = queue.pop().unwrap();
        assert_eq!((first.payload, first.priority), ('b', 0.75));
        assert_eq!(drain(&mut queue), vec![(1, 2), (1, 0)]);
    }

    #[test]
    fn test_ties_are_fifo() {
        for order in [QueueOrder::LowestFirst, QueueOrder::HighestFirst] {
            let mut queue = CandidateQueue::new(order);
            for col in 0..6 {
                queue.push(0, col, (), 1.0);
            }
            queue.push(9, 9, (), if order == QueueOrder::LowestFirst { 0.0 } else { 2.0 });

            let popped = drain(&mut queue);
            assert_eq!(popped[0], (9, 9));
            assert_eq!(&popped[1..], &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (0, 5)]);
        }
    }

    #[test]
    fn test_interleaved_push_pop() {
        let mut queue = CandidateQueue::default();
        queue.push(0, 0, (), 3.0);
        queue.push(0, 1, (), 1.0);
        assert_eq!(queue.pop().map(|c| c.col), Some(1));

        queue.push(0, 2, (), 2.0);
        queue.push(0, 3, (), 3.0);
        assert_eq!(drain(&mut queue), vec![(0, 2), (0, 0), (0, 3)]);
    }

    #[test]
    fn test_clear() {
        let mut queue = CandidateQueue::new(QueueOrder::LowestFirst);
        queue.push(0, 0, 7u32, 1.0);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.order(), QueueOrder::LowestFirst);
    }
}
