//! Orderings for pending segments.
//!
//! The scheduler is written against [`SegmentQueue`] and never inspects the
//! order itself. [`StackQueue`] gives depth-first LIFO processing;
//! [`HeapQueue`] always hands out the segment with the largest inherited
//! error, breaking ties in LIFO order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::segment::Segment;

/// A pool of segments awaiting evaluation.
pub trait SegmentQueue {
    fn push(&mut self, segment: Segment);

    fn pop(&mut self) -> Option<Segment>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes and returns every pending segment.
    fn drain_all(&mut self) -> Vec<Segment> {
        let mut out = Vec::with_capacity(self.len());
        while let Some(s) = self.pop() {
            out.push(s);
        }
        out
    }
}

/// Last in, first out.
#[derive(Clone, Debug, Default)]
pub struct StackQueue {
    items: Vec<Segment>,
}

impl StackQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SegmentQueue for StackQueue {
    fn push(&mut self, segment: Segment) {
        self.items.push(segment);
    }

    fn pop(&mut self) -> Option<Segment> {
        self.items.pop()
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn drain_all(&mut self) -> Vec<Segment> {
        std::mem::take(&mut self.items)
    }
}

/// A segment with its insertion order.
#[derive(Clone, Debug)]
struct Prioritized {
    segment: Segment,
    seq: u64,
}

impl PartialEq for Prioritized {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Prioritized {}

impl PartialOrd for Prioritized {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Prioritized {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap by error, newest first among equals
        self.segment
            .error
            .total_cmp(&other.segment.error)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Largest error first.
#[derive(Clone, Debug, Default)]
pub struct HeapQueue {
    heap: BinaryHeap<Prioritized>,
    next_seq: u64,
}

impl HeapQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SegmentQueue for HeapQueue {
    fn push(&mut self, segment: Segment) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Prioritized { segment, seq });
    }

    fn pop(&mut self) -> Option<Segment> {
        self.heap.pop().map(|p| p.segment)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
