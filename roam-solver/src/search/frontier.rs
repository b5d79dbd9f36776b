//! Priority queue of partial paths.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::objective::{Objective, Tally};

/// A partial path waiting to be popped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct State {
    /// Arena slot of the path's last node.
    pub(crate) slot: usize,
    pub(crate) node: usize,
    pub(crate) elapsed: f64,
    pub(crate) tally: Tally,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Queued {
    priority: f64,
    rank: (u32, f64),
    sequence: u64,
    state: State,
}

impl Eq for Queued {}

impl Ord for Queued {
    // Highest priority first; ties go to the lower node, then the earlier
    // arrival time, then the smaller tie rank, then insertion order.
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| other.state.node.cmp(&self.state.node))
            .then_with(|| other.state.elapsed.total_cmp(&self.state.elapsed))
            .then_with(|| other.rank.0.cmp(&self.rank.0))
            .then_with(|| other.rank.1.total_cmp(&self.rank.1))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Max-heap of [`State`]s keyed by priority.
///
/// States that tie on every key are popped in insertion order. Paths live
/// in the search arena rather than in the queue, so two such states are not
/// compared by their node sequences.
#[derive(Debug)]
pub(crate) struct Frontier {
    objective: Objective,
    heap: BinaryHeap<Queued>,
    next_sequence: u64,
}

impl Frontier {
    pub(crate) const fn new(objective: Objective) -> Self {
        Self {
            objective,
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    pub(crate) fn push(&mut self, priority: f64, state: State) {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);
        self.heap.push(Queued {
            priority,
            rank: self.objective.tie_rank(state.tally),
            sequence,
            state,
        });
    }

    pub(crate) fn pop(&mut self) -> Option<State> {
        self.heap.pop().map(|queued| queued.state)
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}
