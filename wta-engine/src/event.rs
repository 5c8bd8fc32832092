//! The event queue: a min-heap of time-stamped events with stable
//! tie-breaking, per the simulator's core ordering rule.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use wta_model::{MachineId, TaskId};

/// A simulation event. The payload carries just enough to let the
/// simulation core re-derive what happened without consulting other state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    TaskCompleted(TaskId, MachineId),
    TaskSubmitted(TaskId),
    TaskReady(TaskId),
    ScheduleTick,
    TaskStarted(TaskId, MachineId),
}

impl EventKind {
    /// Lower values are processed first within the same timestamp.
    ///
    /// This ordering is load-bearing (distilled spec §4.1): a task
    /// completing at `t` must free its machine's CPUs before anything else
    /// at `t` is considered, and a `ScheduleTick` must run only after every
    /// submission/readiness event at `t` has been applied.
    fn priority(&self) -> u8 {
        match self {
            EventKind::TaskCompleted(..) => 0,
            EventKind::TaskSubmitted(..) => 1,
            EventKind::TaskReady(..) => 2,
            EventKind::ScheduleTick => 3,
            EventKind::TaskStarted(..) => 4,
        }
    }
}

/// A queued event: a timestamp, a monotonically increasing sequence number
/// assigned at push time, and the event payload.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Event {
    pub timestamp: u64,
    pub seq: u64,
    pub kind: EventKind,
}

impl Event {
    fn sort_key(&self) -> (u64, u8, u64) {
        (self.timestamp, self.kind.priority(), self.seq)
    }
}

// `BinaryHeap` is a max-heap; we invert comparisons so that the event with
// the smallest `(timestamp, priority, seq)` key is the one `pop` returns.
impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        other.sort_key().cmp(&self.sort_key())
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A priority queue of [`Event`]s, ordered per [`Event::cmp`].
#[derive(Default)]
pub struct EventQueue {
    heap: BinaryHeap<Event>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        EventQueue::default()
    }

    /// Pushes `kind` at `timestamp`, assigning it the next sequence number.
    pub fn push(&mut self, timestamp: u64, kind: EventKind) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Event {
            timestamp,
            seq,
            kind,
        });
    }

    pub fn peek(&self) -> Option<&Event> {
        self.heap.peek()
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.heap.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
