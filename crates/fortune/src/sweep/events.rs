//! Event queue with lazy invalidation.
//!
//! Events are immutable once pushed. Cancelling one records its id in a side
//! set; `pop_next` drops such events when they surface instead of searching
//! the heap.
//!
//! Heights closer than the tolerance count as level: y is snapped to an `eps`
//! grid before comparing, so such events order by descending x. Snapping keeps
//! the order total, which a pairwise `|dy| < eps` test would not.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use nalgebra::Vector2;

use super::types::{EventId, NodeId, SiteId};
use crate::geom2::cfg::EPS;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EventKind {
    Site(SiteId),
    /// `arc` vanishes at `vertex`; the event sits at the bottom of the circle.
    Circle { arc: NodeId, vertex: Vector2<f64> },
}

#[derive(Clone, Copy, Debug)]
pub struct Event {
    pub id: EventId,
    pub x: f64,
    pub y: f64,
    pub kind: EventKind,
    /// `y` snapped to the queue's tolerance grid.
    level: f64,
}

impl Event {
    #[inline]
    pub fn is_site(&self) -> bool {
        matches!(self.kind, EventKind::Site(_))
    }
}

// Max-heap order: higher y first, then higher x, then the older event.
impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.level
            .total_cmp(&other.level)
            .then_with(|| self.x.total_cmp(&other.x))
            .then_with(|| other.id.cmp(&self.id))
    }
}
impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Event {}

#[derive(Debug)]
pub struct EventQueue {
    heap: BinaryHeap<Event>,
    invalid: HashSet<EventId>,
    next_id: u64,
    discarded: usize,
    eps: f64,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::with_eps(EPS)
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue treating heights within `eps` as level. `eps <= 0` compares exactly.
    pub fn with_eps(eps: f64) -> Self {
        Self {
            heap: BinaryHeap::new(),
            invalid: HashSet::new(),
            next_id: 0,
            discarded: 0,
            eps,
        }
    }

    #[inline]
    fn level(&self, y: f64) -> f64 {
        if self.eps > 0.0 {
            (y / self.eps).round()
        } else {
            y
        }
    }

    /// Push a new event at `(x, y)`; ids grow monotonically.
    pub fn push(&mut self, x: f64, y: f64, kind: EventKind) -> EventId {
        let id = EventId(self.next_id);
        self.next_id += 1;
        let level = self.level(y);
        self.heap.push(Event {
            id,
            x,
            y,
            kind,
            level,
        });
        id
    }

    /// Next valid event, silently dropping invalidated ones.
    pub fn pop_next(&mut self) -> Option<Event> {
        while let Some(event) = self.heap.pop() {
            if self.invalid.remove(&event.id) {
                self.discarded += 1;
                continue;
            }
            return Some(event);
        }
        None
    }

    pub fn invalidate(&mut self, id: EventId) {
        self.invalid.insert(id);
    }

    #[inline]
    pub fn is_valid(&self, id: EventId) -> bool {
        !self.invalid.contains(&id)
    }

    /// Pending events, invalidated ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of invalidated events dropped by `pop_next` so far.
    #[inline]
    pub fn discarded(&self) -> usize {
        self.discarded
    }
}
