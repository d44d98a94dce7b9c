//! Frontier orderings for the search engine.
//!
//! The engine only talks to the `Frontier` trait. Each strategy picks one of:
//!
//! | Frontier | Order | Tie-break |
//! |---|---|---|
//! | `FifoFrontier` | insertion (BFS) | none |
//! | `LifoFrontier` | reverse insertion (DFS) | first neighbor first |
//! | `DepthLimitedFrontier` | LIFO, bounded depth (DLS/IDDFS) | first neighbor first |
//! | `PriorityFrontier` + `Priority::Cost` | ascending g (UCS) | insertion |
//! | `PriorityFrontier` + `Priority::Heuristic` | ascending h (Greedy) | insertion |
//! | `PriorityFrontier` + `Priority::Estimate` | ascending g+h (A*) | lower h, then insertion |

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};

use crate::Cost;
use crate::arena::NodeIndex;

/// A frontier entry: an arena index plus the keys frontiers order by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrontierEntry {
    /// Arena node the entry stands for.
    pub node: NodeIndex,
    /// Accumulated path cost, the UCS key.
    pub g: Cost,
    /// Heuristic estimate, the Greedy key and the A* tie-break.
    pub h: Cost,
    /// Edges from the root, checked against depth bounds.
    pub depth: usize,
}

impl FrontierEntry {
    /// `f = g + h`.
    #[must_use]
    pub fn f(&self) -> Cost {
        self.g + self.h
    }
}

/// Ordering abstraction over discovered-but-unexpanded nodes.
pub trait Frontier {
    /// Add one entry.
    fn push(&mut self, entry: FrontierEntry);

    /// Remove the highest-priority entry.
    fn pop(&mut self) -> Option<FrontierEntry>;

    /// Number of entries waiting.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add the children of one expansion, given in neighbor enumeration order.
    ///
    /// Stack frontiers override this so the first neighbor is popped first.
    fn push_all(&mut self, entries: Vec<FrontierEntry>) {
        for entry in entries {
            self.push(entry);
        }
    }

    /// Whether a child at `depth` may enter this frontier.
    ///
    /// The engine asks before creating the child's node. A refusal is
    /// recorded as a cutoff.
    fn admit_depth(&mut self, depth: usize) -> bool {
        let _ = depth;
        true
    }

    /// Whether an entry was refused because of a depth bound.
    fn cut_off(&self) -> bool {
        false
    }
}

// =============================================================================
// FIFO / LIFO
// =============================================================================

/// First-in first-out queue (BFS).
#[derive(Debug, Default)]
pub struct FifoFrontier {
    queue: VecDeque<FrontierEntry>,
}

impl FifoFrontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for FifoFrontier {
    fn push(&mut self, entry: FrontierEntry) {
        self.queue.push_back(entry);
    }

    fn pop(&mut self) -> Option<FrontierEntry> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Last-in first-out stack (DFS).
#[derive(Debug, Default)]
pub struct LifoFrontier {
    stack: Vec<FrontierEntry>,
}

impl LifoFrontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for LifoFrontier {
    fn push(&mut self, entry: FrontierEntry) {
        self.stack.push(entry);
    }

    fn pop(&mut self) -> Option<FrontierEntry> {
        self.stack.pop()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }

    fn push_all(&mut self, entries: Vec<FrontierEntry>) {
        self.stack.extend(entries.into_iter().rev());
    }
}

/// LIFO stack that refuses entries deeper than `limit` (DLS).
///
/// A refused entry records a cutoff: the search below it was not explored,
/// which is what separates `Cutoff` from `Exhausted`.
#[derive(Debug)]
pub struct DepthLimitedFrontier {
    stack: Vec<FrontierEntry>,
    limit: usize,
    cut_off: bool,
}

impl DepthLimitedFrontier {
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            stack: Vec::new(),
            limit,
            cut_off: false,
        }
    }

    /// The depth bound.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Frontier for DepthLimitedFrontier {
    fn push(&mut self, entry: FrontierEntry) {
        if self.admit_depth(entry.depth) {
            self.stack.push(entry);
        }
    }

    fn pop(&mut self) -> Option<FrontierEntry> {
        self.stack.pop()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }

    fn push_all(&mut self, entries: Vec<FrontierEntry>) {
        for entry in entries.into_iter().rev() {
            self.push(entry);
        }
    }

    fn admit_depth(&mut self, depth: usize) -> bool {
        if depth > self.limit {
            self.cut_off = true;
            return false;
        }
        true
    }

    fn cut_off(&self) -> bool {
        self.cut_off
    }
}

// =============================================================================
// PRIORITY FRONTIER
// =============================================================================

/// Key a `PriorityFrontier` orders by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// Ascending g (uniform-cost search).
    Cost,
    /// Ascending h (greedy best-first).
    Heuristic,
    /// Ascending f = g + h, ties to lower h (A*).
    Estimate,
}

/// A heap entry with its precomputed ordering key.
///
/// Keys compare with `total_cmp`, so the order is total even for floats.
#[derive(Debug)]
struct Keyed {
    primary: Cost,
    secondary: Cost,
    seq: u64,
    entry: FrontierEntry,
}

impl PartialEq for Keyed {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Keyed {}

impl PartialOrd for Keyed {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Keyed {
    fn cmp(&self, other: &Self) -> Ordering {
        self.primary
            .total_cmp(&other.primary)
            .then_with(|| self.secondary.total_cmp(&other.secondary))
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Binary-heap frontier with O(log n) push and pop.
///
/// `BinaryHeap` is a max-heap, so entries are wrapped in `Reverse` to pop the
/// smallest key. The insertion sequence number makes every key unique, which
/// keeps pops deterministic.
#[derive(Debug)]
pub struct PriorityFrontier {
    heap: BinaryHeap<Reverse<Keyed>>,
    priority: Priority,
    next_seq: u64,
}

impl PriorityFrontier {
    #[must_use]
    pub fn new(priority: Priority) -> Self {
        Self {
            heap: BinaryHeap::new(),
            priority,
            next_seq: 0,
        }
    }

    /// The ordering key in use.
    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority
    }
}

impl Frontier for PriorityFrontier {
    fn push(&mut self, entry: FrontierEntry) {
        let (primary, secondary) = match self.priority {
            Priority::Cost => (entry.g, 0.0),
            Priority::Heuristic => (entry.h, 0.0),
            Priority::Estimate => (entry.f(), entry.h),
        };
        self.heap.push(Reverse(Keyed {
            primary,
            secondary,
            seq: self.next_seq,
            entry,
        }));
        self.next_seq = self.next_seq.saturating_add(1);
    }

    fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop().map(|Reverse(keyed)| keyed.entry)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
