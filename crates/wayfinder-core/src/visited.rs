//! Visited / cost table.
//!
//! Records which states have been expanded (closed) and, for cost-aware
//! strategies, the best known g per state. The `Revisit` rule decides when a
//! closed state may be pushed or expanded again.

use std::collections::BTreeMap;

use crate::arena::NodeIndex;
use crate::{Cost, State};

/// When a state that has already been seen may be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revisit {
    /// Closed states are final (BFS, DFS, Greedy, bidirectional).
    Never,
    /// A closed state is re-expanded when reached at a strictly shallower
    /// depth (DLS, IDDFS).
    ShallowerDepth,
    /// Children are pushed only when they improve the best known g.
    /// With `reopen`, a closed state is expanded again on a cheaper g
    /// (A* with an inconsistent heuristic); without it, closed is final.
    CheaperCost { reopen: bool },
}

/// The expansion record of a closed state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visit {
    /// Arena node that expanded the state.
    pub node: NodeIndex,
    pub g: Cost,
    pub depth: usize,
}

/// State-keyed visited table for one search.
#[derive(Debug, Clone)]
pub struct VisitedTable<S> {
    rule: Revisit,
    closed: BTreeMap<S, Visit>,
    best_g: BTreeMap<S, Cost>,
}

impl<S: State> VisitedTable<S> {
    #[must_use]
    pub fn new(rule: Revisit) -> Self {
        Self {
            rule,
            closed: BTreeMap::new(),
            best_g: BTreeMap::new(),
        }
    }

    /// Decide whether a child reaching `state` should enter the frontier.
    ///
    /// Under `CheaperCost` an admitted child becomes the best known g.
    pub fn admit(&mut self, state: &S, g: Cost, depth: usize) -> bool {
        match self.rule {
            Revisit::Never => !self.closed.contains_key(state),
            Revisit::ShallowerDepth => self.closed.get(state).is_none_or(|v| depth < v.depth),
            Revisit::CheaperCost { reopen } => {
                if !reopen && self.closed.contains_key(state) {
                    return false;
                }
                if self.best_g.get(state).is_some_and(|&best| g >= best) {
                    return false;
                }
                self.best_g.insert(state.clone(), g);
                true
            }
        }
    }

    /// Decide whether a popped entry should be expanded.
    ///
    /// Stale duplicates (lazy deletion) fail this check and are discarded.
    #[must_use]
    pub fn should_expand(&self, state: &S, g: Cost, depth: usize) -> bool {
        let Some(visit) = self.closed.get(state) else {
            return true;
        };
        match self.rule {
            Revisit::Never | Revisit::CheaperCost { reopen: false } => false,
            Revisit::ShallowerDepth => depth < visit.depth,
            Revisit::CheaperCost { reopen: true } => g < visit.g,
        }
    }

    /// Mark `state` as expanded, replacing an earlier record.
    pub fn close(&mut self, state: S, visit: Visit) {
        self.closed.insert(state, visit);
    }

    /// The expansion record of `state`, if it is closed.
    #[must_use]
    pub fn get(&self, state: &S) -> Option<&Visit> {
        self.closed.get(state)
    }

    #[must_use]
    pub fn contains(&self, state: &S) -> bool {
        self.closed.contains_key(state)
    }

    /// Number of closed states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.closed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.closed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{Arena, SearchNode};

    fn visit(g: Cost, depth: usize) -> Visit {
        let mut arena = Arena::new();
        Visit {
            node: arena.push(SearchNode::root((), 0.0)),
            g,
            depth,
        }
    }

    #[test]
    fn never_rule_closes_for_good() {
        let mut table = VisitedTable::new(Revisit::Never);
        assert!(table.is_empty());
        assert!(table.admit(&"a", 5.0, 3));
        assert!(table.should_expand(&"a", 5.0, 3));

        table.close("a", visit(5.0, 3));
        assert!(table.contains(&"a"));
        assert!(!table.admit(&"a", 0.0, 0));
        assert!(!table.should_expand(&"a", 0.0, 0));
    }

    #[test]
    fn shallower_depth_reopens() {
        let mut table = VisitedTable::new(Revisit::ShallowerDepth);
        table.close("a", visit(0.0, 3));

        assert!(!table.admit(&"a", 0.0, 3));
        assert!(!table.should_expand(&"a", 0.0, 4));
        assert!(table.admit(&"a", 0.0, 2));
        assert!(table.should_expand(&"a", 0.0, 2));
    }

    #[test]
    fn cheaper_cost_tracks_best_g() {
        let mut table = VisitedTable::new(Revisit::CheaperCost { reopen: false });
        assert!(table.admit(&"a", 10.0, 1));
        assert!(!table.admit(&"a", 10.0, 1));
        assert!(!table.admit(&"a", 12.0, 1));
        assert!(table.admit(&"a", 7.0, 2));
    }

    #[test]
    fn cheaper_cost_without_reopen_never_revisits_closed() {
        let mut table = VisitedTable::new(Revisit::CheaperCost { reopen: false });
        assert!(table.admit(&"a", 10.0, 1));
        table.close("a", visit(10.0, 1));

        assert!(!table.admit(&"a", 1.0, 1));
        assert!(!table.should_expand(&"a", 1.0, 1));
    }

    #[test]
    fn cheaper_cost_with_reopen_revisits_on_improvement() {
        let mut table = VisitedTable::new(Revisit::CheaperCost { reopen: true });
        assert!(table.admit(&"a", 10.0, 1));
        table.close("a", visit(10.0, 1));

        assert!(!table.should_expand(&"a", 10.0, 1));
        assert!(table.admit(&"a", 4.0, 1));
        assert!(table.should_expand(&"a", 4.0, 1));
        assert_eq!(table.get(&"a").map(|v| v.g), Some(10.0));
        assert_eq!(table.len(), 1);
    }
}
