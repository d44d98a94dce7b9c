//! # Node Arena
//!
//! Append-only storage for search nodes, addressed by index.
//!
//! A node's parent is a `NodeIndex` into the same arena: lineage only, never
//! ownership. The arena owns every node for the lifetime of one search and is
//! dropped with it, so parent indices stay valid for as long as they exist.

use crate::Cost;
use std::ops::Index;

/// Position of a node in its arena.
///
/// Only `Arena::push` creates indices, so an index is always in bounds for
/// the arena that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// The raw position.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

/// An immutable search node.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchNode<S> {
    /// The state this node reached.
    pub state: S,
    /// The node this one was generated from (`None` for the root).
    pub parent: Option<NodeIndex>,
    /// Accumulated path cost from the root.
    pub g: Cost,
    /// Heuristic estimate to the goal (0 for uninformed strategies).
    pub h: Cost,
    /// Number of edges from the root.
    pub depth: usize,
}

impl<S> SearchNode<S> {
    /// Root node of a search.
    #[must_use]
    pub fn root(state: S, h: Cost) -> Self {
        Self {
            state,
            parent: None,
            g: 0.0,
            h,
            depth: 0,
        }
    }

    /// `f = g + h`, the A* ordering key.
    #[must_use]
    pub fn f(&self) -> Cost {
        self.g + self.h
    }
}

/// Append-only node storage for one search.
#[derive(Debug, Clone)]
pub struct Arena<S> {
    nodes: Vec<SearchNode<S>>,
}

impl<S> Default for Arena<S> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<S> Arena<S> {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and return its index.
    ///
    /// The parent, if any, must already be in the arena.
    pub fn push(&mut self, node: SearchNode<S>) -> NodeIndex {
        debug_assert!(node.parent.is_none_or(|p| p.0 < self.nodes.len()));
        let index = NodeIndex(self.nodes.len());
        self.nodes.push(node);
        index
    }

    /// Look up a node.
    #[must_use]
    pub fn get(&self, index: NodeIndex) -> Option<&SearchNode<S>> {
        self.nodes.get(index.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walk from `index` up to the root, yielding each node on the way.
    pub fn lineage(&self, index: NodeIndex) -> Lineage<'_, S> {
        Lineage {
            arena: self,
            next: Some(index),
        }
    }
}

impl<S> Index<NodeIndex> for Arena<S> {
    type Output = SearchNode<S>;

    fn index(&self, index: NodeIndex) -> &SearchNode<S> {
        &self.nodes[index.0]
    }
}

/// Iterator over a node and its ancestors, child first.
#[derive(Debug)]
pub struct Lineage<'a, S> {
    arena: &'a Arena<S>,
    next: Option<NodeIndex>,
}

impl<'a, S> Iterator for Lineage<'a, S> {
    type Item = &'a SearchNode<S>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.arena.get(self.next?)?;
        self.next = node.parent;
        Some(node)
    }
}
