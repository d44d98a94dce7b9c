//! # Path Reconstruction
//!
//! Turns arena lineage into start-to-goal state sequences, stitches the two
//! halves of a bidirectional search, and checks paths against a graph.

use crate::arena::{Arena, NodeIndex};
use crate::graph::Graph;
use crate::{Cost, State};

/// Walk parent indices from `index` to the root and return the states
/// root-first.
#[must_use]
pub fn reconstruct<S: State>(arena: &Arena<S>, index: NodeIndex) -> Vec<S> {
    let mut path: Vec<S> = arena.lineage(index).map(|node| node.state.clone()).collect();
    path.reverse();
    path
}

/// Join a forward path `start..=meeting` with a backward path
/// `goal..=meeting` into `start..=goal`.
///
/// The meeting state appears once. Returns `forward` unchanged if
/// `backward` is empty.
#[must_use]
pub fn stitch<S>(mut forward: Vec<S>, backward: Vec<S>) -> Vec<S> {
    forward.extend(backward.into_iter().rev().skip(1));
    forward
}

/// Sum of edge costs along `path`, using the cheapest edge for each hop.
///
/// Returns `None` for an empty path or when a hop is not an edge of the
/// graph. A single-state path costs 0.
pub fn path_cost<G: Graph + ?Sized>(graph: &G, path: &[G::State]) -> Option<Cost> {
    let first = path.first()?;
    if !graph.contains(first) {
        return None;
    }
    path.windows(2).try_fold(0.0, |total, hop| {
        let [from, to] = hop else { return None };
        graph
            .neighbors(from)
            .into_iter()
            .filter(|(next, cost)| next == to && *cost >= 0.0)
            .map(|(_, cost)| cost)
            .min_by(Cost::total_cmp)
            .map(|cost| total + cost)
    })
}

/// Whether every state of `path` is in the graph and every consecutive pair
/// is an edge with non-negative cost.
pub fn is_valid_path<G: Graph + ?Sized>(graph: &G, path: &[G::State]) -> bool {
    path.iter().all(|state| graph.contains(state)) && path_cost(graph, path).is_some()
}
