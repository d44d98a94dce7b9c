//! # Graph Model
//!
//! The read-only neighbor-enumeration interface the engine searches over.
//!
//! This module implements the `Graph` trait for:
//! - `AdjacencyGraph`: a finite, precomputed adjacency list
//! - `ImplicitGraph`: a lazily generated graph backed by a successor closure
//! - `Reversed`: a view that swaps successors and predecessors
//!
//! The engine never mutates a graph, so one graph can serve any number of
//! concurrent searches.

use crate::primitives::UNIT_COST;
use crate::{Cost, SearchError, State};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// GRAPH TRAIT
// =============================================================================

/// The Graph trait defines how the engine discovers states.
///
/// `neighbors` is a pure function of the state. The order it returns is the
/// engine's tie-break: FIFO and priority frontiers keep it for equal keys and
/// LIFO frontiers expand the first neighbor first.
///
/// Costs must be non-negative for UCS, A* and bidirectional search; a
/// negative cost surfaces as `SearchError::InvalidGraph`.
pub trait Graph {
    /// The state type of this graph.
    type State: State;

    /// Outgoing edges of `state` as `(neighbor, cost)` pairs.
    fn neighbors(&self, state: &Self::State) -> Vec<(Self::State, Cost)>;

    /// Incoming edges of `state` as `(predecessor, cost)` pairs.
    ///
    /// Used by bidirectional search on the goal side. `None` means the graph
    /// cannot enumerate edges in reverse, which is the default; bidirectional
    /// search refuses such graphs. An undirected graph may return its
    /// `neighbors` here.
    fn predecessors(&self, state: &Self::State) -> Option<Vec<(Self::State, Cost)>> {
        let _ = state;
        None
    }

    /// Whether `state` belongs to the graph's known state set.
    ///
    /// Implicit graphs know every state, which is the default.
    fn contains(&self, state: &Self::State) -> bool {
        let _ = state;
        true
    }

    /// Reject negative or NaN edge costs before a cost-aware search starts.
    ///
    /// Finite graphs override this to check every edge. The default accepts
    /// the graph; the engine still rejects a bad edge when it meets one.
    fn validate_costs(&self) -> Result<(), SearchError> {
        Ok(())
    }
}

// =============================================================================
// ADJACENCY GRAPH
// =============================================================================

/// A finite directed graph stored as an adjacency list.
///
/// Uses `BTreeMap` for the state index. Neighbor lists keep insertion order,
/// since that order is the search tie-break.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyGraph<S> {
    /// Forward adjacency: state -> [(neighbor, cost)]
    edges: BTreeMap<S, Vec<(S, Cost)>>,

    /// Reverse adjacency: state -> [(predecessor, cost)]
    reverse: BTreeMap<S, Vec<(S, Cost)>>,
}

impl<S: State> Default for AdjacencyGraph<S> {
    fn default() -> Self {
        Self {
            edges: BTreeMap::new(),
            reverse: BTreeMap::new(),
        }
    }
}

impl<S: State> AdjacencyGraph<S> {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(from, to, cost)` triples.
    pub fn from_edges(edges: impl IntoIterator<Item = (S, S, Cost)>) -> Self {
        let mut graph = Self::new();
        for (from, to, cost) in edges {
            graph.add_edge(from, to, cost);
        }
        graph
    }

    /// Build a graph from an adjacency mapping `state -> [(neighbor, cost)]`.
    ///
    /// Every key becomes a state even when its neighbor list is empty.
    pub fn from_adjacency(adjacency: impl IntoIterator<Item = (S, Vec<(S, Cost)>)>) -> Self {
        let mut graph = Self::new();
        for (from, targets) in adjacency {
            graph.add_state(from.clone());
            for (to, cost) in targets {
                graph.add_edge(from.clone(), to, cost);
            }
        }
        graph
    }

    /// Insert a state with no edges. No-op if it already exists.
    pub fn add_state(&mut self, state: S) {
        self.reverse.entry(state.clone()).or_default();
        self.edges.entry(state).or_default();
    }

    /// Insert a directed edge. Both endpoints are added as states.
    ///
    /// Parallel edges are kept; the engine sees each of them.
    pub fn add_edge(&mut self, from: S, to: S, cost: Cost) {
        self.add_state(to.clone());
        self.add_state(from.clone());
        self.reverse
            .entry(to.clone())
            .or_default()
            .push((from.clone(), cost));
        self.edges.entry(from).or_default().push((to, cost));
    }

    /// Insert a directed edge with unit cost.
    pub fn add_unweighted_edge(&mut self, from: S, to: S) {
        self.add_edge(from, to, UNIT_COST);
    }

    /// Insert an edge in both directions with the same cost.
    pub fn add_undirected_edge(&mut self, a: S, b: S, cost: Cost) {
        self.add_edge(a.clone(), b.clone(), cost);
        self.add_edge(b, a, cost);
    }

    /// Check if the graph contains a state.
    #[must_use]
    pub fn contains_state(&self, state: &S) -> bool {
        self.edges.contains_key(state)
    }

    /// Cheapest cost of an edge `from -> to`, if any exists.
    #[must_use]
    pub fn edge_cost(&self, from: &S, to: &S) -> Option<Cost> {
        self.edges
            .get(from)?
            .iter()
            .filter(|(target, _)| target == to)
            .map(|(_, cost)| *cost)
            .min_by(Cost::total_cmp)
    }

    /// All states in deterministic order.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.edges.keys()
    }

    /// All edges: states in deterministic order, neighbors in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&S, &S, Cost)> + '_ {
        self.edges.iter().flat_map(|(from, targets)| {
            targets.iter().map(move |(to, cost)| (from, to, *cost))
        })
    }

    /// Get the total number of states.
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.edges.len()
    }

    /// Get the total number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

}

impl<S: State> Graph for AdjacencyGraph<S> {
    type State = S;

    fn neighbors(&self, state: &S) -> Vec<(S, Cost)> {
        self.edges.get(state).cloned().unwrap_or_default()
    }

    fn predecessors(&self, state: &S) -> Option<Vec<(S, Cost)>> {
        Some(self.reverse.get(state).cloned().unwrap_or_default())
    }

    fn contains(&self, state: &S) -> bool {
        self.contains_state(state)
    }

    /// Checks every edge, including those no search would reach.
    fn validate_costs(&self) -> Result<(), SearchError> {
        match self.edges().find(|(_, _, cost)| cost.is_nan() || *cost < 0.0) {
            Some((from, to, cost)) => Err(SearchError::InvalidGraph {
                from: format!("{from:?}"),
                to: format!("{to:?}"),
                cost,
            }),
            None => Ok(()),
        }
    }
}

// =============================================================================
// SERIALIZATION SUPPORT
// =============================================================================

/// One adjacency entry in the JSON form of a graph.
///
/// `["B", 2.5]` is a weighted edge; a bare `"B"` is an unweighted edge with
/// unit cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EdgeSpec<S> {
    /// Neighbor with an explicit cost.
    Weighted(S, Cost),
    /// Neighbor with unit cost.
    Unweighted(S),
}

impl<S> EdgeSpec<S> {
    fn into_pair(self) -> (S, Cost) {
        match self {
            Self::Weighted(to, cost) => (to, cost),
            Self::Unweighted(to) => (to, UNIT_COST),
        }
    }
}

impl<S: State + DeserializeOwned> AdjacencyGraph<S> {
    /// Parse a graph from a JSON adjacency object.
    ///
    /// ```json
    /// { "Madrid": [["Paris", 1275], ["Lisboa", 635]], "Paris": ["Roma"] }
    /// ```
    pub fn from_json(json: &str) -> Result<Self, SearchError> {
        let raw: BTreeMap<S, Vec<EdgeSpec<S>>> = serde_json::from_str(json)
            .map_err(|e| SearchError::DeserializationError(e.to_string()))?;
        Ok(Self::from_adjacency(raw.into_iter().map(|(from, targets)| {
            (from, targets.into_iter().map(EdgeSpec::into_pair).collect())
        })))
    }
}

impl<S: State + Serialize> AdjacencyGraph<S> {
    /// Write the graph as a JSON adjacency object in weighted form.
    pub fn to_json(&self) -> Result<String, SearchError> {
        let adjacency: BTreeMap<&S, Vec<EdgeSpec<&S>>> = self
            .edges
            .iter()
            .map(|(from, targets)| {
                let specs = targets
                    .iter()
                    .map(|(to, cost)| EdgeSpec::Weighted(to, *cost))
                    .collect();
                (from, specs)
            })
            .collect();
        serde_json::to_string_pretty(&adjacency)
            .map_err(|e| SearchError::SerializationError(e.to_string()))
    }
}

// =============================================================================
// IMPLICIT GRAPH
// =============================================================================

type Expansion<S> = Box<dyn Fn(&S) -> Vec<(S, Cost)> + Send + Sync>;

/// A graph generated on demand by a successor function.
///
/// Suits infinite or unknown state spaces (online search). Every state is
/// considered known, so `InvalidInput` never fires; bound such searches with
/// a `Budget`. Bidirectional search needs `with_predecessors`.
///
/// Edge costs are checked lazily, as the engine enumerates them.
pub struct ImplicitGraph<S> {
    successors: Expansion<S>,
    predecessors: Option<Expansion<S>>,
}

impl<S: State> ImplicitGraph<S> {
    /// Create a graph from a successor function.
    pub fn new(successors: impl Fn(&S) -> Vec<(S, Cost)> + Send + Sync + 'static) -> Self {
        Self {
            successors: Box::new(successors),
            predecessors: None,
        }
    }

    /// Attach a predecessor function, enabling bidirectional search.
    ///
    /// For an undirected graph pass the successor function again.
    #[must_use]
    pub fn with_predecessors(
        mut self,
        predecessors: impl Fn(&S) -> Vec<(S, Cost)> + Send + Sync + 'static,
    ) -> Self {
        self.predecessors = Some(Box::new(predecessors));
        self
    }
}

impl<S: State> Graph for ImplicitGraph<S> {
    type State = S;

    fn neighbors(&self, state: &S) -> Vec<(S, Cost)> {
        (self.successors)(state)
    }

    fn predecessors(&self, state: &S) -> Option<Vec<(S, Cost)>> {
        self.predecessors
            .as_ref()
            .map(|predecessors| predecessors(state))
    }
}

// =============================================================================
// REVERSED VIEW
// =============================================================================

/// A graph view with every edge reversed.
///
/// The goal side of bidirectional search runs over this view. A state the
/// inner graph cannot enumerate in reverse has no neighbors here.
#[derive(Debug)]
pub struct Reversed<'a, G: ?Sized> {
    inner: &'a G,
}

impl<'a, G: Graph + ?Sized> Reversed<'a, G> {
    /// Wrap a graph.
    #[must_use]
    pub fn new(inner: &'a G) -> Self {
        Self { inner }
    }
}

impl<G: Graph + ?Sized> Graph for Reversed<'_, G> {
    type State = G::State;

    fn neighbors(&self, state: &G::State) -> Vec<(G::State, Cost)> {
        self.inner.predecessors(state).unwrap_or_default()
    }

    fn predecessors(&self, state: &G::State) -> Option<Vec<(G::State, Cost)>> {
        Some(self.inner.neighbors(state))
    }

    fn contains(&self, state: &G::State) -> bool {
        self.inner.contains(state)
    }

    fn validate_costs(&self) -> Result<(), SearchError> {
        self.inner.validate_costs()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_keep_insertion_order() {
        let mut graph = AdjacencyGraph::new();
        graph.add_edge("a", "c", 1.0);
        graph.add_edge("a", "b", 2.0);

        let neighbors: Vec<_> = graph.neighbors(&"a").into_iter().map(|(n, _)| n).collect();

        // Not sorted: enumeration order is the tie-break
        assert_eq!(neighbors, vec!["c", "b"]);
    }

    #[test]
    fn edge_targets_become_states() {
        let mut graph = AdjacencyGraph::new();
        graph.add_unweighted_edge("a", "b");

        assert!(graph.contains(&"a"));
        assert!(graph.contains(&"b"));
        assert!(!graph.contains(&"z"));
        assert_eq!(graph.state_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn predecessors_follow_reverse_index() {
        let graph = AdjacencyGraph::from_edges([("a", "c", 1.0), ("b", "c", 4.0)]);

        assert_eq!(graph.predecessors(&"c"), Some(vec![("a", 1.0), ("b", 4.0)]));
        assert_eq!(graph.predecessors(&"a"), Some(Vec::new()));
    }

    #[test]
    fn edge_cost_picks_cheapest_parallel_edge() {
        let graph = AdjacencyGraph::from_edges([(1, 2, 5.0), (1, 2, 3.0)]);
        assert_eq!(graph.edge_cost(&1, &2), Some(3.0));
        assert_eq!(graph.edge_cost(&2, &1), None);
    }

    #[test]
    fn from_adjacency_keeps_isolated_states() {
        let graph = AdjacencyGraph::from_adjacency([("solo", Vec::new()), ("a", vec![("b", 1.0)])]);
        assert!(graph.contains(&"solo"));
        assert!(graph.neighbors(&"solo").is_empty());
    }

    #[test]
    fn from_json_accepts_weighted_and_bare_neighbors() {
        let json = r#"{ "A": [["B", 2.5], "C"], "C": [] }"#;
        let graph: AdjacencyGraph<String> = AdjacencyGraph::from_json(json).expect("parse");

        assert_eq!(
            graph.neighbors(&"A".to_string()),
            vec![("B".to_string(), 2.5), ("C".to_string(), UNIT_COST)]
        );
        assert!(graph.contains(&"B".to_string()));
    }

    #[test]
    fn from_json_rejects_malformed_input() {
        let result: Result<AdjacencyGraph<String>, _> = AdjacencyGraph::from_json("[1, 2]");
        assert!(matches!(result, Err(SearchError::DeserializationError(_))));
    }

    #[test]
    fn to_json_is_readable_by_from_json() {
        let mut graph = AdjacencyGraph::new();
        graph.add_edge("x".to_string(), "y".to_string(), 0.5);
        graph.add_state("z".to_string());

        let json = graph.to_json().expect("serialize");
        let restored: AdjacencyGraph<String> = AdjacencyGraph::from_json(&json).expect("parse");

        assert_eq!(graph, restored);
    }

    #[test]
    fn validate_costs_reports_negative_edge() {
        let graph = AdjacencyGraph::from_edges([("a", "b", 1.0), ("b", "c", -2.0)]);
        let err = graph.validate_costs().expect_err("negative cost");
        assert!(matches!(err, SearchError::InvalidGraph { cost, .. } if cost == -2.0));
        assert!(Reversed::new(&graph).validate_costs().is_err());
    }

    #[test]
    fn validate_costs_rejects_nan() {
        let graph = AdjacencyGraph::from_edges([(1, 2, Cost::NAN)]);
        assert!(graph.validate_costs().is_err());
        assert_eq!(AdjacencyGraph::from_edges([(1, 2, 0.0)]).validate_costs(), Ok(()));
    }

    #[test]
    fn implicit_graph_generates_successors() {
        let graph = ImplicitGraph::new(|n: &u64| vec![(n + 1, 1.0), (n * 2, 1.0)]);
        assert_eq!(graph.neighbors(&3), vec![(4, 1.0), (6, 1.0)]);
        assert!(graph.contains(&1_000_000));
        assert_eq!(graph.predecessors(&3), None);
        assert_eq!(graph.validate_costs(), Ok(()));
    }

    #[test]
    fn implicit_graph_uses_predecessor_function() {
        let graph = ImplicitGraph::new(|n: &u64| vec![(n + 1, 1.0)])
            .with_predecessors(|n: &u64| n.checked_sub(1).map(|p| (p, 1.0)).into_iter().collect());
        assert_eq!(graph.predecessors(&3), Some(vec![(2, 1.0)]));
        assert_eq!(graph.predecessors(&0), Some(Vec::new()));
    }

    #[test]
    fn reversed_view_swaps_directions() {
        let graph = AdjacencyGraph::from_edges([("a", "b", 1.0)]);
        let reversed = Reversed::new(&graph);

        assert_eq!(reversed.neighbors(&"b"), vec![("a", 1.0)]);
        assert!(reversed.neighbors(&"a").is_empty());
        assert_eq!(reversed.predecessors(&"a"), Some(vec![("b", 1.0)]));
        assert!(reversed.contains(&"a"));
    }

    #[test]
    fn reversed_view_of_forward_only_graph_is_empty() {
        let graph = ImplicitGraph::new(|n: &u64| vec![(n + 1, 1.0)]);
        assert!(Reversed::new(&graph).neighbors(&3).is_empty());
    }
}
