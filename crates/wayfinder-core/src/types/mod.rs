//! # Core Type Definitions
//!
//! This module contains the shared vocabulary of the Wayfinder search engine:
//! - Cost and state bounds (`Cost`, `State`)
//! - Search results (`SearchStatus`, `SearchOutcome`, `SearchStats`)
//! - Error types (`SearchError`)
//!
//! ## Determinism Guarantees
//!
//! All state-keyed tables in the engine are `BTreeMap`/`BTreeSet`, so every
//! state type must implement `Ord`. Two runs over identical input produce
//! identical outcomes, including the serialized form.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// COST & STATE
// =============================================================================

/// Edge and path cost. Non-negative for every cost-aware strategy.
pub type Cost = f64;

/// A search state: an opaque, comparable identifier chosen by the caller.
///
/// Labels, coordinate tuples and board configurations all qualify. The engine
/// clones states into its arena and never mutates them.
pub trait State: Clone + Ord + fmt::Debug {}

impl<T: Clone + Ord + fmt::Debug> State for T {}

// =============================================================================
// SEARCH STATUS
// =============================================================================

/// How a search terminated.
///
/// Only `Found` carries a path. The remaining variants are regular results,
/// not errors: callers decide whether "no path at this limit" matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// The goal was reached; the outcome holds the path and its cost.
    Found,
    /// A depth bound stopped the search before the reachable region was
    /// exhausted. Retrying with a larger limit may succeed.
    Cutoff,
    /// The frontier emptied without reaching the goal: no path exists.
    Exhausted,
    /// The expansion budget or deadline ran out before a conclusive result.
    ResourceExhausted,
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Found => "found",
            Self::Cutoff => "cutoff",
            Self::Exhausted => "exhausted",
            Self::ResourceExhausted => "resource exhausted",
        };
        f.write_str(label)
    }
}

// =============================================================================
// SEARCH STATISTICS
// =============================================================================

/// Counters collected while a search runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Nodes whose neighbors were enumerated.
    pub expanded: u64,
    /// Nodes created in the arena, the root included.
    pub generated: u64,
    /// Largest frontier size observed.
    pub peak_frontier: usize,
    /// Depth-limited rounds run (IDDFS only; 0 otherwise).
    pub rounds: u32,
}

impl SearchStats {
    /// Fold the counters of another run into this one.
    ///
    /// Counts add up; the frontier peak keeps the larger of the two.
    pub fn absorb(&mut self, other: &Self) {
        self.expanded = self.expanded.saturating_add(other.expanded);
        self.generated = self.generated.saturating_add(other.generated);
        self.peak_frontier = self.peak_frontier.max(other.peak_frontier);
        self.rounds = self.rounds.saturating_add(other.rounds);
    }
}

// =============================================================================
// SEARCH OUTCOME
// =============================================================================

/// Result of one search invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome<S> {
    /// Termination status.
    pub status: SearchStatus,
    /// Start-to-goal path, inclusive on both ends. `Some` iff `status` is `Found`.
    pub path: Option<Vec<S>>,
    /// Sum of edge costs along `path`.
    pub cost: Option<Cost>,
    /// Expansion counters.
    pub stats: SearchStats,
}

impl<S> SearchOutcome<S> {
    /// A successful outcome.
    #[must_use]
    pub fn found(path: Vec<S>, cost: Cost, stats: SearchStats) -> Self {
        Self {
            status: SearchStatus::Found,
            path: Some(path),
            cost: Some(cost),
            stats,
        }
    }

    /// An outcome without a path.
    #[must_use]
    pub fn unsolved(status: SearchStatus, stats: SearchStats) -> Self {
        Self {
            status,
            path: None,
            cost: None,
            stats,
        }
    }

    /// Returns `true` if the goal was reached.
    #[must_use]
    pub fn is_found(&self) -> bool {
        self.status == SearchStatus::Found
    }

    /// Number of nodes expanded.
    #[must_use]
    pub fn expanded(&self) -> u64 {
        self.stats.expanded
    }

    /// Number of edges in the path, if one was found.
    #[must_use]
    pub fn edge_count(&self) -> Option<usize> {
        self.path.as_ref().map(|p| p.len().saturating_sub(1))
    }

    /// Replace the statistics, keeping status and path.
    #[must_use]
    pub fn with_stats(mut self, stats: SearchStats) -> Self {
        self.stats = stats;
        self
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Wayfinder engine.
///
/// - No silent failures
/// - Use `Result<T, SearchError>` for fallible operations
/// - The engine never panics; all errors are returned to the caller
///
/// States are rendered with their `Debug` form so the error type stays
/// independent of the caller's state type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// The start or goal state is unknown to the graph.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A negative (or NaN) edge cost was met by a cost-aware strategy.
    #[error("Invalid graph: edge {from} -> {to} has cost {cost}")]
    InvalidGraph {
        from: String,
        to: String,
        cost: Cost,
    },

    /// The heuristic is missing, has no entry for a needed state, or
    /// produced a negative estimate.
    #[error("Invalid heuristic: {0}")]
    InvalidHeuristic(String),

    /// The search configuration combines options that break a guarantee.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_absorb_adds_counts_and_keeps_peak() {
        let mut total = SearchStats {
            expanded: 3,
            generated: 5,
            peak_frontier: 4,
            rounds: 1,
        };
        total.absorb(&SearchStats {
            expanded: 2,
            generated: 2,
            peak_frontier: 2,
            rounds: 1,
        });
        assert_eq!(total.expanded, 5);
        assert_eq!(total.generated, 7);
        assert_eq!(total.peak_frontier, 4);
        assert_eq!(total.rounds, 2);
    }

    #[test]
    fn found_outcome_reports_edges() {
        let outcome = SearchOutcome::found(vec!["a", "b", "c"], 2.0, SearchStats::default());
        assert!(outcome.is_found());
        assert_eq!(outcome.edge_count(), Some(2));
        assert_eq!(outcome.cost, Some(2.0));
    }

    #[test]
    fn unsolved_outcome_has_no_path() {
        let outcome: SearchOutcome<u32> =
            SearchOutcome::unsolved(SearchStatus::Cutoff, SearchStats::default());
        assert!(!outcome.is_found());
        assert_eq!(outcome.path, None);
        assert_eq!(outcome.edge_count(), None);
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&SearchStatus::ResourceExhausted).expect("serialize");
        assert_eq!(json, "\"resource_exhausted\"");
    }

    #[test]
    fn error_messages_name_the_edge() {
        let err = SearchError::InvalidGraph {
            from: "\"a\"".into(),
            to: "\"b\"".into(),
            cost: -1.0,
        };
        assert_eq!(err.to_string(), "Invalid graph: edge \"a\" -> \"b\" has cost -1");
    }
}
