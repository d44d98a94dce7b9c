//! # Heuristics
//!
//! Estimates of the remaining cost from a state to the goal, used by Greedy
//! best-first search and A*.
//!
//! Admissibility (never overestimating) is the caller's precondition for A*
//! optimality; the engine does not verify it. It does reject missing and
//! negative estimates.

use crate::{Cost, SearchError, State};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

/// A remaining-cost estimate for states of type `S`.
///
/// `None` means the heuristic has no entry for the state, which the engine
/// reports as `SearchError::InvalidHeuristic`.
pub trait Heuristic<S> {
    /// Estimated cost from `state` to the goal, or `None` if unknown.
    fn estimate(&self, state: &S) -> Option<Cost>;
}

impl<S, F> Heuristic<S> for F
where
    F: Fn(&S) -> Cost,
{
    fn estimate(&self, state: &S) -> Option<Cost> {
        Some(self(state))
    }
}

/// A heuristic given as an explicit table `state -> estimate`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicTable<S> {
    values: BTreeMap<S, Cost>,
}

impl<S: State> Default for HeuristicTable<S> {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }
}

impl<S: State> HeuristicTable<S> {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the estimate for a state, replacing any previous one.
    pub fn insert(&mut self, state: S, estimate: Cost) {
        self.values.insert(state, estimate);
    }

    /// Look up the estimate for a state.
    #[must_use]
    pub fn get(&self, state: &S) -> Option<Cost> {
        self.values.get(state).copied()
    }

    /// Number of states with an estimate.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the table has no estimates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: State + DeserializeOwned> HeuristicTable<S> {
    /// Parse a table from a JSON object such as `{"Madrid": 1500, "Atenas": 0}`.
    pub fn from_json(json: &str) -> Result<Self, SearchError> {
        let values: BTreeMap<S, Cost> = serde_json::from_str(json)
            .map_err(|e| SearchError::DeserializationError(e.to_string()))?;
        Ok(Self { values })
    }
}

impl<S: State> FromIterator<(S, Cost)> for HeuristicTable<S> {
    fn from_iter<I: IntoIterator<Item = (S, Cost)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<S: State> Heuristic<S> for HeuristicTable<S> {
    fn estimate(&self, state: &S) -> Option<Cost> {
        self.get(state)
    }
}

/// Evaluate a heuristic, turning gaps and negative values into errors.
pub(crate) fn evaluate<S: State>(
    heuristic: &dyn Heuristic<S>,
    state: &S,
) -> Result<Cost, SearchError> {
    match heuristic.estimate(state) {
        None => Err(SearchError::InvalidHeuristic(format!(
            "no estimate for state {state:?}"
        ))),
        Some(h) if h.is_nan() || h < 0.0 => Err(SearchError::InvalidHeuristic(format!(
            "estimate {h} for state {state:?} is negative"
        ))),
        Some(h) => Ok(h),
    }
}

// =============================================================================
// TESTS
// =============================================================================
