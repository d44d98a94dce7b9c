//! # Engine Primitives
//!
//! Hardcoded constants for the Wayfinder engine.
//!
//! These values are compiled into the crate and are immutable at runtime.

use crate::Cost;

/// Cost of an edge in an unweighted graph.
///
/// Adjacency entries given without a cost (`"B"` instead of `["B", 2.5]`)
/// get this cost, so the reported path cost equals the edge count.
pub const UNIT_COST: Cost = 1.0;

/// Default ceiling for iterative deepening.
///
/// - `Strategy::iddfs()` uses this as `max_limit`.
/// - Guarantees termination on goals that are unreachable in a graph whose
///   reachable region is deeper than the ceiling.
pub const DEFAULT_MAX_DEPTH_LIMIT: usize = 100;
