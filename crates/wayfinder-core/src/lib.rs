//! # wayfinder-core
//!
//! A unified, deterministic graph-search engine.
//!
//! Breadth-first, depth-first, depth-limited, iterative-deepening,
//! uniform-cost, greedy best-first, A* and bidirectional search all run on
//! one generic expand/test/push loop. A strategy only chooses the frontier
//! ordering and the revisit rule.
//!
//! ## Architecture
//!
//! - `graph` / `heuristic`: what the caller supplies
//! - `arena`: append-only node storage; parents are indices, not pointers
//! - `frontier` / `visited`: per-strategy ordering and revisit policy
//! - `search`: the public entry point, dispatching to the engine loop,
//!   the IDDFS driver or the bidirectional coordinator
//!
//! ## Guarantees
//!
//! - Deterministic: identical input gives identical output, ties are broken
//!   by neighbor enumeration order and insertion order
//! - No panics in library code: every failure is a `SearchError`
//! - Bounded: an optional `Budget` caps expansions and wall-clock time
//! - Graphs are only read, so independent searches may share one graph
//!   across threads

// =============================================================================
// MODULES
// =============================================================================

pub mod arena;
pub mod budget;
pub mod config;
pub mod frontier;
pub mod graph;
pub mod heuristic;
pub mod path;
pub mod primitives;
pub mod search;
pub mod strategy;
pub mod types;
pub mod visited;

mod bidirectional;
mod engine;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Cost, SearchError, SearchOutcome, SearchStats, SearchStatus, State};

// =============================================================================
// RE-EXPORTS: Search Engine
// =============================================================================

pub use budget::Budget;
pub use config::SearchConfig;
pub use graph::{AdjacencyGraph, EdgeSpec, Graph, ImplicitGraph, Reversed};
pub use heuristic::{Heuristic, HeuristicTable};
pub use path::{is_valid_path, path_cost};
pub use search::{Search, search};
pub use strategy::{ReopenPolicy, Strategy};

// =============================================================================
// RE-EXPORTS: Primitives
// =============================================================================

pub use primitives::{DEFAULT_MAX_DEPTH_LIMIT, UNIT_COST};
