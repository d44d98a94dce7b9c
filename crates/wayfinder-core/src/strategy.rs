//! # Search Strategies
//!
//! One tagged enum selects the algorithm; the engine loop is shared.
//!
//! Each strategy is reduced to an expansion `Profile` (how revisits are
//! handled, whether negative costs are rejected, when the goal is tested)
//! plus a frontier ordering chosen in `search`.

use crate::primitives::DEFAULT_MAX_DEPTH_LIMIT;
use crate::visited::Revisit;
use crate::SearchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The search algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Strategy {
    /// Breadth-first search: fewest edges.
    #[default]
    Bfs,
    /// Depth-first search: no optimality guarantee.
    Dfs,
    /// Depth-limited DFS. Paths longer than `limit` edges are not explored.
    Dls { limit: usize },
    /// Iterative deepening: DLS with limit 0, 1, ... up to `max_limit`.
    Iddfs {
        #[serde(default = "default_max_limit")]
        max_limit: usize,
    },
    /// Uniform-cost search: cheapest path.
    Ucs,
    /// Greedy best-first search on h alone.
    Greedy,
    /// A*: cheapest path given an admissible heuristic.
    #[serde(rename = "astar", alias = "a_star")]
    AStar,
    /// Two breadth-first searches meeting in the middle.
    Bidirectional,
}

fn default_max_limit() -> usize {
    DEFAULT_MAX_DEPTH_LIMIT
}

impl Strategy {
    /// IDDFS with the default depth ceiling.
    #[must_use]
    pub const fn iddfs() -> Self {
        Self::Iddfs {
            max_limit: DEFAULT_MAX_DEPTH_LIMIT,
        }
    }

    /// Short lowercase name, as used in configuration files.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
            Self::Dls { .. } => "dls",
            Self::Iddfs { .. } => "iddfs",
            Self::Ucs => "ucs",
            Self::Greedy => "greedy",
            Self::AStar => "astar",
            Self::Bidirectional => "bidirectional",
        }
    }

    /// Returns `true` if the strategy needs a heuristic.
    #[must_use]
    pub const fn is_informed(&self) -> bool {
        matches!(self, Self::Greedy | Self::AStar)
    }

    /// Returns `true` if the strategy orders by accumulated cost and so
    /// requires non-negative edge costs.
    #[must_use]
    pub const fn is_cost_aware(&self) -> bool {
        matches!(self, Self::Ucs | Self::AStar | Self::Bidirectional)
    }

    /// Returns `true` if the goal may be tested when a child is generated.
    ///
    /// Cost-ordered strategies must test on pop to stay optimal, and
    /// depth-bounded ones would accept a goal one level past the limit.
    #[must_use]
    pub const fn supports_early_goal_test(&self) -> bool {
        matches!(self, Self::Bfs | Self::Dfs | Self::Greedy)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dls { limit } => write!(f, "dls:{limit}"),
            Self::Iddfs { max_limit } => write!(f, "iddfs:{max_limit}"),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for Strategy {
    type Err = SearchError;

    /// Parse `bfs`, `dfs`, `dls:<limit>`, `iddfs`, `iddfs:<max_limit>`,
    /// `ucs`, `greedy`, `astar` or `bidirectional` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let (name, arg) = match lowered.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (lowered.as_str(), None),
        };
        let parse_arg = |arg: &str| {
            arg.parse::<usize>().map_err(|_| {
                SearchError::InvalidConfig(format!("invalid depth limit '{arg}' in '{s}'"))
            })
        };

        match (name, arg) {
            ("bfs", None) => Ok(Self::Bfs),
            ("dfs", None) => Ok(Self::Dfs),
            ("dls", Some(arg)) => Ok(Self::Dls {
                limit: parse_arg(arg)?,
            }),
            ("dls", None) => Err(SearchError::InvalidConfig(
                "dls requires a limit, e.g. 'dls:3'".to_string(),
            )),
            ("iddfs", None) => Ok(Self::iddfs()),
            ("iddfs", Some(arg)) => Ok(Self::Iddfs {
                max_limit: parse_arg(arg)?,
            }),
            ("ucs", None) => Ok(Self::Ucs),
            ("greedy", None) => Ok(Self::Greedy),
            ("astar" | "a_star" | "a*", None) => Ok(Self::AStar),
            ("bidirectional", None) => Ok(Self::Bidirectional),
            _ => Err(SearchError::InvalidConfig(format!("unknown strategy '{s}'"))),
        }
    }
}

// =============================================================================
// REOPEN POLICY
// =============================================================================

/// How A* treats a closed state reached again with a cheaper g.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReopenPolicy {
    /// Never re-expand a closed state. Optimal with a consistent heuristic.
    #[default]
    Closed,
    /// Re-expand on a cheaper g. Optimal with an admissible heuristic.
    Reopen,
}

// =============================================================================
// EXPANSION PROFILE
// =============================================================================

/// Per-strategy switches read by the engine loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Profile {
    pub(crate) revisit: Revisit,
    pub(crate) rejects_negative_costs: bool,
    pub(crate) early_goal_test: bool,
}

impl Profile {
    /// Callers validate `early_goal_test` against the strategy first.
    pub(crate) fn for_strategy(
        strategy: Strategy,
        reopen: ReopenPolicy,
        early_goal_test: bool,
    ) -> Self {
        let revisit = match strategy {
            Strategy::Bfs | Strategy::Dfs | Strategy::Greedy | Strategy::Bidirectional => {
                Revisit::Never
            }
            Strategy::Dls { .. } | Strategy::Iddfs { .. } => Revisit::ShallowerDepth,
            Strategy::Ucs => Revisit::CheaperCost { reopen: false },
            Strategy::AStar => Revisit::CheaperCost {
                reopen: reopen == ReopenPolicy::Reopen,
            },
        };
        Self {
            revisit,
            rejects_negative_costs: strategy.is_cost_aware(),
            early_goal_test,
        }
    }
}
