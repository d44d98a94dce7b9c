//! # Search Configuration
//!
//! `SearchConfig` bundles the strategy and its options so they can be loaded
//! from a TOML file:
//!
//! ```toml
//! reopen = "closed"
//! early_goal_test = false
//!
//! [strategy]
//! kind = "iddfs"
//! max_limit = 25
//!
//! [budget]
//! max_expansions = 100000
//! deadline_ms = 2000
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use crate::budget::Budget;
use crate::strategy::{ReopenPolicy, Strategy};
use crate::SearchError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Strategy plus options for one or more searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Algorithm to run. Defaults to BFS.
    pub strategy: Strategy,
    /// Expansion and time limits. Defaults to unbounded.
    pub budget: Budget,
    /// A* reopening policy. Only `Closed` is valid for other strategies.
    pub reopen: ReopenPolicy,
    /// Test the goal when a child is generated rather than when it is popped.
    pub early_goal_test: bool,
}

impl SearchConfig {
    /// Configuration for `strategy` with default options.
    #[must_use]
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self, SearchError> {
        let config: Self =
            toml::from_str(toml).map_err(|e| SearchError::DeserializationError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SearchError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SearchError::IoError(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    /// Reject option combinations that would silently break a strategy's
    /// guarantees.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.early_goal_test && !self.strategy.supports_early_goal_test() {
            return Err(SearchError::InvalidConfig(format!(
                "early goal test is not supported by {}",
                self.strategy.name()
            )));
        }
        if self.reopen == ReopenPolicy::Reopen && self.strategy != Strategy::AStar {
            return Err(SearchError::InvalidConfig(format!(
                "reopening applies to astar only, not {}",
                self.strategy.name()
            )));
        }
        Ok(())
    }
}
