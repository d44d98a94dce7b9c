//! Resource bounds for a search.
//!
//! A `Budget` caps the number of node expansions and/or the wall-clock time
//! of one search invocation. Running out yields `SearchStatus::ResourceExhausted`,
//! distinct from `Exhausted`, so searches over infinite graphs always return.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Expansion and time limits. Both `None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Budget {
    /// Maximum number of node expansions.
    pub max_expansions: Option<u64>,
    /// Wall-clock deadline in milliseconds, measured from search start.
    pub deadline_ms: Option<u64>,
}

impl Budget {
    /// No limits.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            max_expansions: None,
            deadline_ms: None,
        }
    }

    /// Limit expansions only.
    #[must_use]
    pub const fn expansions(max: u64) -> Self {
        Self {
            max_expansions: Some(max),
            deadline_ms: None,
        }
    }

    /// Limit wall-clock time only.
    #[must_use]
    pub const fn deadline_ms(ms: u64) -> Self {
        Self {
            max_expansions: None,
            deadline_ms: Some(ms),
        }
    }

    /// Add a deadline to this budget.
    #[must_use]
    pub const fn with_deadline_ms(mut self, ms: u64) -> Self {
        self.deadline_ms = Some(ms);
        self
    }

    /// Returns `true` if neither limit is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.max_expansions.is_none() && self.deadline_ms.is_none()
    }
}

/// Tracks consumption of a `Budget` across one search.
///
/// IDDFS rounds and both sides of a bidirectional search share one meter.
#[derive(Debug)]
pub(crate) struct BudgetMeter {
    budget: Budget,
    started: Instant,
    expanded: u64,
}

impl BudgetMeter {
    pub(crate) fn start(budget: Budget) -> Self {
        Self {
            budget,
            started: Instant::now(),
            expanded: 0,
        }
    }

    pub(crate) fn record_expansion(&mut self) {
        self.expanded = self.expanded.saturating_add(1);
    }

    /// Whether another expansion would exceed the budget.
    pub(crate) fn exceeded(&self) -> bool {
        if self
            .budget
            .max_expansions
            .is_some_and(|max| self.expanded >= max)
        {
            return true;
        }
        self.budget
            .deadline_ms
            .is_some_and(|ms| self.started.elapsed() >= Duration::from_millis(ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_never_exceeds() {
        let mut meter = BudgetMeter::start(Budget::unbounded());
        for _ in 0..10_000 {
            meter.record_expansion();
        }
        assert!(!meter.exceeded());
        assert!(Budget::default().is_unbounded());
    }

    #[test]
    fn expansion_cap_trips_at_limit() {
        let mut meter = BudgetMeter::start(Budget::expansions(2));
        assert!(!meter.exceeded());
        meter.record_expansion();
        assert!(!meter.exceeded());
        meter.record_expansion();
        assert!(meter.exceeded());
    }

    #[test]
    fn zero_deadline_is_already_exceeded() {
        let meter = BudgetMeter::start(Budget::deadline_ms(0));
        assert!(meter.exceeded());
    }

    #[test]
    fn combined_budget_keeps_both_limits() {
        let budget = Budget::expansions(5).with_deadline_ms(60_000);
        assert_eq!(budget.max_expansions, Some(5));
        assert_eq!(budget.deadline_ms, Some(60_000));
        assert!(!budget.is_unbounded());
        assert!(!BudgetMeter::start(budget).exceeded());
    }
}
