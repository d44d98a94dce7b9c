//! # Search Entry Point
//!
//! `search` is the single-call API; `Search` is the builder behind it.
//!
//! Before any expansion the request is checked:
//! - the configuration must be valid (`InvalidConfig`)
//! - start and goal must be known to the graph (`InvalidInput`)
//! - bidirectional search needs a graph that enumerates predecessors
//!   (`InvalidConfig`)
//! - cost-aware strategies need non-negative edge costs, as far as the graph
//!   can check them up front (`InvalidGraph`)
//! - informed strategies must have a heuristic (`InvalidHeuristic`)
//!
//! Terminations that are not errors (`Cutoff`, `Exhausted`,
//! `ResourceExhausted`) come back inside the `SearchOutcome`.

use crate::bidirectional;
use crate::budget::{Budget, BudgetMeter};
use crate::config::SearchConfig;
use crate::engine::{Engine, Termination};
use crate::frontier::{
    DepthLimitedFrontier, FifoFrontier, Frontier, LifoFrontier, Priority, PriorityFrontier,
};
use crate::graph::Graph;
use crate::heuristic::Heuristic;
use crate::strategy::{Profile, ReopenPolicy, Strategy};
use crate::{SearchError, SearchOutcome, SearchStats, SearchStatus};

/// Search `graph` from `start` to `goal` with `strategy`.
///
/// `heuristic` is required by Greedy and A* and ignored otherwise. Without a
/// `budget` the search is unbounded.
///
/// # Example
///
/// ```
/// use wayfinder_core::{AdjacencyGraph, Strategy, search};
///
/// let graph = AdjacencyGraph::from_edges([("a", "b", 1.0), ("b", "c", 1.0)]);
/// let outcome = search(&graph, &"a", &"c", Strategy::Bfs, None, None).expect("search");
///
/// assert_eq!(outcome.path, Some(vec!["a", "b", "c"]));
/// assert_eq!(outcome.cost, Some(2.0));
/// ```
pub fn search<G: Graph + ?Sized>(
    graph: &G,
    start: &G::State,
    goal: &G::State,
    strategy: Strategy,
    heuristic: Option<&dyn Heuristic<G::State>>,
    budget: Option<Budget>,
) -> Result<SearchOutcome<G::State>, SearchError> {
    let mut request = Search::new(graph)
        .strategy(strategy)
        .budget(budget.unwrap_or_default());
    if let Some(heuristic) = heuristic {
        request = request.heuristic(heuristic);
    }
    request.run(start, goal)
}

/// Reusable search request over one graph.
///
/// A `Search` borrows the graph immutably, so any number of them can run
/// concurrently on a shared graph.
pub struct Search<'a, G: Graph + ?Sized> {
    graph: &'a G,
    heuristic: Option<&'a dyn Heuristic<G::State>>,
    config: SearchConfig,
}

impl<'a, G: Graph + ?Sized> Search<'a, G> {
    /// A BFS request with no budget.
    #[must_use]
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            heuristic: None,
            config: SearchConfig::default(),
        }
    }

    #[must_use]
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    #[must_use]
    pub fn heuristic(mut self, heuristic: &'a dyn Heuristic<G::State>) -> Self {
        self.heuristic = Some(heuristic);
        self
    }

    #[must_use]
    pub fn budget(mut self, budget: Budget) -> Self {
        self.config.budget = budget;
        self
    }

    #[must_use]
    pub fn reopen(mut self, reopen: ReopenPolicy) -> Self {
        self.config.reopen = reopen;
        self
    }

    #[must_use]
    pub fn early_goal_test(mut self, enabled: bool) -> Self {
        self.config.early_goal_test = enabled;
        self
    }

    /// Replace every option at once, e.g. with a loaded `SearchConfig`.
    #[must_use]
    pub fn config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the search. Each call starts from a fresh arena, frontier and
    /// visited table.
    pub fn run(
        &self,
        start: &G::State,
        goal: &G::State,
    ) -> Result<SearchOutcome<G::State>, SearchError> {
        let config = self.config;
        config.validate()?;
        if !self.graph.contains(start) {
            return Err(SearchError::InvalidInput(format!(
                "start state {start:?} is not in the graph"
            )));
        }
        if !self.graph.contains(goal) {
            return Err(SearchError::InvalidInput(format!(
                "goal state {goal:?} is not in the graph"
            )));
        }

        let strategy = config.strategy;
        if strategy == Strategy::Bidirectional && self.graph.predecessors(goal).is_none() {
            return Err(SearchError::InvalidConfig(
                "bidirectional search requires a graph that enumerates predecessors".to_string(),
            ));
        }
        if strategy.is_cost_aware() {
            self.graph.validate_costs()?;
        }
        let heuristic = match (strategy.is_informed(), self.heuristic) {
            (true, None) => {
                return Err(SearchError::InvalidHeuristic(format!(
                    "{} requires a heuristic",
                    strategy.name()
                )));
            }
            (true, heuristic) => heuristic,
            (false, _) => None,
        };

        tracing::debug!("Starting {} search from {:?} to {:?}", strategy, start, goal);
        let profile = Profile::for_strategy(strategy, config.reopen, config.early_goal_test);
        let mut meter = BudgetMeter::start(config.budget);
        let graph = self.graph;

        let outcome = match strategy {
            Strategy::Bfs => run_engine(
                graph,
                start,
                goal,
                None,
                profile,
                FifoFrontier::new(),
                &mut meter,
            )?,
            Strategy::Dfs => run_engine(
                graph,
                start,
                goal,
                None,
                profile,
                LifoFrontier::new(),
                &mut meter,
            )?,
            Strategy::Dls { limit } => run_engine(
                graph,
                start,
                goal,
                None,
                profile,
                DepthLimitedFrontier::new(limit),
                &mut meter,
            )?,
            Strategy::Iddfs { max_limit } => {
                iterative_deepening(graph, start, goal, profile, max_limit, &mut meter)?
            }
            Strategy::Ucs => run_engine(
                graph,
                start,
                goal,
                None,
                profile,
                PriorityFrontier::new(Priority::Cost),
                &mut meter,
            )?,
            Strategy::Greedy => run_engine(
                graph,
                start,
                goal,
                heuristic,
                profile,
                PriorityFrontier::new(Priority::Heuristic),
                &mut meter,
            )?,
            Strategy::AStar => run_engine(
                graph,
                start,
                goal,
                heuristic,
                profile,
                PriorityFrontier::new(Priority::Estimate),
                &mut meter,
            )?,
            Strategy::Bidirectional => {
                bidirectional::search(graph, start, goal, profile, &mut meter)?
            }
        };

        if outcome.status == SearchStatus::ResourceExhausted {
            tracing::warn!(
                "{} search ran out of budget after {} expansions",
                strategy,
                outcome.stats.expanded
            );
        }
        tracing::debug!(
            "{} search {}: {} expanded, {} generated",
            strategy,
            outcome.status,
            outcome.stats.expanded,
            outcome.stats.generated
        );
        Ok(outcome)
    }
}

fn run_engine<G: Graph + ?Sized, F: Frontier>(
    graph: &G,
    start: &G::State,
    goal: &G::State,
    heuristic: Option<&dyn Heuristic<G::State>>,
    profile: Profile,
    frontier: F,
    meter: &mut BudgetMeter,
) -> Result<SearchOutcome<G::State>, SearchError> {
    let mut engine = Engine::new(graph, start.clone(), goal, heuristic, profile, frontier)?;
    let termination = engine.run(meter)?;
    Ok(engine.outcome(termination))
}

/// IDDFS: depth-limited rounds with limit 0, 1, ... `max_limit`.
///
/// Only `Cutoff` moves on to the next round. Statistics add up over all
/// rounds and the budget is shared by them.
fn iterative_deepening<G: Graph + ?Sized>(
    graph: &G,
    start: &G::State,
    goal: &G::State,
    profile: Profile,
    max_limit: usize,
    meter: &mut BudgetMeter,
) -> Result<SearchOutcome<G::State>, SearchError> {
    let mut stats = SearchStats::default();
    for limit in 0..=max_limit {
        tracing::info!("IDDFS round with depth limit {}", limit);
        let mut engine = Engine::new(
            graph,
            start.clone(),
            goal,
            None,
            profile,
            DepthLimitedFrontier::new(limit),
        )?;
        let termination = engine.run(meter)?;
        stats.absorb(&engine.stats());
        stats.rounds = stats.rounds.saturating_add(1);
        if termination != Termination::Cutoff {
            return Ok(engine.outcome(termination).with_stats(stats));
        }
    }
    Ok(SearchOutcome::unsolved(SearchStatus::Cutoff, stats))
}
