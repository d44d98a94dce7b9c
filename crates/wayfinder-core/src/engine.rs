//! # Search Engine
//!
//! The generic expand/test/push loop shared by every strategy.
//!
//! ```text
//! INIT -> EXPANDING (loop) -> { GOAL_FOUND, EXHAUSTED, CUTOFF, RESOURCE_EXHAUSTED }
//! ```
//!
//! One call to `Engine::step` pops one frontier entry and either reports the
//! goal, discards a stale duplicate, or expands the node. `Engine::run` loops
//! `step` to termination; the bidirectional coordinator interleaves the
//! steps of two engines instead.

use crate::arena::{Arena, NodeIndex, SearchNode};
use crate::budget::BudgetMeter;
use crate::frontier::{Frontier, FrontierEntry};
use crate::graph::Graph;
use crate::heuristic::{self, Heuristic};
use crate::path;
use crate::strategy::Profile;
use crate::visited::{Visit, VisitedTable};
use crate::{Cost, SearchError, SearchOutcome, SearchStats, SearchStatus};

/// Result of one engine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// The goal was popped (or generated, under the early goal test).
    Goal(NodeIndex),
    /// The node was expanded and its children pushed.
    Expanded(NodeIndex),
    /// A stale or already-closed entry was discarded.
    Skipped,
    /// The frontier is empty.
    Drained,
    /// The budget ran out before the popped node could be expanded.
    OutOfBudget,
}

/// How `Engine::run` ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Termination {
    Found(NodeIndex),
    Cutoff,
    Exhausted,
    ResourceExhausted,
}

/// One search over one graph with one frontier.
///
/// Owns the arena, the frontier and the visited table; all three live
/// exactly as long as the engine.
pub(crate) struct Engine<'a, G: Graph + ?Sized, F> {
    graph: &'a G,
    goal: &'a G::State,
    heuristic: Option<&'a dyn Heuristic<G::State>>,
    profile: Profile,
    frontier: F,
    arena: Arena<G::State>,
    visited: VisitedTable<G::State>,
    stats: SearchStats,
}

impl<'a, G: Graph + ?Sized, F: Frontier> Engine<'a, G, F> {
    /// INIT: push the start node into `frontier`.
    pub(crate) fn new(
        graph: &'a G,
        start: G::State,
        goal: &'a G::State,
        heuristic: Option<&'a dyn Heuristic<G::State>>,
        profile: Profile,
        mut frontier: F,
    ) -> Result<Self, SearchError> {
        let h = match heuristic {
            Some(heuristic) => heuristic::evaluate(heuristic, &start)?,
            None => 0.0,
        };
        let mut visited = VisitedTable::new(profile.revisit);
        visited.admit(&start, 0.0, 0);

        let mut arena = Arena::new();
        let root = arena.push(SearchNode::root(start, h));
        frontier.push(FrontierEntry {
            node: root,
            g: 0.0,
            h,
            depth: 0,
        });

        Ok(Self {
            graph,
            goal,
            heuristic,
            profile,
            frontier,
            arena,
            visited,
            stats: SearchStats {
                generated: 1,
                peak_frontier: 1,
                ..SearchStats::default()
            },
        })
    }

    /// EXPANDING: pop one entry and act on it.
    pub(crate) fn step(&mut self, meter: &mut BudgetMeter) -> Result<Step, SearchError> {
        let Some(entry) = self.frontier.pop() else {
            return Ok(Step::Drained);
        };
        let state = &self.arena[entry.node].state;
        if state == self.goal {
            return Ok(Step::Goal(entry.node));
        }
        if !self.visited.should_expand(state, entry.g, entry.depth) {
            return Ok(Step::Skipped);
        }
        if meter.exceeded() {
            return Ok(Step::OutOfBudget);
        }

        let state = state.clone();
        meter.record_expansion();
        self.stats.expanded = self.stats.expanded.saturating_add(1);
        tracing::trace!(
            "Expanding {:?} (g = {}, depth = {})",
            state,
            entry.g,
            entry.depth
        );
        self.visited.close(
            state.clone(),
            Visit {
                node: entry.node,
                g: entry.g,
                depth: entry.depth,
            },
        );

        let mut children = Vec::new();
        for (next, cost) in self.graph.neighbors(&state) {
            if self.profile.rejects_negative_costs && (cost.is_nan() || cost < 0.0) {
                return Err(SearchError::InvalidGraph {
                    from: format!("{state:?}"),
                    to: format!("{next:?}"),
                    cost,
                });
            }
            let g = entry.g + cost;
            let depth = entry.depth.saturating_add(1);
            if !self.visited.admit(&next, g, depth) || !self.frontier.admit_depth(depth) {
                continue;
            }
            let h = match self.heuristic {
                Some(heuristic) => heuristic::evaluate(heuristic, &next)?,
                None => 0.0,
            };
            let reached_goal = next == *self.goal;
            let child = self.arena.push(SearchNode {
                state: next,
                parent: Some(entry.node),
                g,
                h,
                depth,
            });
            self.stats.generated = self.stats.generated.saturating_add(1);
            if reached_goal && self.profile.early_goal_test {
                return Ok(Step::Goal(child));
            }
            children.push(FrontierEntry {
                node: child,
                g,
                h,
                depth,
            });
        }

        self.frontier.push_all(children);
        self.stats.peak_frontier = self.stats.peak_frontier.max(self.frontier.len());
        Ok(Step::Expanded(entry.node))
    }

    /// Step until the search terminates.
    pub(crate) fn run(&mut self, meter: &mut BudgetMeter) -> Result<Termination, SearchError> {
        loop {
            match self.step(meter)? {
                Step::Goal(index) => return Ok(Termination::Found(index)),
                Step::Expanded(_) | Step::Skipped => {}
                Step::Drained if self.frontier.cut_off() => return Ok(Termination::Cutoff),
                Step::Drained => return Ok(Termination::Exhausted),
                Step::OutOfBudget => return Ok(Termination::ResourceExhausted),
            }
        }
    }

    /// Build the caller-facing outcome for a termination.
    pub(crate) fn outcome(&self, termination: Termination) -> SearchOutcome<G::State> {
        match termination {
            Termination::Found(index) => SearchOutcome::found(
                self.path_to(index),
                self.cost_of(index),
                self.stats,
            ),
            Termination::Cutoff => SearchOutcome::unsolved(SearchStatus::Cutoff, self.stats),
            Termination::Exhausted => SearchOutcome::unsolved(SearchStatus::Exhausted, self.stats),
            Termination::ResourceExhausted => {
                SearchOutcome::unsolved(SearchStatus::ResourceExhausted, self.stats)
            }
        }
    }

    /// Root-first path to an arena node.
    pub(crate) fn path_to(&self, index: NodeIndex) -> Vec<G::State> {
        path::reconstruct(&self.arena, index)
    }

    /// Accumulated cost g of an arena node.
    pub(crate) fn cost_of(&self, index: NodeIndex) -> Cost {
        self.arena[index].g
    }

    /// State reached by an arena node.
    pub(crate) fn state_of(&self, index: NodeIndex) -> &G::State {
        &self.arena[index].state
    }

    /// Expansion record of a closed state.
    pub(crate) fn visit_of(&self, state: &G::State) -> Option<&Visit> {
        self.visited.get(state)
    }

    pub(crate) fn stats(&self) -> SearchStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::Budget;
    use crate::frontier::{
        DepthLimitedFrontier, FifoFrontier, LifoFrontier, Priority, PriorityFrontier,
    };
    use crate::graph::AdjacencyGraph;
    use crate::strategy::{ReopenPolicy, Strategy};

    fn profile(strategy: Strategy) -> Profile {
        Profile::for_strategy(strategy, ReopenPolicy::Closed, false)
    }

    fn diamond() -> AdjacencyGraph<char> {
        AdjacencyGraph::from_edges([
            ('s', 'a', 1.0),
            ('s', 'b', 4.0),
            ('a', 'b', 1.0),
            ('a', 'g', 6.0),
            ('b', 'g', 1.0),
        ])
    }

    #[test]
    fn bfs_finds_fewest_edges() {
        let graph = diamond();
        let mut meter = BudgetMeter::start(Budget::unbounded());
        let mut engine =
            Engine::new(&graph, 's', &'g', None, profile(Strategy::Bfs), FifoFrontier::new())
                .expect("init");

        let termination = engine.run(&mut meter).expect("run");
        let outcome = engine.outcome(termination);

        assert_eq!(outcome.path, Some(vec!['s', 'a', 'g']));
        assert_eq!(outcome.cost, Some(7.0));
    }

    #[test]
    fn ucs_finds_cheapest_path_with_lazy_deletion() {
        let graph = diamond();
        let mut meter = BudgetMeter::start(Budget::unbounded());
        let mut engine = Engine::new(
            &graph,
            's',
            &'g',
            None,
            profile(Strategy::Ucs),
            PriorityFrontier::new(Priority::Cost),
        )
        .expect("init");

        let termination = engine.run(&mut meter).expect("run");
        let outcome = engine.outcome(termination);

        assert_eq!(outcome.path, Some(vec!['s', 'a', 'b', 'g']));
        assert_eq!(outcome.cost, Some(3.0));
    }

    #[test]
    fn step_reports_each_phase() {
        let graph = AdjacencyGraph::from_edges([(1, 2, 1.0)]);
        let mut meter = BudgetMeter::start(Budget::unbounded());
        let mut engine =
            Engine::new(&graph, 1, &2, None, profile(Strategy::Dfs), LifoFrontier::new())
                .expect("init");

        let first = engine.step(&mut meter).expect("step");
        assert!(matches!(first, Step::Expanded(root) if *engine.state_of(root) == 1));
        assert!(engine.visit_of(&1).is_some());

        let second = engine.step(&mut meter).expect("step");
        assert!(matches!(second, Step::Goal(goal) if engine.path_to(goal) == vec![1, 2]));
        assert_eq!(engine.step(&mut meter), Ok(Step::Drained));
        assert_eq!(engine.stats().expanded, 1);
        assert_eq!(engine.stats().generated, 2);
    }

    #[test]
    fn depth_limit_yields_cutoff() {
        let graph = AdjacencyGraph::from_edges([(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0)]);
        let mut meter = BudgetMeter::start(Budget::unbounded());
        let mut engine = Engine::new(
            &graph,
            0,
            &3,
            None,
            profile(Strategy::Dls { limit: 2 }),
            DepthLimitedFrontier::new(2),
        )
        .expect("init");

        assert_eq!(engine.run(&mut meter), Ok(Termination::Cutoff));
        // State 3 lies past the limit and never gets a node
        assert_eq!(engine.stats().generated, 3);
        assert_eq!(engine.arena.len(), 3);
    }

    #[test]
    fn unreachable_goal_is_exhausted() {
        let graph = AdjacencyGraph::from_edges([(0, 1, 1.0), (1, 0, 1.0), (5, 6, 1.0)]);
        let mut meter = BudgetMeter::start(Budget::unbounded());
        let mut engine =
            Engine::new(&graph, 0, &6, None, profile(Strategy::Bfs), FifoFrontier::new())
                .expect("init");

        assert_eq!(engine.run(&mut meter), Ok(Termination::Exhausted));
        assert_eq!(engine.stats().expanded, 2);
    }

    #[test]
    fn negative_cost_rejected_for_cost_aware_strategy() {
        let graph = AdjacencyGraph::from_edges([('a', 'b', -1.0)]);
        let mut meter = BudgetMeter::start(Budget::unbounded());
        let mut engine = Engine::new(
            &graph,
            'a',
            &'b',
            None,
            profile(Strategy::Ucs),
            PriorityFrontier::new(Priority::Cost),
        )
        .expect("init");

        assert!(matches!(
            engine.run(&mut meter),
            Err(SearchError::InvalidGraph { cost, .. }) if cost == -1.0
        ));
    }

    #[test]
    fn early_goal_test_stops_at_generation() {
        let graph = AdjacencyGraph::from_edges([(0, 1, 1.0), (0, 2, 1.0), (1, 3, 1.0)]);
        let mut meter = BudgetMeter::start(Budget::unbounded());
        let early = Profile::for_strategy(Strategy::Bfs, ReopenPolicy::Closed, true);
        let mut engine =
            Engine::new(&graph, 0, &2, None, early, FifoFrontier::new()).expect("init");

        let termination = engine.run(&mut meter).expect("run");
        assert!(matches!(
            termination,
            Termination::Found(goal) if engine.path_to(goal) == vec![0, 2]
        ));
        assert_eq!(engine.stats().expanded, 1);
    }

    #[test]
    fn budget_stops_expansion() {
        let graph = AdjacencyGraph::from_edges([(0, 1, 1.0), (1, 2, 1.0)]);
        let mut meter = BudgetMeter::start(Budget::expansions(1));
        let mut engine =
            Engine::new(&graph, 0, &2, None, profile(Strategy::Bfs), FifoFrontier::new())
                .expect("init");

        assert_eq!(engine.run(&mut meter), Ok(Termination::ResourceExhausted));
        assert_eq!(
            engine.outcome(Termination::ResourceExhausted).status,
            SearchStatus::ResourceExhausted
        );
    }
}
