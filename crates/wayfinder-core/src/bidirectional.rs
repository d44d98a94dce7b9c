//! # Bidirectional Search
//!
//! Two breadth-first engines, one from the start over the graph and one from
//! the goal over the `Reversed` view, alternating one expansion each. The
//! graph must enumerate predecessors; `search` checks this beforehand.
//!
//! After every expansion the expanded state is looked up in the other side's
//! visited table. On a hit the two half-paths are stitched at the meeting
//! state. Both engines live on the calling thread and share one budget
//! meter, so no synchronization is involved.
//!
//! The search stops at the first meeting, so the stitched path is not
//! guaranteed to be the shortest one.

use crate::arena::NodeIndex;
use crate::budget::BudgetMeter;
use crate::engine::{Engine, Step};
use crate::frontier::{FifoFrontier, Frontier};
use crate::graph::{Graph, Reversed};
use crate::path;
use crate::strategy::Profile;
use crate::{Cost, SearchError, SearchOutcome, SearchStatus, State};

/// Run a bidirectional search from `start` to `goal`.
pub(crate) fn search<G: Graph + ?Sized>(
    graph: &G,
    start: &G::State,
    goal: &G::State,
    profile: Profile,
    meter: &mut BudgetMeter,
) -> Result<SearchOutcome<G::State>, SearchError> {
    let reversed = Reversed::new(graph);
    let mut forward = Engine::new(graph, start.clone(), goal, None, profile, FifoFrontier::new())?;
    let mut backward =
        Engine::new(&reversed, goal.clone(), start, None, profile, FifoFrontier::new())?;

    let mut forward_turn = true;
    loop {
        let step = if forward_turn {
            forward.step(meter)?
        } else {
            backward.step(meter)?
        };

        let result = match step {
            // Stale entries do not count as a turn
            Step::Skipped => continue,
            Step::Drained => Some((SearchStatus::Exhausted, None)),
            Step::OutOfBudget => Some((SearchStatus::ResourceExhausted, None)),
            Step::Goal(index) if forward_turn => Some((
                SearchStatus::Found,
                Some((forward.path_to(index), forward.cost_of(index))),
            )),
            Step::Goal(index) => {
                let mut path = backward.path_to(index);
                path.reverse();
                Some((SearchStatus::Found, Some((path, backward.cost_of(index)))))
            }
            Step::Expanded(index) if forward_turn => {
                meet(&forward, index, &backward).map(|joined| (SearchStatus::Found, Some(joined)))
            }
            Step::Expanded(index) => meet(&backward, index, &forward).map(|(mut path, cost)| {
                path.reverse();
                (SearchStatus::Found, Some((path, cost)))
            }),
        };

        if let Some((status, found)) = result {
            let mut stats = forward.stats();
            stats.absorb(&backward.stats());
            return Ok(match found {
                Some((path, cost)) => {
                    tracing::debug!("Bidirectional search joined {} states", path.len());
                    SearchOutcome::found(path, cost, stats)
                }
                None => SearchOutcome::unsolved(status, stats),
            });
        }
        forward_turn = !forward_turn;
    }
}

/// If the state expanded at `index` by `this` is closed in `other`, join the
/// two half-paths. The result runs from `this`'s root to `other`'s root.
fn meet<S, A, B, FA, FB>(
    this: &Engine<'_, A, FA>,
    index: NodeIndex,
    other: &Engine<'_, B, FB>,
) -> Option<(Vec<S>, Cost)>
where
    S: State,
    A: Graph<State = S> + ?Sized,
    B: Graph<State = S> + ?Sized,
    FA: Frontier,
    FB: Frontier,
{
    let visit = other.visit_of(this.state_of(index))?;
    tracing::debug!("Frontiers met at {:?}", this.state_of(index));
    let joined = path::stitch(this.path_to(index), other.path_to(visit.node));
    Some((joined, this.cost_of(index) + visit.g))
}
