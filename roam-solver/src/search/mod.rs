//! Best-first search over simple paths from start to target.
//!
//! Every state is a path that starts at the request's start node and never
//! repeats a node. States live in an arena as a parent slot plus the node
//! they added, so expanding a state never copies its history; the full path
//! is rebuilt only when a state at the target beats the incumbent.
//!
//! A popped state at the target is a candidate and is never expanded. A
//! popped state that can no longer reach the target in time is dropped.
//! Children are only enqueued when their elapsed time plus their potential
//! fits the budget.

mod frontier;
mod objective;

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use roam_core::{Diagnostics, Route, RouteGraph};

use crate::{Potential, SearchConfig};

use frontier::{Frontier, State};
pub use objective::Objective;
use objective::{Scoring, Tally};

/// Result of one search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Node indices from start to target; empty when nothing fits the budget.
    pub path: Vec<usize>,
    /// Objective value of `path`, absent when it is empty.
    pub objective: Option<f64>,
    /// Travel plus dwell minutes consumed by `path`.
    pub elapsed: f64,
    /// Search statistics.
    pub diagnostics: Diagnostics,
}

impl SearchOutcome {
    /// Whether no route fits the budget.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Convert into a [`Route`], discarding statistics.
    #[must_use]
    pub fn into_route(self) -> Route {
        Route::new(self.path, self.elapsed)
    }
}

/// Run the search to completion or until a cap in `config` is hit.
///
/// # Examples
/// ```
/// use roam_core::RouteGraph;
/// use roam_solver::{Objective, Potential, SearchConfig, search};
///
/// # fn main() -> Result<(), roam_core::GraphError> {
/// let graph = RouteGraph::from_minutes(
///     vec![
///         vec![0.0, 10.0, 15.0, 20.0],
///         vec![10.0, 0.0, 35.0, 25.0],
///         vec![15.0, 35.0, 0.0, 30.0],
///         vec![20.0, 25.0, 30.0, 0.0],
///     ],
///     vec![0.0; 4],
///     vec![1.0; 4],
///     0,
///     3,
///     50.0,
/// )?;
/// let potential = Potential::to_target(&graph);
/// let outcome = search(&graph, &potential, Objective::MaxNodes, &SearchConfig::default());
///
/// assert_eq!(outcome.path, vec![0, 1, 3]);
/// assert_eq!(outcome.elapsed, 35.0);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn search(
    graph: &RouteGraph,
    potential: &Potential,
    objective: Objective,
    config: &SearchConfig,
) -> SearchOutcome {
    Search::new(graph, potential, objective, config).run(None)
}

/// Like [`search`], but abandons the search as soon as `cancel` is set.
///
/// An abandoned search returns an empty path with
/// [`Diagnostics::cancelled`] set, whatever it had found so far.
#[must_use]
pub fn search_with_cancellation(
    graph: &RouteGraph,
    potential: &Potential,
    objective: Objective,
    config: &SearchConfig,
    cancel: &AtomicBool,
) -> SearchOutcome {
    Search::new(graph, potential, objective, config).run(Some(cancel))
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    node: usize,
    parent: Option<usize>,
}

/// Parent-linked path storage.
#[derive(Debug, Default)]
struct Arena {
    entries: Vec<Entry>,
}

impl Arena {
    fn push(&mut self, node: usize, parent: Option<usize>) -> usize {
        self.entries.push(Entry { node, parent });
        self.entries.len() - 1
    }

    /// Nodes from `slot` back to the root.
    fn ancestors(&self, slot: usize) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(self.entries.get(slot), |entry| {
            entry.parent.and_then(|parent| self.entries.get(parent))
        })
        .map(|entry| entry.node)
    }

    fn path(&self, slot: usize) -> Vec<usize> {
        let mut path: Vec<usize> = self.ancestors(slot).collect();
        path.reverse();
        path
    }

    fn mark(&self, slot: usize, visited: &mut [bool], value: bool) {
        for node in self.ancestors(slot) {
            if let Some(flag) = visited.get_mut(node) {
                *flag = value;
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Incumbent {
    slot: usize,
    value: f64,
    elapsed: f64,
}

enum Stop {
    Exhausted,
    Capped,
    Cancelled,
}

struct Search<'a> {
    graph: &'a RouteGraph,
    potential: &'a Potential,
    config: &'a SearchConfig,
    scoring: Scoring,
    arena: Arena,
    frontier: Frontier,
    visited: Vec<bool>,
    diagnostics: Diagnostics,
    best: Option<Incumbent>,
}

#[expect(
    clippy::float_arithmetic,
    reason = "elapsed time and budget checks use floating-point minutes"
)]
impl<'a> Search<'a> {
    fn new(
        graph: &'a RouteGraph,
        potential: &'a Potential,
        objective: Objective,
        config: &'a SearchConfig,
    ) -> Self {
        Self {
            graph,
            potential,
            config,
            scoring: Scoring::new(objective, graph, config),
            arena: Arena::default(),
            frontier: Frontier::new(objective),
            visited: vec![false; graph.len()],
            diagnostics: Diagnostics::default(),
            best: None,
        }
    }

    fn run(mut self, cancel: Option<&AtomicBool>) -> SearchOutcome {
        let started_at = Instant::now();
        let root = self.arena.push(self.graph.start(), None);
        self.frontier.push(
            0.0,
            State {
                slot: root,
                node: self.graph.start(),
                elapsed: 0.0,
                tally: Tally::default(),
            },
        );

        let stop = self.drain(cancel, started_at);
        self.diagnostics.solve_time = started_at.elapsed();
        self.diagnostics.exhausted = matches!(stop, Stop::Exhausted);
        self.diagnostics.cancelled = matches!(stop, Stop::Cancelled);

        let outcome = match (stop, self.best) {
            (Stop::Cancelled, _) | (_, None) => SearchOutcome {
                path: Vec::new(),
                objective: None,
                elapsed: 0.0,
                diagnostics: self.diagnostics,
            },
            (_, Some(best)) => SearchOutcome {
                path: self.arena.path(best.slot),
                objective: Some(best.value),
                elapsed: best.elapsed,
                diagnostics: self.diagnostics,
            },
        };
        log::debug!(
            "{:?} search over {} nodes (baseline {:.2} min): {} expansions, {} enqueued, {} pruned, {} candidates, route {:?} in {:?}",
            self.scoring.objective(),
            self.graph.len(),
            self.scoring.baseline(),
            outcome.diagnostics.expansions,
            outcome.diagnostics.enqueued,
            outcome.diagnostics.pruned,
            outcome.diagnostics.candidates,
            outcome.path,
            outcome.diagnostics.solve_time,
        );
        outcome
    }

    fn drain(&mut self, cancel: Option<&AtomicBool>, started_at: Instant) -> Stop {
        let target = self.graph.target();
        let budget = self.graph.budget();
        while let Some(state) = self.frontier.pop() {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                log::debug!("search cancelled after {} expansions", self.diagnostics.expansions);
                return Stop::Cancelled;
            }
            if state.node == target && state.elapsed <= budget {
                self.offer(state);
                continue;
            }
            if state.elapsed + self.potential.get(state.node) > budget {
                self.diagnostics.pruned += 1;
                continue;
            }
            if self.cap_reached(started_at) {
                log::warn!(
                    "search stopped after {} expansions with {} states still queued",
                    self.diagnostics.expansions,
                    self.frontier.len() + 1,
                );
                return Stop::Capped;
            }
            self.expand(state);
        }
        Stop::Exhausted
    }

    fn cap_reached(&self, started_at: Instant) -> bool {
        self.config
            .max_expansions
            .is_some_and(|max| self.diagnostics.expansions >= max)
            || self
                .config
                .time_budget
                .is_some_and(|limit| started_at.elapsed() >= limit)
    }

    /// Keep `state` if it strictly beats the incumbent; first found wins ties.
    fn offer(&mut self, state: State) {
        self.diagnostics.candidates += 1;
        let value = self
            .scoring
            .objective()
            .value(state.tally.nodes, state.tally.score);
        if self.best.is_none_or(|best| value > best.value) {
            self.best = Some(Incumbent {
                slot: state.slot,
                value,
                elapsed: state.elapsed,
            });
        }
    }

    fn expand(&mut self, state: State) {
        self.diagnostics.expansions += 1;
        let budget = self.graph.budget();
        self.arena.mark(state.slot, &mut self.visited, true);
        for next in 0..self.graph.len() {
            if self.visited.get(next).copied().unwrap_or(true) {
                continue;
            }
            let elapsed = state.elapsed
                + self.graph.travel_time(state.node, next)
                + self.graph.switch_weight(next);
            let remaining = self.potential.get(next);
            if elapsed + remaining > budget {
                continue;
            }
            let tally = state.tally.enter(self.graph.score(next));
            let priority = self
                .scoring
                .priority(tally, elapsed, budget - elapsed - remaining);
            let slot = self.arena.push(next, Some(state.slot));
            self.frontier.push(
                priority,
                State {
                    slot,
                    node: next,
                    elapsed,
                    tally,
                },
            );
            self.diagnostics.enqueued += 1;
        }
        self.arena.mark(state.slot, &mut self.visited, false);
    }
}

#[cfg(test)]
mod tests;
