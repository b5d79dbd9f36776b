//! Proptest strategies and a reference solver for search property tests.
//!
//! Generated instances use whole-minute travel times and whole-number scores
//! so sums are exact and objective values can be compared with `==`.

use proptest::prelude::*;
use roam_core::RouteGraph;
use roam_solver::Objective;

/// A generated planning instance in minutes.
#[derive(Debug, Clone)]
pub struct Instance {
    /// Travel-time matrix in minutes.
    pub matrix: Vec<Vec<f64>>,
    /// Per-node switch weights.
    pub switch_weights: Vec<f64>,
    /// Per-node scores.
    pub scores: Vec<f64>,
    /// Start node index.
    pub start: usize,
    /// Target node index.
    pub target: usize,
    /// Time budget in minutes.
    pub budget: f64,
}

impl Instance {
    /// Build the route graph for this instance.
    pub fn graph(&self) -> RouteGraph {
        self.graph_with_budget(self.budget)
    }

    /// Build the route graph with a different budget.
    pub fn graph_with_budget(&self, budget: f64) -> RouteGraph {
        RouteGraph::from_minutes(
            self.matrix.clone(),
            self.switch_weights.clone(),
            self.scores.clone(),
            self.start,
            self.target,
            budget,
        )
        .expect("generated instances are valid")
    }

    /// Replace every score with `1.0`.
    pub fn with_unit_scores(mut self) -> Self {
        self.scores = vec![1.0; self.scores.len()];
        self
    }
}

/// Shape of the generated instances.
#[derive(Debug, Clone, Copy)]
pub struct Shape {
    /// Mirror the upper triangle so `travel(u, v) == travel(v, u)`.
    pub symmetric: bool,
    /// Draw dwell costs instead of using zero.
    pub dwell: bool,
}

/// Instances where the potential is a true lower bound, so an uncapped
/// search visits every feasible path.
pub const EXACT: Shape = Shape {
    symmetric: true,
    dwell: false,
};

/// Instances with asymmetric travel and dwell costs.
pub const GENERAL: Shape = Shape {
    symmetric: false,
    dwell: true,
};

/// Strategy for instances with `min_len..=max_len` distinct locations.
pub fn instance_strategy(
    min_len: usize,
    max_len: usize,
    shape: Shape,
) -> impl Strategy<Value = Instance> {
    (min_len..=max_len).prop_flat_map(move |len| {
        (
            proptest::collection::vec(1_u32..=30, len * len),
            proptest::collection::vec(0_u32..=10, len),
            proptest::collection::vec(0_u32..=5, len),
            0..len,
            0..len,
            1_u32..=120,
        )
            .prop_filter("start and target differ", |(_, _, _, start, target, _)| {
                start != target
            })
            .prop_map(move |(cells, dwell, scores, start, target, budget)| Instance {
                matrix: build_matrix(len, &cells, shape.symmetric),
                switch_weights: dwell
                    .into_iter()
                    .map(|minutes| if shape.dwell { f64::from(minutes) } else { 0.0 })
                    .collect(),
                scores: scores.into_iter().map(f64::from).collect(),
                start,
                target,
                budget: f64::from(budget),
            })
    })
}

fn build_matrix(len: usize, cells: &[u32], symmetric: bool) -> Vec<Vec<f64>> {
    (0..len)
        .map(|row| {
            (0..len)
                .map(|col| {
                    if row == col {
                        return 0.0;
                    }
                    let (from, to) = if symmetric && col < row {
                        (col, row)
                    } else {
                        (row, col)
                    };
                    cells
                        .get(from * len + to)
                        .copied()
                        .map_or(f64::INFINITY, f64::from)
                })
                .collect()
        })
        .collect()
}

/// Travel plus dwell minutes along `path`, summed the way the search does.
pub fn path_minutes(graph: &RouteGraph, path: &[usize]) -> f64 {
    path.windows(2).fold(0.0, |elapsed, pair| match pair {
        [from, to] => elapsed + graph.travel_time(*from, *to) + graph.switch_weight(*to),
        _ => elapsed,
    })
}

/// Objective value of `path`: the start contributes nothing.
pub fn path_value(graph: &RouteGraph, objective: Objective, path: &[usize]) -> f64 {
    let entered = path.get(1..).unwrap_or_default();
    let nodes = u32::try_from(entered.len()).expect("small paths");
    let score = entered.iter().map(|&node| graph.score(node)).sum();
    objective.value(nodes, score)
}

/// Exhaustively enumerate every simple start-to-target path within budget
/// and return the best objective value.
pub fn brute_force_best(graph: &RouteGraph, objective: Objective) -> Option<f64> {
    let mut best = None;
    let mut path = vec![graph.start()];
    explore(graph, objective, &mut path, 0.0, &mut best);
    best
}

fn explore(
    graph: &RouteGraph,
    objective: Objective,
    path: &mut Vec<usize>,
    elapsed: f64,
    best: &mut Option<f64>,
) {
    let Some(&node) = path.last() else {
        return;
    };
    if node == graph.target() {
        let value = path_value(graph, objective, path);
        if best.is_none_or(|current| value > current) {
            *best = Some(value);
        }
        return;
    }
    for next in 0..graph.len() {
        if path.contains(&next) {
            continue;
        }
        let arrival = elapsed + graph.travel_time(node, next) + graph.switch_weight(next);
        if arrival > graph.budget() {
            continue;
        }
        path.push(next);
        explore(graph, objective, path, arrival, best);
        path.pop();
    }
}
