//! Backward shortest-time oracle.
//!
//! [`Potential::to_target`] runs Dijkstra from the target. Relaxing a settled
//! node `u` towards an unsettled `v` costs `dist(u) + travel(u, v) + switch(v)`,
//! so each value includes the dwell cost of every node entered on the way.
//! Settled nodes are never relaxed again. Nodes that cannot be reached keep
//! `f64::INFINITY`.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use roam_core::RouteGraph;

/// Lower bound on the time still needed to reach the target, per node.
///
/// # Examples
/// ```
/// use roam_core::RouteGraph;
/// use roam_solver::Potential;
///
/// # fn main() -> Result<(), roam_core::GraphError> {
/// let graph = RouteGraph::from_minutes(
///     vec![vec![0.0, 4.0, 9.0], vec![4.0, 0.0, 3.0], vec![9.0, 3.0, 0.0]],
///     vec![0.0; 3],
///     vec![1.0; 3],
///     0,
///     2,
///     20.0,
/// )?;
/// let potential = Potential::to_target(&graph);
///
/// assert_eq!(potential.get(2), 0.0);
/// assert_eq!(potential.get(0), 7.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Potential {
    distances: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Tentative {
    distance: f64,
    node: usize,
}

impl Eq for Tentative {}

impl Ord for Tentative {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl PartialOrd for Tentative {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Potential {
    /// Compute the potential of every node towards `graph.target()`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "shortest-time relaxation sums floating-point minutes"
    )]
    pub fn to_target(graph: &RouteGraph) -> Self {
        let len = graph.len();
        let mut distances = vec![f64::INFINITY; len];
        let mut settled = vec![false; len];
        let mut queue = BinaryHeap::new();

        if let Some(slot) = distances.get_mut(graph.target()) {
            *slot = 0.0;
            queue.push(Reverse(Tentative {
                distance: 0.0,
                node: graph.target(),
            }));
        }

        while let Some(Reverse(Tentative { distance, node: u })) = queue.pop() {
            match settled.get_mut(u) {
                Some(flag) if !*flag => *flag = true,
                _ => continue,
            }
            for v in 0..len {
                if settled.get(v).copied().unwrap_or(true) {
                    continue;
                }
                let candidate = distance + graph.travel_time(u, v) + graph.switch_weight(v);
                if let Some(best) = distances.get_mut(v)
                    && candidate < *best
                {
                    *best = candidate;
                    queue.push(Reverse(Tentative {
                        distance: candidate,
                        node: v,
                    }));
                }
            }
        }

        Self { distances }
    }

    /// Minimum time from `node` to the target; infinite when unreachable or
    /// out of range.
    #[must_use]
    pub fn get(&self, node: usize) -> f64 {
        self.distances.get(node).copied().unwrap_or(f64::INFINITY)
    }

    /// Whether the target can be reached from `node`.
    #[must_use]
    pub fn reaches_target(&self, node: usize) -> bool {
        self.get(node).is_finite()
    }

    /// All potentials indexed by node.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.distances
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn square() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 10.0, 15.0, 20.0],
            vec![10.0, 0.0, 35.0, 25.0],
            vec![15.0, 35.0, 0.0, 30.0],
            vec![20.0, 25.0, 30.0, 0.0],
        ]
    }

    fn graph(matrix: Vec<Vec<f64>>, switch: Vec<f64>, target: usize) -> RouteGraph {
        let len = matrix.len();
        RouteGraph::from_minutes(matrix, switch, vec![1.0; len], 0, target, 100.0)
            .expect("graph should build")
    }

    #[rstest]
    fn direct_edges_win_on_the_square(square: Vec<Vec<f64>>) {
        let potential = Potential::to_target(&graph(square, vec![0.0; 4], 3));
        assert_eq!(potential.as_slice(), &[20.0, 25.0, 30.0, 0.0]);
    }

    #[rstest]
    fn includes_switch_weight_of_each_entered_node() {
        let matrix = vec![
            vec![0.0, 5.0, 50.0],
            vec![5.0, 0.0, 5.0],
            vec![50.0, 5.0, 0.0],
        ];
        let potential = Potential::to_target(&graph(matrix, vec![1.0, 2.0, 100.0], 2));
        assert_eq!(potential.get(2), 0.0);
        assert_eq!(potential.get(1), 7.0);
        assert_eq!(potential.get(0), 13.0);
    }

    #[rstest]
    fn unreachable_nodes_stay_infinite() {
        let matrix = vec![
            vec![0.0, f64::INFINITY, 4.0],
            vec![f64::INFINITY, 0.0, f64::INFINITY],
            vec![4.0, f64::INFINITY, 0.0],
        ];
        let potential = Potential::to_target(&graph(matrix, vec![0.0; 3], 2));
        assert_eq!(potential.get(0), 4.0);
        assert!(!potential.reaches_target(1));
        assert!(potential.get(7).is_infinite());
    }

    #[rstest]
    fn uses_rows_of_settled_nodes() {
        // Relaxation reads travel(u, v) from the settled node outwards.
        let matrix = vec![vec![0.0, 1.0], vec![9.0, 0.0]];
        let potential = Potential::to_target(&graph(matrix, vec![0.0; 2], 1));
        assert_eq!(potential.get(0), 9.0);
    }
}
