//! Objectives and the priority functions that order the frontier.

use roam_core::{Algorithm, RouteGraph, RouteRequest};

use crate::SearchConfig;

/// What a route is optimised for.
///
/// Every objective tracks the same per-state [`Tally`]: the number of nodes
/// entered after the start and the summed score of those nodes. The start
/// contributes to neither.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Objective {
    /// Visit as many locations as possible.
    MaxNodes,
    /// Collect as much score as possible.
    MaxScore,
    /// Blend both: `beta * nodes + (1 - beta) * score`.
    Hybrid {
        /// Weight of the node count, in `[0, 1]`.
        beta: f64,
    },
}

impl Objective {
    /// Select the objective for an [`Algorithm`].
    ///
    /// `beta` is only used by [`Algorithm::Hybrid`].
    #[must_use]
    pub const fn from_algorithm(algorithm: Algorithm, beta: f64) -> Self {
        match algorithm {
            Algorithm::MaxNodes => Self::MaxNodes,
            Algorithm::MaxScore => Self::MaxScore,
            Algorithm::Hybrid => Self::Hybrid { beta },
        }
    }

    /// Select the objective named by a request.
    #[must_use]
    pub const fn for_request(request: &RouteRequest) -> Self {
        Self::from_algorithm(request.algorithm, request.beta)
    }

    /// Objective value of a terminal state.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "blends count and score")]
    pub fn value(self, nodes: u32, score: f64) -> f64 {
        match self {
            Self::MaxNodes => f64::from(nodes),
            Self::MaxScore => score,
            Self::Hybrid { beta } => beta * f64::from(nodes) + (1.0 - beta) * score,
        }
    }

    /// Tally fields that break frontier ties, compared in order with the
    /// smaller value popping first.
    pub(crate) const fn tie_rank(self, tally: Tally) -> (u32, f64) {
        match self {
            Self::MaxNodes => (tally.nodes, 0.0),
            Self::MaxScore => (0, tally.score),
            Self::Hybrid { .. } => (tally.nodes, tally.score),
        }
    }
}

/// Accumulated objective inputs for one path.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Tally {
    pub(crate) nodes: u32,
    pub(crate) score: f64,
}

impl Tally {
    #[expect(clippy::float_arithmetic, reason = "scores are floating point")]
    pub(crate) fn enter(self, score: f64) -> Self {
        Self {
            nodes: self.nodes.saturating_add(1),
            score: self.score + score,
        }
    }
}

/// Per-search constants for computing priorities.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scoring {
    objective: Objective,
    lookahead_weight: f64,
    baseline: f64,
    max_score: f64,
}

#[expect(
    clippy::float_arithmetic,
    reason = "priorities are ratios of floating-point minutes"
)]
impl Scoring {
    pub(crate) fn new(objective: Objective, graph: &RouteGraph, config: &SearchConfig) -> Self {
        // Max-nodes keeps every interior dwell cost in its baseline; the
        // score-based objectives drop placeholder-sized ones.
        let (lookahead_weight, outlier_cutoff) = match objective {
            Objective::MaxNodes => (config.node_lookahead_weight, None),
            Objective::MaxScore => (
                config.score_lookahead_weight,
                Some(config.outlier_switch_minutes),
            ),
            Objective::Hybrid { .. } => (
                config.hybrid_lookahead_weight,
                Some(config.outlier_switch_minutes),
            ),
        };
        Self {
            objective,
            lookahead_weight,
            baseline: graph.mean_travel_time() + graph.mean_switch_weight(outlier_cutoff),
            max_score: graph.max_score(),
        }
    }

    pub(crate) const fn objective(&self) -> Objective {
        self.objective
    }

    /// Average cost of one more stop, used to size the lookahead.
    pub(crate) const fn baseline(&self) -> f64 {
        self.baseline
    }

    /// Priority of a child that has used `elapsed` minutes and still has
    /// `slack` minutes to spare after its cheapest way to the target.
    pub(crate) fn priority(&self, tally: Tally, elapsed: f64, slack: f64) -> f64 {
        let extra_stops = if self.baseline > 0.0 {
            slack / self.baseline
        } else {
            0.0
        };
        match self.objective {
            Objective::MaxNodes => {
                efficiency(f64::from(tally.nodes), elapsed, self.lookahead_weight * extra_stops)
            }
            Objective::MaxScore => {
                tally.score + self.lookahead_weight * (extra_stops * self.max_score)
            }
            Objective::Hybrid { beta } => {
                let blended = beta * f64::from(tally.nodes) + (1.0 - beta) * tally.score;
                let lookahead = beta * extra_stops + (1.0 - beta) * extra_stops * self.max_score;
                efficiency(blended, elapsed, self.lookahead_weight * lookahead)
            }
        }
    }
}

/// Value per minute plus lookahead; a zero-time state always goes first.
#[expect(clippy::float_arithmetic, reason = "ratio of value to minutes")]
fn efficiency(value: f64, elapsed: f64, lookahead: f64) -> f64 {
    if elapsed > 0.0 {
        value / elapsed + lookahead
    } else {
        f64::INFINITY
    }
}
