//! Tunable constants for the route search.

use std::time::Duration;

/// Configuration for [`search`](crate::search) and [`RoutePlanner`](crate::RoutePlanner).
///
/// The lookahead weights scale the "remaining achievable value" term in each
/// objective's priority. Their defaults are the values the planner has always
/// shipped with; changing them changes which routes are found first and,
/// under caps, which routes are returned.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use roam_solver::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_max_expansions(10_000)
///     .with_time_budget(Duration::from_millis(250));
///
/// assert_eq!(config.node_lookahead_weight, 0.5);
/// assert_eq!(config.max_expansions, Some(10_000));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Lookahead weight for [`Objective::MaxNodes`](crate::Objective::MaxNodes).
    pub node_lookahead_weight: f64,
    /// Lookahead weight for [`Objective::MaxScore`](crate::Objective::MaxScore).
    pub score_lookahead_weight: f64,
    /// Lookahead weight for [`Objective::Hybrid`](crate::Objective::Hybrid).
    pub hybrid_lookahead_weight: f64,
    /// Dwell costs at or above this many minutes are left out of the
    /// score-based travel baseline.
    pub outlier_switch_minutes: f64,
    /// Stop after expanding this many states.
    pub max_expansions: Option<u64>,
    /// Stop once the search has run for this long.
    pub time_budget: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            node_lookahead_weight: 0.5,
            score_lookahead_weight: 0.1,
            hybrid_lookahead_weight: 0.5,
            outlier_switch_minutes: 300.0,
            max_expansions: None,
            time_budget: None,
        }
    }
}

impl SearchConfig {
    /// Override the max-nodes lookahead weight.
    #[must_use]
    pub const fn with_node_lookahead_weight(mut self, weight: f64) -> Self {
        self.node_lookahead_weight = weight;
        self
    }

    /// Override the max-score lookahead weight.
    #[must_use]
    pub const fn with_score_lookahead_weight(mut self, weight: f64) -> Self {
        self.score_lookahead_weight = weight;
        self
    }

    /// Override the hybrid lookahead weight.
    #[must_use]
    pub const fn with_hybrid_lookahead_weight(mut self, weight: f64) -> Self {
        self.hybrid_lookahead_weight = weight;
        self
    }

    /// Override the dwell-cost outlier cutoff in minutes.
    #[must_use]
    pub const fn with_outlier_switch_minutes(mut self, minutes: f64) -> Self {
        self.outlier_switch_minutes = minutes;
        self
    }

    /// Cap the number of expanded states.
    #[must_use]
    pub const fn with_max_expansions(mut self, max: u64) -> Self {
        self.max_expansions = Some(max);
        self
    }

    /// Cap the wall-clock time spent searching.
    #[must_use]
    pub const fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }
}
