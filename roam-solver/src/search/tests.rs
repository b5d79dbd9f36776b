//! Tests for the best-first search.

use super::*;
use rstest::{fixture, rstest};

fn square_matrix() -> Vec<Vec<f64>> {
    vec![
        vec![0.0, 10.0, 15.0, 20.0],
        vec![10.0, 0.0, 35.0, 25.0],
        vec![15.0, 35.0, 0.0, 30.0],
        vec![20.0, 25.0, 30.0, 0.0],
    ]
}

fn square_with(scores: Vec<f64>, budget: f64) -> RouteGraph {
    RouteGraph::from_minutes(square_matrix(), vec![0.0; 4], scores, 0, 3, budget)
        .expect("graph should build")
}

#[fixture]
fn square() -> RouteGraph {
    square_with(vec![1.0; 4], 50.0)
}

#[fixture]
fn config() -> SearchConfig {
    SearchConfig::default()
}

fn run(graph: &RouteGraph, objective: Objective, config: &SearchConfig) -> SearchOutcome {
    let potential = Potential::to_target(graph);
    search(graph, &potential, objective, config)
}

#[rstest]
fn max_nodes_takes_the_cheaper_detour(square: RouteGraph, config: SearchConfig) {
    let outcome = run(&square, Objective::MaxNodes, &config);
    assert_eq!(outcome.path, vec![0, 1, 3]);
    assert_eq!(outcome.objective, Some(2.0));
    assert_eq!(outcome.elapsed, 35.0);

    let stats = outcome.diagnostics;
    assert_eq!(stats.expansions, 3);
    assert_eq!(stats.enqueued, 5);
    assert_eq!(stats.candidates, 3);
    assert_eq!(stats.pruned, 0);
    assert!(stats.exhausted);
    assert!(!stats.cancelled);
}

#[rstest]
fn tight_budget_returns_direct_path(config: SearchConfig) {
    let outcome = run(&square_with(vec![1.0; 4], 20.0), Objective::MaxNodes, &config);
    assert_eq!(outcome.path, vec![0, 3]);
    assert_eq!(outcome.elapsed, 20.0);
}

#[rstest]
fn infeasible_budget_returns_empty_route(config: SearchConfig) {
    let outcome = run(&square_with(vec![1.0; 4], 19.0), Objective::MaxNodes, &config);
    assert!(outcome.is_empty());
    assert_eq!(outcome.objective, None);
    assert_eq!(outcome.diagnostics.pruned, 1);
    assert_eq!(outcome.diagnostics.expansions, 0);
    assert!(outcome.into_route().is_empty());
}

#[rstest]
fn unreachable_target_returns_empty_route(config: SearchConfig) {
    let graph = RouteGraph::from_minutes(
        vec![
            vec![0.0, 5.0, f64::INFINITY],
            vec![5.0, 0.0, f64::INFINITY],
            vec![f64::INFINITY, f64::INFINITY, 0.0],
        ],
        vec![0.0; 3],
        vec![1.0; 3],
        0,
        2,
        1_000.0,
    )
    .expect("graph should build");
    assert!(run(&graph, Objective::MaxNodes, &config).is_empty());
}

#[rstest]
fn start_equal_to_target_is_a_single_stop(config: SearchConfig) {
    let graph = RouteGraph::from_minutes(square_matrix(), vec![0.0; 4], vec![1.0; 4], 2, 2, 50.0)
        .expect("graph should build");
    let outcome = run(&graph, Objective::MaxNodes, &config);
    assert_eq!(outcome.path, vec![2]);
    assert_eq!(outcome.elapsed, 0.0);
    assert_eq!(outcome.objective, Some(0.0));
}

#[rstest]
fn dwell_costs_count_towards_elapsed_time(config: SearchConfig) {
    let graph = RouteGraph::from_minutes(
        vec![
            vec![0.0, 5.0, 10.0],
            vec![5.0, 0.0, 5.0],
            vec![10.0, 5.0, 0.0],
        ],
        vec![0.0, 3.0, 0.0],
        vec![1.0; 3],
        0,
        2,
        16.0,
    )
    .expect("graph should build");
    let outcome = run(&graph, Objective::MaxNodes, &config);
    assert_eq!(outcome.path, vec![0, 1, 2]);
    assert_eq!(outcome.elapsed, 13.0);
}

#[rstest]
fn objectives_disagree_when_scores_do(config: SearchConfig) {
    let graph = square_with(vec![0.0, 1.0, 5.0, 0.0], 50.0);

    let by_nodes = run(&graph, Objective::MaxNodes, &config);
    assert_eq!(by_nodes.path, vec![0, 1, 3]);

    let by_score = run(&graph, Objective::MaxScore, &config);
    assert_eq!(by_score.path, vec![0, 2, 3]);
    assert_eq!(by_score.objective, Some(5.0));
    assert_eq!(by_score.elapsed, 45.0);
}

#[rstest]
#[case(1.0, 2.0)]
#[case(0.0, 5.0)]
#[case(0.5, 3.5)]
fn hybrid_blends_count_and_score(
    config: SearchConfig,
    #[case] beta: f64,
    #[case] expected: f64,
) {
    let graph = square_with(vec![0.0, 1.0, 5.0, 0.0], 50.0);
    let outcome = run(&graph, Objective::Hybrid { beta }, &config);
    assert_eq!(outcome.objective, Some(expected));
}

#[rstest]
fn unit_scores_make_max_score_count_nodes(square: RouteGraph, config: SearchConfig) {
    let by_nodes = run(&square, Objective::MaxNodes, &config);
    let by_score = run(&square, Objective::MaxScore, &config);
    assert_eq!(by_nodes.objective, by_score.objective);
}

#[rstest]
fn expansion_cap_returns_best_so_far(square: RouteGraph) {
    let capped = SearchConfig::default().with_max_expansions(1);
    let outcome = run(&square, Objective::MaxNodes, &capped);
    assert_eq!(outcome.path, vec![0, 3]);
    assert_eq!(outcome.diagnostics.expansions, 1);
    assert!(!outcome.diagnostics.exhausted);
    assert!(!outcome.diagnostics.cancelled);
}

#[rstest]
fn zero_time_budget_stops_before_expanding(square: RouteGraph) {
    let capped = SearchConfig::default().with_time_budget(std::time::Duration::ZERO);
    let outcome = run(&square, Objective::MaxNodes, &capped);
    assert!(outcome.is_empty());
    assert_eq!(outcome.diagnostics.expansions, 0);
    assert!(!outcome.diagnostics.exhausted);
}

#[rstest]
fn cancellation_abandons_the_search(square: RouteGraph, config: SearchConfig) {
    let potential = Potential::to_target(&square);
    let cancel = AtomicBool::new(true);
    let outcome =
        search_with_cancellation(&square, &potential, Objective::MaxNodes, &config, &cancel);
    assert!(outcome.is_empty());
    assert!(outcome.diagnostics.cancelled);
    assert!(!outcome.diagnostics.exhausted);
}

#[rstest]
fn unset_cancellation_flag_changes_nothing(square: RouteGraph, config: SearchConfig) {
    let potential = Potential::to_target(&square);
    let cancel = AtomicBool::new(false);
    let outcome =
        search_with_cancellation(&square, &potential, Objective::MaxNodes, &config, &cancel);
    assert_eq!(outcome.path, vec![0, 1, 3]);
}

#[rstest]
fn arena_rebuilds_paths_from_parents() {
    let mut arena = Arena::default();
    let root = arena.push(4, None);
    let middle = arena.push(1, Some(root));
    let leaf = arena.push(7, Some(middle));
    let sibling = arena.push(2, Some(root));
    assert_eq!(arena.path(leaf), vec![4, 1, 7]);
    assert_eq!(arena.path(sibling), vec![4, 2]);

    let mut visited = vec![false; 8];
    arena.mark(leaf, &mut visited, true);
    assert_eq!(
        visited.iter().filter(|flag| **flag).count(),
        3,
        "only the leaf's ancestors are marked"
    );
    arena.mark(leaf, &mut visited, false);
    assert!(visited.iter().all(|flag| !flag));
}
