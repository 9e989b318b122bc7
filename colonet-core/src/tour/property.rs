//! Property-based tests for the exact tour solver.
//!
//! Generated instances are solved with both strategies and compared with
//! each other and with a Held-Karp dynamic-programming oracle. Symmetric
//! instances are also relabelled to check the optimum does not depend on
//! which colony is numbered 0.

use proptest::prelude::*;
use proptest::test_runner::{TestCaseError, TestCaseResult};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

use crate::matrix::SquareMatrix;
use crate::test_utils::{max_tour_nodes, suite_proptest_config};

use super::{TourError, TourSolver, TourStrategy};

#[derive(Clone, Debug)]
struct TourFixture {
    distances: SquareMatrix,
    symmetric: bool,
}

fn generate_fixture(rng: &mut SmallRng, max_nodes: usize) -> TourFixture {
    let node_count = rng.gen_range(1..=max_nodes);
    let symmetric = rng.gen_bool(0.6);
    let missing = if rng.gen_bool(0.3) { 0.25 } else { 0.0 };
    let mut distances = SquareMatrix::zeros(node_count).expect("at least one node");
    for from in 0..node_count {
        for to in 0..node_count {
            if from == to || (symmetric && to < from) {
                continue;
            }
            let distance = if rng.gen_bool(missing) {
                0
            } else {
                rng.gen_range(1..=60)
            };
            distances.set(from, to, distance);
            if symmetric {
                distances.set(to, from, distance);
            }
        }
    }
    TourFixture {
        distances,
        symmetric,
    }
}

fn tour_fixture_strategy() -> impl Strategy<Value = TourFixture> {
    let max_nodes = max_tour_nodes();
    any::<u64>().prop_map(move |seed| {
        generate_fixture(&mut SmallRng::seed_from_u64(seed), max_nodes)
    })
}

/// Held-Karp optimum over subsets, treating zero entries as missing links.
fn held_karp(distances: &SquareMatrix) -> Option<u64> {
    let node_count = distances.order();
    if node_count == 1 {
        return Some(0);
    }
    let link = |from: usize, to: usize| {
        let distance = distances.get(from, to);
        (distance > 0).then_some(u64::from(distance))
    };

    // best[mask][last]: cheapest path from 0 through `mask` (over nodes
    // 1..N, bit i - 1 for node i) ending at `last`.
    let subsets = 1_usize << (node_count - 1);
    let mut best = vec![vec![None::<u64>; node_count]; subsets];
    for node in 1..node_count {
        best[1 << (node - 1)][node] = link(0, node);
    }
    for mask in 1..subsets {
        for last in 1..node_count {
            let Some(cost) = best[mask][last] else {
                continue;
            };
            for next in 1..node_count {
                let bit = 1 << (next - 1);
                if mask & bit != 0 {
                    continue;
                }
                if let Some(step) = link(last, next) {
                    let slot = &mut best[mask | bit][next];
                    let candidate = cost + step;
                    if slot.is_none_or(|current| candidate < current) {
                        *slot = Some(candidate);
                    }
                }
            }
        }
    }

    (1..node_count)
        .filter_map(|last| Some(best[subsets - 1][last]? + link(last, 0)?))
        .min()
}

fn path_cost(distances: &SquareMatrix, path: &[usize]) -> Option<u64> {
    path.windows(2)
        .map(|leg| {
            let distance = distances.get(leg[0], leg[1]);
            (distance > 0 || leg[0] == leg[1]).then_some(u64::from(distance))
        })
        .sum()
}

/// Swaps the labels of node 0 and `other` in a copy of `distances`.
fn relabel(distances: &SquareMatrix, other: usize) -> SquareMatrix {
    let swap = |node: usize| match node {
        0 => other,
        n if n == other => 0,
        n => n,
    };
    let order = distances.order();
    let mut relabelled = SquareMatrix::zeros(order).expect("non-empty order");
    for from in 0..order {
        for to in 0..order {
            relabelled.set(swap(from), swap(to), distances.get(from, to));
        }
    }
    relabelled
}

/// Cost and path of an optimal tour, or `None` when no tour exists.
type Outcome = Option<(u64, Vec<usize>)>;

fn solve(distances: &SquareMatrix, strategy: TourStrategy) -> Result<Outcome, TestCaseError> {
    match TourSolver::new(distances.clone()).with_strategy(strategy).solve() {
        Ok(tour) => Ok(Some((tour.cost(), tour.into_path()))),
        Err(TourError::NoHamiltonianCycle { .. }) => Ok(None),
        Err(other) => Err(TestCaseError::fail(format!("unexpected error: {other}"))),
    }
}

fn run_tour_properties(fixture: &TourFixture) -> TestCaseResult {
    let distances = &fixture.distances;
    let node_count = distances.order();
    let backtracking = solve(distances, TourStrategy::Backtracking)?;
    let permutation = solve(distances, TourStrategy::Permutation)?;

    prop_assert_eq!(&backtracking, &permutation, "strategies disagree");
    prop_assert_eq!(
        backtracking.as_ref().map(|(cost, _)| *cost),
        held_karp(distances),
        "optimum differs from Held-Karp"
    );

    if let Some((cost, path)) = &backtracking {
        prop_assert_eq!(path.len(), node_count + 1);
        prop_assert_eq!(path.first(), Some(&0));
        prop_assert_eq!(path.last(), Some(&0));
        let mut visited = path[..node_count].to_vec();
        visited.sort_unstable();
        prop_assert_eq!(visited, (0..node_count).collect::<Vec<_>>());
        prop_assert_eq!(path_cost(distances, path), Some(*cost));
    }

    if fixture.symmetric && node_count > 1 {
        let relabelled = relabel(distances, node_count - 1);
        let moved = solve(&relabelled, TourStrategy::Backtracking)?;
        prop_assert_eq!(
            moved.map(|(cost, _)| cost),
            backtracking.map(|(cost, _)| cost),
            "relabelling changed the optimum"
        );
    }
    Ok(())
}

proptest! {
    #![proptest_config(suite_proptest_config(96))]

    #[test]
    fn strategies_agree_with_held_karp(fixture in tour_fixture_strategy()) {
        run_tour_properties(&fixture)?;
    }
}

#[rstest]
#[case(3)]
#[case(17)]
#[case(4096)]
fn tour_properties_hold_for_seeded_fixtures(#[case] seed: u64) {
    let fixture = generate_fixture(&mut SmallRng::seed_from_u64(seed), 6);
    run_tour_properties(&fixture).expect("tour properties must hold");
}

#[test]
fn oracle_agrees_on_four_colonies() {
    let distances = SquareMatrix::try_from_rows(vec![
        vec![0, 16, 45, 32],
        vec![16, 0, 18, 21],
        vec![45, 18, 0, 7],
        vec![32, 21, 7, 0],
    ])
    .expect("square rows");
    assert_eq!(held_karp(&distances), Some(73));
    assert_eq!(path_cost(&distances, &[0, 1, 2, 3, 0]), Some(73));
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
fn relabelled_four_colonies_keep_their_optimum(#[case] other: usize) {
    let distances = SquareMatrix::try_from_rows(vec![
        vec![0, 16, 45, 32],
        vec![16, 0, 18, 21],
        vec![45, 18, 0, 7],
        vec![32, 21, 7, 0],
    ])
    .expect("square rows");
    let relabelled = relabel(&distances, other);
    assert_eq!(relabelled.get(other, other), 0);
    for strategy in [TourStrategy::Backtracking, TourStrategy::Permutation] {
        let tour = TourSolver::new(relabelled.clone())
            .with_strategy(strategy)
            .solve()
            .expect("complete graph");
        assert_eq!(tour.cost(), 73);
    }
}
