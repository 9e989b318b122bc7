//! Property-based tests for the Edmonds-Karp flow network.
//!
//! Random capacity matrices are solved and checked against an exhaustive
//! minimum-cut oracle, which enumerates every source-side node set. The flow
//! left behind by each solve is also checked for capacity and conservation.

use proptest::prelude::*;
use proptest::test_runner::{TestCaseError, TestCaseResult};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

use crate::matrix::SquareMatrix;
use crate::test_utils::suite_proptest_config;

use super::FlowNetwork;

/// Keeps the `2^(n-2)` cut enumeration cheap.
const MAX_NODES: usize = 8;

#[derive(Clone, Debug)]
struct FlowFixture {
    capacity: SquareMatrix,
    source: usize,
    sink: usize,
}

fn generate_fixture(rng: &mut SmallRng) -> FlowFixture {
    let node_count = rng.gen_range(2..=MAX_NODES);
    let density = rng.gen_range(0.2..=0.8);
    let rows = (0..node_count)
        .map(|from| {
            (0..node_count)
                .map(|to| {
                    if from != to && rng.gen_bool(density) {
                        rng.gen_range(1..=20)
                    } else {
                        0
                    }
                })
                .collect()
        })
        .collect();
    let capacity = SquareMatrix::try_from_rows(rows).expect("generated rows are square");
    let source = rng.gen_range(0..node_count);
    let sink = (source + rng.gen_range(1..node_count)) % node_count;
    FlowFixture {
        capacity,
        source,
        sink,
    }
}

fn flow_fixture_strategy() -> impl Strategy<Value = FlowFixture> {
    any::<u64>().prop_map(|seed| generate_fixture(&mut SmallRng::seed_from_u64(seed)))
}

/// Smallest capacity over every cut separating `source` from `sink`.
fn brute_force_min_cut(capacity: &SquareMatrix, source: usize, sink: usize) -> u64 {
    let node_count = capacity.order();
    let free: Vec<usize> = (0..node_count)
        .filter(|&node| node != source && node != sink)
        .collect();

    (0_u32..(1 << free.len()))
        .map(|mask| {
            let mut source_side = vec![false; node_count];
            source_side[source] = true;
            for (bit, &node) in free.iter().enumerate() {
                source_side[node] = mask & (1 << bit) != 0;
            }
            (0..node_count)
                .filter(|&from| source_side[from])
                .flat_map(|from| (0..node_count).map(move |to| (from, to)))
                .filter(|&(_, to)| !source_side[to])
                .map(|(from, to)| u64::from(capacity.get(from, to)))
                .sum::<u64>()
        })
        .min()
        .unwrap_or(0)
}

fn run_flow_properties(fixture: &FlowFixture) -> TestCaseResult {
    let mut network = FlowNetwork::new(fixture.capacity.clone());
    let value = network
        .max_flow(fixture.source, fixture.sink)
        .map_err(|e| TestCaseError::fail(format!("max_flow failed: {e}")))?;

    prop_assert_eq!(
        value,
        brute_force_min_cut(&fixture.capacity, fixture.source, fixture.sink)
    );

    let node_count = network.node_count();
    for from in 0..node_count {
        for to in 0..node_count {
            prop_assert!(network.residual(from, to) >= 0);
            prop_assert_eq!(network.flow(from, to), -network.flow(to, from));
        }
    }
    for node in (0..node_count).filter(|&n| n != fixture.source && n != fixture.sink) {
        let net: i64 = (0..node_count).map(|to| network.flow(node, to)).sum();
        prop_assert_eq!(net, 0, "node {} leaks flow", node);
    }
    let leaving_source: i64 = (0..node_count)
        .map(|to| network.flow(fixture.source, to))
        .sum();
    prop_assert_eq!(u64::try_from(leaving_source).ok(), Some(value));

    let cut = network
        .min_cut()
        .map_err(|e| TestCaseError::fail(format!("min_cut failed: {e}")))?;
    prop_assert_eq!(cut.source(), fixture.source);
    prop_assert_eq!(cut.capacity(), value);
    prop_assert!(!cut.source_side().contains(&fixture.sink));

    prop_assert_eq!(network.max_flow(fixture.source, fixture.sink).ok(), Some(value));
    Ok(())
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn max_flow_equals_min_cut(fixture in flow_fixture_strategy()) {
        run_flow_properties(&fixture)?;
    }
}

#[rstest]
#[case(1)]
#[case(42)]
#[case(2024)]
#[case(65_535)]
fn flow_properties_hold_for_seeded_fixtures(#[case] seed: u64) {
    let fixture = generate_fixture(&mut SmallRng::seed_from_u64(seed));
    run_flow_properties(&fixture).expect("flow properties must hold");
}

#[test]
fn oracle_finds_textbook_cut() {
    let capacity = SquareMatrix::try_from_rows(vec![
        vec![0, 16, 13, 0, 0, 0],
        vec![0, 0, 10, 12, 0, 0],
        vec![0, 4, 0, 0, 14, 0],
        vec![0, 0, 9, 0, 0, 20],
        vec![0, 0, 0, 7, 0, 4],
        vec![0, 0, 0, 0, 0, 0],
    ])
    .expect("square rows");
    assert_eq!(brute_force_min_cut(&capacity, 0, 5), 23);
}
