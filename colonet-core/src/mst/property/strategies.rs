//! Graph generators for MST property-based tests.
//!
//! Each generator builds a list of [`WeightedEdge`] values from a seeded
//! [`SmallRng`], so a failing proptest case can be replayed from its seed.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::mst::WeightedEdge;

/// Maximum node count for generated graphs.
const MAX_NODES: usize = 24;

/// Weight distribution strategy for generated graphs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum WeightDistribution {
    /// Weights drawn from a wide range, so ties are rare.
    Spread,
    /// Weights drawn from `1..=3`, stressing tie-breaking.
    ManyIdentical,
    /// Roughly one and a half edges per node.
    Sparse,
    /// Two or more groups with no edges between them.
    Disconnected,
    /// Distance-matrix style input where some entries are zero ("no edge").
    WithZeroEntries,
}

/// Fixture for MST property tests.
#[derive(Clone, Debug)]
pub(super) struct MstFixture {
    /// Number of nodes in the graph.
    pub node_count: usize,
    /// Generated candidate edges.
    pub edges: Vec<WeightedEdge>,
    /// Weight distribution used during generation.
    pub distribution: WeightDistribution,
}

pub(super) fn distribution_strategy() -> impl Strategy<Value = WeightDistribution> {
    prop_oneof![
        1 => Just(WeightDistribution::Spread),
        2 => Just(WeightDistribution::ManyIdentical),
        1 => Just(WeightDistribution::Sparse),
        1 => Just(WeightDistribution::Disconnected),
        1 => Just(WeightDistribution::WithZeroEntries),
    ]
}

pub(super) fn mst_fixture_strategy() -> impl Strategy<Value = MstFixture> {
    (distribution_strategy(), any::<u64>()).prop_map(|(distribution, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_fixture(distribution, &mut rng)
    })
}

/// Generates a fixture for a specific weight distribution.
pub(super) fn generate_fixture(distribution: WeightDistribution, rng: &mut SmallRng) -> MstFixture {
    let node_count = rng.gen_range(1..=MAX_NODES);
    let edges = match distribution {
        WeightDistribution::Spread => pairs_with_probability(node_count, 0.5, rng, |r| {
            r.gen_range(1..=10_000)
        }),
        WeightDistribution::ManyIdentical => {
            pairs_with_probability(node_count, 0.6, rng, |r| r.gen_range(1..=3))
        }
        WeightDistribution::Sparse => sparse_edges(node_count, rng),
        WeightDistribution::Disconnected => disconnected_edges(node_count, rng),
        WeightDistribution::WithZeroEntries => {
            pairs_with_probability(node_count, 1.0, rng, |r| r.gen_range(0..=5))
        }
    };
    MstFixture {
        node_count,
        edges,
        distribution,
    }
}

fn pairs_with_probability(
    node_count: usize,
    probability: f64,
    rng: &mut SmallRng,
    mut weight: impl FnMut(&mut SmallRng) -> u32,
) -> Vec<WeightedEdge> {
    let mut edges = Vec::new();
    for source in 0..node_count {
        for target in (source + 1)..node_count {
            if rng.gen_bool(probability) {
                let w = weight(rng);
                // Randomise orientation so canonicalisation is exercised.
                if rng.gen_bool(0.5) {
                    edges.push(WeightedEdge::new(source, target, w));
                } else {
                    edges.push(WeightedEdge::new(target, source, w));
                }
            }
        }
    }
    edges
}

fn sparse_edges(node_count: usize, rng: &mut SmallRng) -> Vec<WeightedEdge> {
    let edge_count = node_count + node_count / 2;
    (0..edge_count)
        .map(|_| {
            WeightedEdge::new(
                rng.gen_range(0..node_count),
                rng.gen_range(0..node_count),
                rng.gen_range(1..=100),
            )
        })
        .collect()
}

fn disconnected_edges(node_count: usize, rng: &mut SmallRng) -> Vec<WeightedEdge> {
    let groups = rng.gen_range(2..=4);
    let mut edges = Vec::new();
    for source in 0..node_count {
        for target in (source + 1)..node_count {
            if source % groups == target % groups && rng.gen_bool(0.7) {
                edges.push(WeightedEdge::new(source, target, rng.gen_range(1..=50)));
            }
        }
    }
    edges
}
