//! Dense Prim oracle for MST property verification.
//!
//! Uses a different algorithm from the implementation under test so that a
//! shared bug cannot hide itself: Prim grows one component at a time over an
//! adjacency matrix holding the cheapest usable weight for every pair.

use crate::mst::WeightedEdge;

/// Result of the Prim oracle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct OracleForest {
    /// Total weight of the minimum spanning forest.
    pub total_weight: u64,
    /// Number of connected components.
    pub component_count: usize,
}

/// Computes the minimum spanning forest weight with Prim's algorithm,
/// restarting from the lowest unvisited node whenever a component is
/// exhausted.
pub(super) fn prim_forest(node_count: usize, edges: &[WeightedEdge]) -> OracleForest {
    let adjacency = cheapest_adjacency(node_count, edges);
    let mut in_tree = vec![false; node_count];
    let mut total_weight = 0;
    let mut component_count = 0;

    while let Some(root) = in_tree.iter().position(|visited| !visited) {
        component_count += 1;
        let mut best: Vec<Option<u32>> = vec![None; node_count];
        best[root] = Some(0);

        loop {
            let next = (0..node_count)
                .filter(|&node| !in_tree[node])
                .filter_map(|node| best[node].map(|weight| (weight, node)))
                .min();
            let Some((weight, node)) = next else {
                break;
            };
            in_tree[node] = true;
            total_weight += u64::from(weight);
            for (other, candidate) in adjacency[node].iter().enumerate() {
                if let Some(candidate) = *candidate
                    && !in_tree[other]
                    && best[other].is_none_or(|current| candidate < current)
                {
                    best[other] = Some(candidate);
                }
            }
        }
    }

    OracleForest {
        total_weight,
        component_count,
    }
}

fn cheapest_adjacency(node_count: usize, edges: &[WeightedEdge]) -> Vec<Vec<Option<u32>>> {
    let mut adjacency = vec![vec![None; node_count]; node_count];
    for edge in edges {
        if edge.source == edge.target || edge.weight == 0 {
            continue;
        }
        for (from, to) in [(edge.source, edge.target), (edge.target, edge.source)] {
            let slot: &mut Option<u32> = &mut adjacency[from][to];
            if slot.is_none_or(|current| edge.weight < current) {
                *slot = Some(edge.weight);
            }
        }
    }
    adjacency
}
