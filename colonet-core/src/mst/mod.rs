//! Minimum spanning tree construction for the fibre wiring plan.
//!
//! Kruskal's algorithm over a [`DisjointSet`]: edges are sorted by weight and
//! accepted whenever they join two different components. A disconnected
//! input produces a minimum spanning forest rather than an error.

mod union_find;

use std::cmp::Ordering;

use tracing::{debug, instrument};

use crate::error::define_error_codes;
use crate::matrix::{SquareMatrix, Weight};

pub use self::union_find::DisjointSet;

/// Errors returned while computing a minimum spanning tree/forest.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum MstError {
    /// The caller requested an MST for a graph without nodes.
    #[error("cannot compute an MST for an empty graph")]
    EmptyGraph,
    /// An edge referenced a node id that is not present in the graph.
    #[error("edge references node {node}, but node_count is {node_count}")]
    InvalidNodeId {
        /// The invalid node id referenced by an edge.
        node: usize,
        /// The number of nodes in the graph.
        node_count: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`MstError`] variants.
    enum MstErrorCode for MstError {
        /// The caller requested an MST for a graph without nodes.
        EmptyGraph => EmptyGraph => "MST_EMPTY_GRAPH",
        /// An edge referenced a node id that is not present in the graph.
        InvalidNodeId => InvalidNodeId { .. } => "MST_INVALID_NODE_ID",
    }
}

/// An undirected candidate edge supplied by the caller.
///
/// A weight of zero means "no edge" and is skipped, as are self-loops.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct WeightedEdge {
    /// One endpoint.
    pub source: usize,
    /// The other endpoint.
    pub target: usize,
    /// Cable length (or cost) between the endpoints.
    pub weight: Weight,
}

impl WeightedEdge {
    /// Creates an edge between `source` and `target`.
    #[must_use]
    pub const fn new(source: usize, target: usize, weight: Weight) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }
}

impl From<(usize, usize, Weight)> for WeightedEdge {
    fn from((source, target, weight): (usize, usize, Weight)) -> Self {
        Self::new(source, target, weight)
    }
}

/// A single accepted edge in canonical undirected form (`source < target`).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct MstEdge {
    source: usize,
    target: usize,
    weight: Weight,
    sequence: usize,
}

impl MstEdge {
    /// Returns the smaller endpoint id.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> usize { self.source }

    /// Returns the larger endpoint id.
    #[must_use]
    #[rustfmt::skip]
    pub fn target(&self) -> usize { self.target }

    /// Returns the edge weight.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight(&self) -> Weight { self.weight }

    /// Returns the position of the edge in the caller's input, used to break
    /// weight ties.
    #[must_use]
    #[rustfmt::skip]
    pub fn sequence(&self) -> usize { self.sequence }

    /// Returns the endpoints as a `(source, target)` pair.
    #[must_use]
    pub fn endpoints(&self) -> (usize, usize) {
        (self.source, self.target)
    }
}

impl Ord for MstEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for MstEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The output of a minimum spanning forest computation.
///
/// When the input graph is connected, the forest is a minimum spanning tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpanningForest {
    edges: Vec<MstEdge>,
    component_count: usize,
}

impl SpanningForest {
    /// Returns the accepted edges in the order Kruskal accepted them.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[MstEdge] { &self.edges }

    /// Returns the number of connected components in the resulting forest.
    #[must_use]
    #[rustfmt::skip]
    pub fn component_count(&self) -> usize { self.component_count }

    /// Returns `true` when the forest spans a single connected component.
    #[must_use]
    pub fn is_tree(&self) -> bool {
        self.component_count == 1
    }

    /// Returns the summed weight of all accepted edges.
    #[must_use]
    pub fn total_weight(&self) -> u64 {
        self.edges.iter().map(|edge| u64::from(edge.weight)).sum()
    }

    /// Returns the accepted edges as `(source, target)` pairs.
    #[must_use]
    pub fn endpoints(&self) -> Vec<(usize, usize)> {
        self.edges.iter().map(MstEdge::endpoints).collect()
    }
}

/// Assembles candidate edges from a distance matrix.
///
/// Every pair `i < j` with a positive entry `distances[i][j]` becomes an edge,
/// in row-major order. Only the upper triangle is read.
///
/// # Examples
/// ```
/// use colonet_core::{SquareMatrix, WeightedEdge, edges_from_distances};
///
/// let distances = SquareMatrix::try_from_rows(vec![
///     vec![0, 4, 0],
///     vec![4, 0, 2],
///     vec![0, 2, 0],
/// ])?;
/// assert_eq!(
///     edges_from_distances(&distances),
///     vec![WeightedEdge::new(0, 1, 4), WeightedEdge::new(1, 2, 2)],
/// );
/// # Ok::<(), colonet_core::MatrixError>(())
/// ```
#[must_use]
pub fn edges_from_distances(distances: &SquareMatrix) -> Vec<WeightedEdge> {
    let order = distances.order();
    (0..order)
        .flat_map(|source| ((source + 1)..order).map(move |target| (source, target)))
        .filter_map(|(source, target)| {
            let weight = distances.get(source, target);
            (weight > 0).then_some(WeightedEdge::new(source, target, weight))
        })
        .collect()
}

/// Computes a minimum spanning forest using Kruskal's algorithm.
///
/// Edges are interpreted as undirected and canonicalised to
/// `(min(u, v), max(u, v))`. Equal weights keep the caller's input order.
///
/// # Errors
///
/// Returns an error when:
/// - `node_count == 0`
/// - an edge references a node id `>= node_count`
///
/// # Examples
/// ```
/// use colonet_core::{WeightedEdge, kruskal};
///
/// let edges = [(0, 1, 4), (0, 2, 3), (1, 2, 1), (1, 3, 2), (2, 3, 4)]
///     .map(WeightedEdge::from);
/// let forest = kruskal(4, &edges)?;
/// assert_eq!(forest.endpoints(), vec![(1, 2), (1, 3), (0, 2)]);
/// assert_eq!(forest.total_weight(), 6);
/// # Ok::<(), colonet_core::MstError>(())
/// ```
#[instrument(
    name = "mst.kruskal",
    level = "debug",
    err,
    skip(edges),
    fields(edges = edges.len()),
)]
pub fn kruskal(node_count: usize, edges: &[WeightedEdge]) -> Result<SpanningForest, MstError> {
    if node_count == 0 {
        return Err(MstError::EmptyGraph);
    }

    let edge_list = prepare_edge_list(edges, node_count)?;
    let mut sets = DisjointSet::new(node_count);
    let target_len = node_count.saturating_sub(1);
    let mut forest_edges = Vec::with_capacity(target_len);

    for edge in edge_list {
        if forest_edges.len() == target_len {
            break;
        }
        if sets.union(edge.source, edge.target) {
            forest_edges.push(edge);
        }
    }

    let forest = SpanningForest {
        edges: forest_edges,
        component_count: sets.components(),
    };
    if !forest.is_tree() {
        debug!(
            components = forest.component_count,
            "graph is disconnected, returning a spanning forest"
        );
    }
    Ok(forest)
}

fn validate_and_canonicalize_edge(
    edge: &WeightedEdge,
    sequence: usize,
    node_count: usize,
) -> Result<Option<MstEdge>, MstError> {
    for node in [edge.source, edge.target] {
        if node >= node_count {
            return Err(MstError::InvalidNodeId { node, node_count });
        }
    }

    if edge.source == edge.target || edge.weight == 0 {
        return Ok(None);
    }

    let (source, target) = if edge.source < edge.target {
        (edge.source, edge.target)
    } else {
        (edge.target, edge.source)
    };

    Ok(Some(MstEdge {
        source,
        target,
        weight: edge.weight,
        sequence,
    }))
}

fn prepare_edge_list(edges: &[WeightedEdge], node_count: usize) -> Result<Vec<MstEdge>, MstError> {
    let mut edge_list = Vec::with_capacity(edges.len());
    for (sequence, edge) in edges.iter().enumerate() {
        if let Some(mst_edge) = validate_and_canonicalize_edge(edge, sequence, node_count)? {
            edge_list.push(mst_edge);
        }
    }
    // Sequence numbers are unique, so the unstable sort is deterministic.
    edge_list.sort_unstable();
    Ok(edge_list)
}

#[cfg(test)]
mod property;
