//! Maximum flow between two colonies (Edmonds-Karp).
//!
//! [`FlowNetwork`] owns a capacity matrix and a private flow matrix. Each
//! solve repeatedly finds a shortest (fewest-edge) augmenting path with a
//! breadth-first search over the residual graph and pushes the path's
//! bottleneck along it, cancelling flow on reverse edges where needed.

use std::collections::VecDeque;

use tracing::{debug, instrument, trace};

use crate::error::{MatrixError, define_error_codes};
use crate::matrix::{SquareMatrix, Weight};

/// Errors returned by [`FlowNetwork`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum FlowError {
    /// The capacity matrix was empty or not square.
    #[error("invalid capacity matrix: {source}")]
    Matrix {
        /// Underlying shape error.
        #[from]
        source: MatrixError,
    },
    /// A source or sink index was outside the network.
    #[error("node {node} is out of range for a network of {node_count} nodes")]
    NodeOutOfRange {
        /// The offending node index.
        node: usize,
        /// The number of nodes in the network.
        node_count: usize,
    },
    /// A minimum cut was requested before any successful solve.
    #[error("no maximum flow has been computed on this network")]
    NotSolved,
}

define_error_codes! {
    /// Stable codes describing [`FlowError`] variants.
    enum FlowErrorCode for FlowError {
        /// The capacity matrix was empty or not square.
        InvalidMatrix => Matrix { .. } => "FLOW_INVALID_MATRIX",
        /// A source or sink index was outside the network.
        NodeOutOfRange => NodeOutOfRange { .. } => "FLOW_NODE_OUT_OF_RANGE",
        /// A minimum cut was requested before any successful solve.
        NotSolved => NotSolved => "FLOW_NOT_SOLVED",
    }
}

/// A source-side node set whose outgoing edges form a minimum cut.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MinCut {
    source: usize,
    source_side: Vec<usize>,
    capacity: u64,
}

impl MinCut {
    /// Returns the source of the solve this cut was taken from.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> usize { self.source }

    /// Returns the nodes reachable from the source in the final residual
    /// graph, in ascending order.
    #[must_use]
    #[rustfmt::skip]
    pub fn source_side(&self) -> &[usize] { &self.source_side }

    /// Returns the summed capacity of the edges leaving the source side.
    #[must_use]
    #[rustfmt::skip]
    pub fn capacity(&self) -> u64 { self.capacity }
}

/// A directed capacity network together with the flow of its last solve.
///
/// The network is single-use per solve: [`FlowNetwork::max_flow`] takes
/// `&mut self`, so concurrent solves need separate instances.
///
/// # Examples
/// ```
/// use colonet_core::FlowNetwork;
///
/// let mut network = FlowNetwork::from_rows(vec![
///     vec![0, 3, 2],
///     vec![0, 0, 2],
///     vec![0, 0, 0],
/// ])?;
/// assert_eq!(network.max_flow(0, 2)?, 4);
/// # Ok::<(), colonet_core::FlowError>(())
/// ```
#[derive(Clone, Debug)]
pub struct FlowNetwork {
    capacity: SquareMatrix,
    flow: Vec<i64>,
    solved_source: Option<usize>,
}

impl FlowNetwork {
    /// Wraps a validated capacity matrix with an all-zero flow.
    #[must_use]
    pub fn new(capacity: SquareMatrix) -> Self {
        let cells = capacity.order() * capacity.order();
        Self {
            capacity,
            flow: vec![0; cells],
            solved_source: None,
        }
    }

    /// Builds a network from raw capacity rows.
    ///
    /// # Errors
    /// Returns [`FlowError::Matrix`] when the rows are empty or not square.
    pub fn from_rows(rows: Vec<Vec<Weight>>) -> Result<Self, FlowError> {
        Ok(Self::new(SquareMatrix::try_from_rows(rows)?))
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.capacity.order()
    }

    /// Returns the capacity matrix.
    #[must_use]
    #[rustfmt::skip]
    pub fn capacity(&self) -> &SquareMatrix { &self.capacity }

    /// Returns the net flow on `from -> to` after the last solve.
    ///
    /// Reverse edges carry the negated flow of their forward edge.
    ///
    /// # Panics
    /// Panics when either index is out of range.
    #[must_use]
    pub fn flow(&self, from: usize, to: usize) -> i64 {
        self.flow[self.cell(from, to)]
    }

    /// Returns the residual capacity of `from -> to` after the last solve.
    ///
    /// # Panics
    /// Panics when either index is out of range.
    #[must_use]
    pub fn residual(&self, from: usize, to: usize) -> i64 {
        i64::from(self.capacity.get(from, to)) - self.flow(from, to)
    }

    /// Computes the maximum flow from `source` to `sink`.
    ///
    /// The flow matrix is reset first, so repeated calls are independent.
    /// When `source == sink` no augmenting path can exist and the result is 0.
    ///
    /// # Errors
    /// Returns [`FlowError::NodeOutOfRange`] when either terminal is not a
    /// node of the network.
    #[instrument(
        name = "flow.max_flow",
        level = "debug",
        err,
        skip(self),
        fields(nodes = self.node_count()),
    )]
    pub fn max_flow(&mut self, source: usize, sink: usize) -> Result<u64, FlowError> {
        self.check_node(source)?;
        self.check_node(sink)?;
        self.flow.fill(0);
        self.solved_source = None;

        let mut total: u64 = 0;
        let mut augmentations: usize = 0;
        while let Some(parent) = self.augmenting_path(source, sink) {
            let bottleneck = self.bottleneck(&parent, source, sink);
            self.push_along(&parent, source, sink, bottleneck);
            total += bottleneck.unsigned_abs();
            augmentations += 1;
            trace!(bottleneck, total, "augmented along shortest residual path");
        }

        if total == 0 {
            debug!("sink is unreachable from source");
        }
        debug!(total, augmentations, "maximum flow computed");
        self.solved_source = Some(source);
        Ok(total)
    }

    /// Returns the minimum cut left by the last successful
    /// [`FlowNetwork::max_flow`], taken from that solve's source.
    ///
    /// The cut capacity equals the value that solve returned.
    ///
    /// # Errors
    /// Returns [`FlowError::NotSolved`] when no solve has succeeded yet.
    ///
    /// # Examples
    /// ```
    /// use colonet_core::{FlowError, FlowNetwork};
    ///
    /// let mut network = FlowNetwork::from_rows(vec![
    ///     vec![0, 3, 2],
    ///     vec![0, 0, 2],
    ///     vec![0, 0, 0],
    /// ])?;
    /// assert_eq!(network.min_cut(), Err(FlowError::NotSolved));
    /// let value = network.max_flow(0, 2)?;
    /// assert_eq!(network.min_cut()?.capacity(), value);
    /// # Ok::<(), colonet_core::FlowError>(())
    /// ```
    pub fn min_cut(&self) -> Result<MinCut, FlowError> {
        let source = self.solved_source.ok_or(FlowError::NotSolved)?;
        let reachable = self.residual_reachable(source);
        let source_side: Vec<usize> = (0..self.node_count())
            .filter(|&node| reachable[node])
            .collect();
        let capacity = source_side
            .iter()
            .flat_map(|&from| {
                (0..self.node_count())
                    .filter(|&to| !reachable[to])
                    .map(move |to| (from, to))
            })
            .map(|(from, to)| u64::from(self.capacity.get(from, to)))
            .sum();
        Ok(MinCut {
            source,
            source_side,
            capacity,
        })
    }

    fn check_node(&self, node: usize) -> Result<(), FlowError> {
        if node < self.node_count() {
            Ok(())
        } else {
            Err(FlowError::NodeOutOfRange {
                node,
                node_count: self.node_count(),
            })
        }
    }

    fn cell(&self, from: usize, to: usize) -> usize {
        assert!(from < self.node_count(), "node {from} out of range");
        assert!(to < self.node_count(), "node {to} out of range");
        from * self.node_count() + to
    }

    /// Breadth-first search over edges with positive residual capacity.
    ///
    /// Returns each node's discovering predecessor, or `None` when the sink
    /// cannot be reached. The search stops as soon as the sink is discovered.
    fn augmenting_path(&self, source: usize, sink: usize) -> Option<Vec<Option<usize>>> {
        let node_count = self.node_count();
        let mut parent: Vec<Option<usize>> = vec![None; node_count];
        parent[source] = Some(source);
        let mut queue = VecDeque::from([source]);

        while let Some(from) = queue.pop_front() {
            for to in 0..node_count {
                if parent[to].is_none() && self.residual(from, to) > 0 {
                    parent[to] = Some(from);
                    if to == sink {
                        return Some(parent);
                    }
                    queue.push_back(to);
                }
            }
        }
        None
    }

    fn path_edges<'a>(
        parent: &'a [Option<usize>],
        source: usize,
        sink: usize,
    ) -> impl Iterator<Item = (usize, usize)> + 'a {
        let mut to = sink;
        std::iter::from_fn(move || {
            if to == source {
                return None;
            }
            let from = parent[to]?;
            let edge = (from, to);
            to = from;
            Some(edge)
        })
    }

    fn bottleneck(&self, parent: &[Option<usize>], source: usize, sink: usize) -> i64 {
        Self::path_edges(parent, source, sink)
            .map(|(from, to)| self.residual(from, to))
            .min()
            .unwrap_or(0)
    }

    fn push_along(&mut self, parent: &[Option<usize>], source: usize, sink: usize, amount: i64) {
        let edges: Vec<(usize, usize)> = Self::path_edges(parent, source, sink).collect();
        for (from, to) in edges {
            let forward = self.cell(from, to);
            let backward = self.cell(to, from);
            self.flow[forward] += amount;
            self.flow[backward] -= amount;
        }
    }

    fn residual_reachable(&self, source: usize) -> Vec<bool> {
        let node_count = self.node_count();
        let mut reachable = vec![false; node_count];
        reachable[source] = true;
        let mut queue = VecDeque::from([source]);
        while let Some(from) = queue.pop_front() {
            for to in 0..node_count {
                if !reachable[to] && self.residual(from, to) > 0 {
                    reachable[to] = true;
                    queue.push_back(to);
                }
            }
        }
        reachable
    }
}

#[cfg(test)]
mod property;
