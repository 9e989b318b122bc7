//! Exact shortest round trip over every colony.
//!
//! Two exhaustive strategies are provided. Both start and end at node 0,
//! treat a zero off-diagonal distance as a missing link, and visit candidate
//! orderings in the same lexicographic order while replacing the incumbent
//! only on a strictly cheaper tour. They therefore agree on the path as well
//! as the cost.

mod backtrack;
mod permutation;

use std::fmt;

use tracing::{debug, instrument};

use crate::error::{MatrixError, define_error_codes};
use crate::matrix::{SquareMatrix, Weight};

/// Errors returned by [`TourSolver::solve`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TourError {
    /// The distance matrix was empty or not square.
    #[error("invalid distance matrix: {source}")]
    Matrix {
        /// Underlying shape error.
        #[from]
        source: MatrixError,
    },
    /// No ordering of the nodes forms a closed cycle over non-zero links.
    #[error("no round trip visits all {node_count} nodes over existing links")]
    NoHamiltonianCycle {
        /// Number of nodes in the instance.
        node_count: usize,
    },
    /// The instance exceeds the configured node limit.
    #[error("exact tour search over {node_count} nodes exceeds the limit of {limit}")]
    TooManyNodes {
        /// Number of nodes in the instance.
        node_count: usize,
        /// Configured ceiling.
        limit: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`TourError`] variants.
    enum TourErrorCode for TourError {
        /// The distance matrix was empty or not square.
        InvalidMatrix => Matrix { .. } => "TOUR_INVALID_MATRIX",
        /// No closed cycle exists.
        NoHamiltonianCycle => NoHamiltonianCycle { .. } => "TOUR_NO_HAMILTONIAN_CYCLE",
        /// The instance exceeds the configured node limit.
        TooManyNodes => TooManyNodes { .. } => "TOUR_TOO_MANY_NODES",
    }
}

/// Search strategy used by [`TourSolver`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum TourStrategy {
    /// Depth-first extension from node 0 that abandons any partial path
    /// already as expensive as the best complete tour.
    #[default]
    Backtracking,
    /// Scores every ordering of nodes `1..N` in lexicographic order.
    Permutation,
}

impl TourStrategy {
    /// Returns the lowercase strategy name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backtracking => "backtracking",
            Self::Permutation => "permutation",
        }
    }
}

impl fmt::Display for TourStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A closed tour starting and ending at node 0.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tour {
    cost: u64,
    path: Vec<usize>,
}

impl Tour {
    /// Returns the summed distance of every leg, including the return leg.
    #[must_use]
    #[rustfmt::skip]
    pub fn cost(&self) -> u64 { self.cost }

    /// Returns the visiting order, `N + 1` entries long with `0` at both ends.
    #[must_use]
    #[rustfmt::skip]
    pub fn path(&self) -> &[usize] { &self.path }

    /// Consumes the tour and returns its path.
    #[must_use]
    pub fn into_path(self) -> Vec<usize> {
        self.path
    }
}

/// Returns the length of the direct link `from -> to`, or `None` when the
/// matrix records no link.
fn link(distances: &SquareMatrix, from: usize, to: usize) -> Option<Weight> {
    let distance = distances.get(from, to);
    (distance > 0).then_some(distance)
}

/// Exact round-trip solver over a distance matrix.
///
/// # Examples
/// ```
/// use colonet_core::{TourSolver, TourStrategy};
///
/// let tour = TourSolver::from_rows(vec![
///     vec![0, 16, 45, 32],
///     vec![16, 0, 18, 21],
///     vec![45, 18, 0, 7],
///     vec![32, 21, 7, 0],
/// ])?
/// .with_strategy(TourStrategy::Permutation)
/// .solve()?;
/// assert_eq!(tour.cost(), 73);
/// assert_eq!(tour.path(), &[0, 1, 2, 3, 0]);
/// # Ok::<(), colonet_core::TourError>(())
/// ```
#[derive(Clone, Debug)]
pub struct TourSolver {
    distances: SquareMatrix,
    strategy: TourStrategy,
    node_limit: Option<usize>,
}

impl TourSolver {
    /// Creates a solver using [`TourStrategy::Backtracking`] and no node limit.
    #[must_use]
    pub fn new(distances: SquareMatrix) -> Self {
        Self {
            distances,
            strategy: TourStrategy::default(),
            node_limit: None,
        }
    }

    /// Builds a solver from raw distance rows.
    ///
    /// # Errors
    /// Returns [`TourError::Matrix`] when the rows are empty or not square.
    pub fn from_rows(rows: Vec<Vec<Weight>>) -> Result<Self, TourError> {
        Ok(Self::new(SquareMatrix::try_from_rows(rows)?))
    }

    /// Selects the search strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: TourStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Refuses instances with more than `limit` nodes.
    #[must_use]
    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }

    /// Returns the configured strategy.
    #[must_use]
    #[rustfmt::skip]
    pub fn strategy(&self) -> TourStrategy { self.strategy }

    /// Finds a cheapest closed tour visiting every node exactly once.
    ///
    /// A single node yields the trivial tour `[0, 0]` with cost 0.
    ///
    /// # Errors
    /// Returns [`TourError::TooManyNodes`] when a node limit is set and
    /// exceeded, and [`TourError::NoHamiltonianCycle`] when the non-zero
    /// links admit no closed tour.
    #[instrument(
        name = "tour.solve",
        level = "debug",
        err,
        skip(self),
        fields(nodes = self.distances.order(), strategy = %self.strategy),
    )]
    pub fn solve(&self) -> Result<Tour, TourError> {
        let node_count = self.distances.order();
        if let Some(limit) = self.node_limit
            && node_count > limit
        {
            return Err(TourError::TooManyNodes { node_count, limit });
        }
        if node_count == 1 {
            return Ok(Tour {
                cost: 0,
                path: vec![0, 0],
            });
        }

        let best = match self.strategy {
            TourStrategy::Backtracking => backtrack::search(&self.distances),
            TourStrategy::Permutation => permutation::search(&self.distances),
        };
        let tour = best.ok_or(TourError::NoHamiltonianCycle { node_count })?;
        debug!(cost = tour.cost, "optimal tour found");
        Ok(tour)
    }
}

/// Solves the tour for raw distance rows with the default strategy.
///
/// # Errors
/// Returns the errors of [`TourSolver::from_rows`] and [`TourSolver::solve`].
pub fn solve_tour(rows: Vec<Vec<Weight>>) -> Result<Tour, TourError> {
    TourSolver::from_rows(rows)?.solve()
}

#[cfg(test)]
mod property;
