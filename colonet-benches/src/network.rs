//! Seeded synthetic colony networks for benchmarking.
//!
//! Every off-diagonal distance is positive, so the distance graph is
//! complete and both the spanning tree and the tour always exist.
//! Capacities may be zero, which leaves some directed links unusable.

use colonet_core::{MatrixError, Point, SquareMatrix, Weight};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Half-width of the square that facility coordinates are drawn from.
const COORDINATE_RANGE: i32 = 10_000;

/// Configuration for synthetic network generation.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Number of colonies to generate.
    pub node_count: usize,
    /// Largest distance or capacity drawn.
    pub max_weight: Weight,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// A randomly generated colony network.
///
/// # Examples
///
/// ```
/// use colonet_benches::network::{SyntheticConfig, SyntheticNetwork};
///
/// let config = SyntheticConfig { node_count: 5, max_weight: 50, seed: 7 };
/// let network = SyntheticNetwork::generate(&config).expect("non-empty network");
/// assert_eq!(network.distances().order(), 5);
/// assert!(network.distances().is_symmetric());
/// ```
#[derive(Clone, Debug)]
pub struct SyntheticNetwork {
    distances: SquareMatrix,
    capacities: SquareMatrix,
    facilities: Vec<Point>,
}

impl SyntheticNetwork {
    /// Generates a network eagerly from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::Empty`] if `node_count` is zero.
    pub fn generate(config: &SyntheticConfig) -> Result<Self, MatrixError> {
        let node_count = config.node_count;
        let upper = config.max_weight.max(1);
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut distances = SquareMatrix::zeros(node_count)?;
        let mut capacities = SquareMatrix::zeros(node_count)?;

        for from in 0..node_count {
            for to in (0..node_count).filter(|&to| to != from) {
                capacities.set(from, to, rng.gen_range(0..=upper));
                if to > from {
                    let distance = rng.gen_range(1..=upper);
                    distances.set(from, to, distance);
                    distances.set(to, from, distance);
                }
            }
        }

        let facilities = (0..node_count)
            .map(|_| {
                Point::new(
                    rng.gen_range(-COORDINATE_RANGE..=COORDINATE_RANGE),
                    rng.gen_range(-COORDINATE_RANGE..=COORDINATE_RANGE),
                )
            })
            .collect();

        Ok(Self {
            distances,
            capacities,
            facilities,
        })
    }

    /// Returns the symmetric distance matrix.
    #[must_use]
    pub const fn distances(&self) -> &SquareMatrix {
        &self.distances
    }

    /// Returns the directed capacity matrix.
    #[must_use]
    pub const fn capacities(&self) -> &SquareMatrix {
        &self.capacities
    }

    /// Returns one facility site per colony.
    #[must_use]
    pub fn facilities(&self) -> &[Point] {
        &self.facilities
    }
}
