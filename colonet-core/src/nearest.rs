//! Nearest existing facility to a query point.
//!
//! A linear scan compares squared Euclidean distances computed exactly in
//! integer arithmetic. Only a strictly closer candidate replaces the current
//! best, so ties resolve to the earliest candidate.

use std::fmt;

use tracing::{instrument, trace};

use crate::error::define_error_codes;

/// Errors returned by [`nearest`] and [`nearest_match`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum NearestError {
    /// The candidate list was empty.
    #[error("no candidate facilities to search")]
    NoCandidates,
}

define_error_codes! {
    /// Stable codes describing [`NearestError`] variants.
    enum NearestErrorCode for NearestError {
        /// The candidate list was empty.
        NoCandidates => NoCandidates => "NEAREST_NO_CANDIDATES",
    }
}

/// A site on the integer plane.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// Creates a point at (`x`, `y`).
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the exact squared Euclidean distance to `other`.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> u128 {
        let dx = u128::from(self.x.abs_diff(other.x));
        let dy = u128::from(self.y.abs_diff(other.y));
        dx * dx + dy * dy
    }

    /// Returns the Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The winning candidate of a nearest-point scan.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NearestMatch {
    /// Position of the candidate in the input slice.
    pub index: usize,
    /// The candidate itself.
    pub point: Point,
    /// Squared distance from the query.
    pub distance_squared: u128,
}

/// Returns the candidate closest to `query`, with its position and distance.
///
/// # Errors
/// Returns [`NearestError::NoCandidates`] when `candidates` is empty.
///
/// # Examples
/// ```
/// use colonet_core::{Point, nearest_match};
///
/// let sites = [Point::new(0, 0), Point::new(4, 4), Point::new(-4, -4)];
/// let found = nearest_match(Point::new(-3, -3), &sites)?;
/// assert_eq!(found.index, 2);
/// assert_eq!(found.distance_squared, 2);
/// # Ok::<(), colonet_core::NearestError>(())
/// ```
#[instrument(
    name = "nearest.scan",
    level = "debug",
    err,
    skip(candidates),
    fields(candidates = candidates.len()),
)]
pub fn nearest_match(query: Point, candidates: &[Point]) -> Result<NearestMatch, NearestError> {
    let mut indexed = candidates.iter().copied().enumerate();
    let (index, point) = indexed.next().ok_or(NearestError::NoCandidates)?;
    let mut best = NearestMatch {
        index,
        point,
        distance_squared: query.distance_squared(point),
    };

    for (index, point) in indexed {
        let distance_squared = query.distance_squared(point);
        if distance_squared < best.distance_squared {
            best = NearestMatch {
                index,
                point,
                distance_squared,
            };
        }
    }
    trace!(index = best.index, "nearest candidate selected");
    Ok(best)
}

/// Returns the candidate closest to `query`.
///
/// # Errors
/// Returns [`NearestError::NoCandidates`] when `candidates` is empty.
///
/// # Examples
/// ```
/// use colonet_core::{Point, nearest};
///
/// let sites = [(0, 0), (2, 2), (5, 5), (10, 10)].map(Point::from);
/// assert_eq!(nearest(Point::new(3, 3), &sites)?, Point::new(2, 2));
/// # Ok::<(), colonet_core::NearestError>(())
/// ```
pub fn nearest(query: Point, candidates: &[Point]) -> Result<Point, NearestError> {
    nearest_match(query, candidates).map(|found| found.point)
}
