//! Colonet core library.
//!
//! Four independent computations over a small network of colonies:
//!
//! - [`kruskal`] builds a minimum spanning tree (or forest) for the cable plan.
//! - [`TourSolver`] finds an exact shortest round trip.
//! - [`FlowNetwork`] computes the maximum flow between two colonies.
//! - [`nearest`] picks the existing facility closest to a new point.
//!
//! Each returns its own error type, so a failure in one never prevents the
//! others from running on the same input.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod flow;
mod matrix;
mod mst;
mod nearest;
#[cfg(test)]
mod test_utils;
mod tour;

pub use crate::{
    error::{MatrixError, MatrixErrorCode},
    flow::{FlowError, FlowErrorCode, FlowNetwork, MinCut},
    matrix::{SquareMatrix, Weight},
    mst::{
        DisjointSet, MstEdge, MstError, MstErrorCode, SpanningForest, WeightedEdge,
        edges_from_distances, kruskal,
    },
    nearest::{NearestError, NearestErrorCode, NearestMatch, Point, nearest, nearest_match},
    tour::{Tour, TourError, TourErrorCode, TourSolver, TourStrategy, solve_tour},
};
