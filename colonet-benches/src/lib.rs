//! Benchmark support crate for colonet.
//!
//! Provides seeded synthetic networks and parameter types used by the
//! Criterion benchmarks for the spanning tree, tour and flow solvers.

pub mod error;
pub mod network;
pub mod params;
