//! Property-based tests for the Kruskal MST implementation.
//!
//! Verifies Kruskal against an independent Prim oracle and validates the
//! structural invariants of every forest it returns (acyclicity, edge count,
//! component count) across generated graphs with varied weight
//! distributions.

mod oracle;
mod strategies;
