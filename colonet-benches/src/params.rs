//! Benchmark parameter types.

use std::fmt;

/// Parameters shared by every network benchmark run.
#[derive(Clone, Debug)]
pub struct NetworkBenchParams {
    /// Number of colonies in the generated network.
    pub node_count: usize,
}

impl fmt::Display for NetworkBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.node_count)
    }
}
