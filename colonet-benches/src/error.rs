//! Benchmark setup error type.
//!
//! Lets setup code propagate solver failures with `?` before any timing
//! starts.

use colonet_core::{FlowError, MatrixError, MstError, TourError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic matrix generation failed.
    #[error("synthetic network generation failed: {0}")]
    Matrix(#[from] MatrixError),
    /// Spanning tree computation failed.
    #[error("MST computation failed: {0}")]
    Mst(#[from] MstError),
    /// Tour search failed.
    #[error("tour search failed: {0}")]
    Tour(#[from] TourError),
    /// Flow computation failed.
    #[error("flow computation failed: {0}")]
    Flow(#[from] FlowError),
}
