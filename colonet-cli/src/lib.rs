//! Support library for the colonet CLI binary.
//!
//! Exposes the CLI and logging modules so doctests and integration tests can
//! exercise the plan pipeline without forking a subprocess.

pub mod cli;
pub mod logging;
