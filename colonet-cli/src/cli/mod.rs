//! Command-line interface orchestration for colonet.
//!
//! The `plan` command reads a colony network description and reports the
//! cable layout, the shortest round trip, the maximum flow between two
//! colonies and the facility nearest to a new subscriber.

mod commands;
mod input;
mod report;

pub use commands::{Cli, CliError, Command, PlanCommand, StrategyArg, run_cli};
pub use input::{InputError, PlanInput, Position, parse_plan};
pub use report::{LabelStyle, PlanReport, render_report};
