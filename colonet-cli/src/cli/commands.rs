//! Command implementations and argument parsing for the colonet CLI.

use std::fmt::Display;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colonet_core::{FlowNetwork, TourSolver, TourStrategy, edges_from_distances, kruskal, nearest};
use thiserror::Error;
use tracing::{Span, field, info, instrument, warn};

use super::input::{InputError, PlanInput, parse_plan};
use super::report::{LabelStyle, PlanReport};

const DEFAULT_MAX_TOUR_NODES: usize = 12;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "colonet", about = "Plan cabling, routes and capacity for a colony network.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Compute the spanning tree, shortest tour, maximum flow and nearest facility.
    Plan(PlanCommand),
}

/// Options accepted by the `plan` command.
#[derive(Debug, Args, Clone)]
pub struct PlanCommand {
    /// Plan input file; standard input is read when omitted.
    pub input: Option<PathBuf>,

    /// Colony where flow originates.
    #[arg(long, default_value_t = 0)]
    pub source: usize,

    /// Colony where flow terminates (defaults to the last colony).
    #[arg(long)]
    pub sink: Option<usize>,

    /// Exact search used for the shortest tour.
    #[arg(long, value_enum, default_value_t = StrategyArg::Backtracking)]
    pub strategy: StrategyArg,

    /// How colonies are named in the report.
    #[arg(long, value_enum, default_value_t = LabelStyle::Letters)]
    pub labels: LabelStyle,

    /// Largest colony count the tour solver accepts.
    #[arg(
        long = "max-tour-nodes",
        default_value_t = DEFAULT_MAX_TOUR_NODES,
        value_parser = clap::value_parser!(usize),
    )]
    pub max_tour_nodes: usize,
}

/// Tour strategies selectable from the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    /// Depth-first search with cost pruning.
    Backtracking,
    /// Lexicographic enumeration of every visiting order.
    Permutation,
}

impl From<StrategyArg> for TourStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Backtracking => Self::Backtracking,
            StrategyArg::Permutation => Self::Permutation,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading the input file failed.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Reading standard input failed.
    #[error("failed to read standard input: {source}")]
    Stdin {
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The input text is malformed or violates a value rule.
    #[error(transparent)]
    Input(#[from] InputError),
}

impl CliError {
    /// Returns a stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "CLI_IO",
            Self::Stdin { .. } => "CLI_STDIN",
            Self::Input(err) => err.code(),
        }
    }
}

/// Executes the CLI command represented by `cli`.
///
/// Only input problems are errors. Failures inside individual sections are
/// logged and carried in the returned [`PlanReport`].
///
/// # Errors
/// Returns [`CliError`] when the input cannot be read or parsed.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use colonet_cli::cli::{Cli, Command, LabelStyle, PlanCommand, StrategyArg, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "2\n0 4\n4 0\n0 9\n0 0\n(0,0) (5,5)\n(4,4)\n")?;
/// let cli = Cli {
///     command: Command::Plan(PlanCommand {
///         input: Some(file.path().to_path_buf()),
///         source: 0,
///         sink: None,
///         strategy: StrategyArg::Backtracking,
///         labels: LabelStyle::Letters,
///         max_tour_nodes: 12,
///     }),
/// };
/// let report = run_cli(cli)?;
/// assert_eq!(report.max_flow, Ok(9));
/// assert!(report.is_complete());
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<PlanReport, CliError> {
    match cli.command {
        Command::Plan(plan) => {
            Span::current().record("command", field::display("plan"));
            run_plan(plan)
        }
    }
}

#[instrument(
    name = "cli.plan",
    err,
    skip(command),
    fields(input = field::Empty, nodes = field::Empty),
)]
pub(super) fn run_plan(command: PlanCommand) -> Result<PlanReport, CliError> {
    let span = Span::current();
    let text = match command.input.as_deref() {
        Some(path) => {
            span.record("input", field::display(path.display()));
            read_input_file(path)?
        }
        None => {
            span.record("input", field::display("<stdin>"));
            read_stdin()?
        }
    };
    let input = parse_plan(&text)?;
    span.record("nodes", input.node_count());

    let report = evaluate_plan(&input, &command);
    info!(complete = report.is_complete(), "plan completed");
    Ok(report)
}

/// Runs every section of the plan independently over `input`.
pub(super) fn evaluate_plan(input: &PlanInput, command: &PlanCommand) -> PlanReport {
    let node_count = input.node_count();
    let sink = command.sink.unwrap_or(node_count.saturating_sub(1));

    let spanning_tree = kruskal(node_count, &edges_from_distances(&input.distances));
    if let Err(err) = &spanning_tree {
        report_section_failure("spanning_tree", err.code().as_str(), err);
    }

    let tour = TourSolver::new(input.distances.clone())
        .with_strategy(command.strategy.into())
        .with_node_limit(command.max_tour_nodes)
        .solve();
    if let Err(err) = &tour {
        report_section_failure("tour", err.code().as_str(), err);
    }

    let max_flow = FlowNetwork::new(input.capacities.clone()).max_flow(command.source, sink);
    if let Err(err) = &max_flow {
        report_section_failure("max_flow", err.code().as_str(), err);
    }

    let nearest_facility = nearest(input.query, &input.facilities);
    if let Err(err) = &nearest_facility {
        report_section_failure("nearest", err.code().as_str(), err);
    }

    PlanReport {
        labels: command.labels,
        source: command.source,
        sink,
        spanning_tree,
        tour,
        max_flow,
        nearest: nearest_facility,
    }
}

fn report_section_failure(section: &'static str, code: &'static str, err: &dyn Display) {
    warn!(section, code, error = %err, "plan section failed");
}

#[instrument(name = "cli.read_input", err, fields(path = field::Empty))]
pub(super) fn read_input_file(path: &Path) -> Result<String, CliError> {
    Span::current().record("path", field::display(path.display()));
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_stdin() -> Result<String, CliError> {
    let mut text = String::new();
    io::stdin()
        .lock()
        .read_to_string(&mut text)
        .map_err(|source| CliError::Stdin { source })?;
    Ok(text)
}
