//! Plain-text rendering of a network plan.

use std::fmt::Display;
use std::io::{self, Write};

use clap::ValueEnum;
use colonet_core::{
    FlowError, MstError, NearestError, Point, SpanningForest, Tour, TourError,
};

/// How colony indices are printed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum LabelStyle {
    /// `A`, `B`, `C`, ... for the first 26 colonies, indices after that.
    #[default]
    Letters,
    /// Zero-based indices.
    Indices,
}

impl LabelStyle {
    /// Returns the printed name of `node`.
    #[must_use]
    pub fn label(self, node: usize) -> String {
        match (self, u8::try_from(node)) {
            (Self::Letters, Ok(offset)) if offset < 26 => char::from(b'A' + offset).to_string(),
            _ => node.to_string(),
        }
    }
}

/// Outcome of every section of a plan.
///
/// Each section holds its own result so one failing computation does not
/// hide the others.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlanReport {
    /// Label style used when rendering.
    pub labels: LabelStyle,
    /// Flow source colony.
    pub source: usize,
    /// Flow sink colony.
    pub sink: usize,
    /// Cable layout.
    pub spanning_tree: Result<SpanningForest, MstError>,
    /// Shortest round trip.
    pub tour: Result<Tour, TourError>,
    /// Maximum flow from `source` to `sink`.
    pub max_flow: Result<u64, FlowError>,
    /// Facility closest to the query point.
    pub nearest: Result<Point, NearestError>,
}

impl PlanReport {
    /// Returns `true` when every section succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.spanning_tree.is_ok()
            && self.tour.is_ok()
            && self.max_flow.is_ok()
            && self.nearest.is_ok()
    }
}

/// Renders `report` to `writer` as four numbered sections.
///
/// A failed section prints a single `error:` line in place of its result.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use colonet_cli::cli::{LabelStyle, PlanReport, render_report};
/// # use colonet_core::{FlowError, Point, edges_from_distances, kruskal, solve_tour};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let report = PlanReport {
///     labels: LabelStyle::Letters,
///     source: 0,
///     sink: 7,
///     spanning_tree: kruskal(2, &[colonet_core::WeightedEdge::new(0, 1, 5)]),
///     tour: solve_tour(vec![vec![0, 5], vec![5, 0]]),
///     max_flow: Err(FlowError::NodeOutOfRange { node: 7, node_count: 2 }),
///     nearest: Ok(Point::new(1, 2)),
/// };
/// let mut buffer = Vec::new();
/// render_report(&report, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.contains("route: A B A\n"));
/// assert!(text.contains("3. maximum flow (A -> H)\nerror: "));
/// # Ok(())
/// # }
/// ```
pub fn render_report(report: &PlanReport, mut writer: impl Write) -> io::Result<()> {
    let labels = report.labels;

    writeln!(writer, "1. minimum spanning tree")?;
    match &report.spanning_tree {
        Ok(forest) => {
            for (left, right) in forest.endpoints() {
                writeln!(writer, "({}, {})", labels.label(left), labels.label(right))?;
            }
        }
        Err(err) => write_error(&mut writer, err)?,
    }

    writeln!(writer, "2. shortest tour")?;
    match &report.tour {
        Ok(tour) => {
            writeln!(writer, "cost: {}", tour.cost())?;
            let route = tour
                .path()
                .iter()
                .map(|&node| labels.label(node))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(writer, "route: {route}")?;
        }
        Err(err) => write_error(&mut writer, err)?,
    }

    writeln!(
        writer,
        "3. maximum flow ({} -> {})",
        labels.label(report.source),
        labels.label(report.sink)
    )?;
    match &report.max_flow {
        Ok(total) => writeln!(writer, "{total}")?,
        Err(err) => write_error(&mut writer, err)?,
    }

    writeln!(writer, "4. nearest facility")?;
    match &report.nearest {
        Ok(point) => writeln!(writer, "{point}")?,
        Err(err) => write_error(&mut writer, err)?,
    }
    Ok(())
}

fn write_error(writer: &mut impl Write, err: &dyn Display) -> io::Result<()> {
    writeln!(writer, "error: {err}")
}
