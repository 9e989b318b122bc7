//! Parser for the whitespace-separated plan input.
//!
//! The input lists, in order: the colony count `N`, an `N x N` distance
//! matrix, an `N x N` capacity matrix, `N` facility coordinates written as
//! `(x, y)` and one query coordinate. Whitespace is insignificant, including
//! inside coordinates.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use colonet_core::{MatrixError, Point, SquareMatrix, Weight};
use thiserror::Error;
use tracing::warn;

/// One-based location of a character in the input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Position {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number, starting at 1.
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Errors raised while reading plan input.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum InputError {
    /// The input ended before every value was read.
    #[error("unexpected end of input while reading {expected}")]
    UnexpectedEnd {
        /// What the parser was looking for.
        expected: &'static str,
    },
    /// A token did not match what the grammar requires.
    #[error("{position}: expected {expected}, found `{found}`")]
    Unexpected {
        /// Where the token starts.
        position: Position,
        /// What the parser was looking for.
        expected: &'static str,
        /// The offending text.
        found: String,
    },
    /// An integer does not fit the type of the value being read.
    #[error("{position}: {value} is out of range for {expected}")]
    OutOfRange {
        /// Where the integer starts.
        position: Position,
        /// What the parser was reading.
        expected: &'static str,
        /// The integer as written.
        value: String,
    },
    /// The colony count is zero or negative.
    #[error("{position}: colony count must be greater than 0 (got {found})")]
    InvalidColonyCount {
        /// Where the count starts.
        position: Position,
        /// The count as parsed.
        found: i64,
    },
    /// A distance or capacity is negative.
    #[error("{position}: {expected} must not be negative (got {value})")]
    Negative {
        /// Where the value starts.
        position: Position,
        /// Which kind of value was read.
        expected: &'static str,
        /// The value as parsed.
        value: i64,
    },
    /// The distance matrix breaks a structural rule.
    #[error("invalid distance matrix: {source}")]
    Distances {
        /// The violated rule.
        #[from]
        source: MatrixError,
    },
}

impl InputError {
    /// Returns a stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnexpectedEnd { .. } => "INPUT_UNEXPECTED_END",
            Self::Unexpected { .. } => "INPUT_UNEXPECTED_TOKEN",
            Self::OutOfRange { .. } => "INPUT_OUT_OF_RANGE",
            Self::InvalidColonyCount { .. } => "INPUT_INVALID_COLONY_COUNT",
            Self::Negative { .. } => "INPUT_NEGATIVE_VALUE",
            Self::Distances { .. } => "INPUT_INVALID_DISTANCES",
        }
    }
}

/// Everything a plan needs, validated and ready for the solvers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlanInput {
    /// Symmetric cable distances with a zero diagonal.
    pub distances: SquareMatrix,
    /// Directed link capacities.
    pub capacities: SquareMatrix,
    /// Existing facility sites, one per colony.
    pub facilities: Vec<Point>,
    /// Location of the new subscriber.
    pub query: Point,
}

impl PlanInput {
    /// Returns the number of colonies.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.distances.order()
    }
}

/// Parses a complete plan from `text`.
///
/// Trailing content after the query coordinate is ignored with a warning.
///
/// # Errors
/// Returns [`InputError`] describing the first malformed or invalid value.
///
/// # Examples
/// ```
/// use colonet_cli::cli::parse_plan;
///
/// let plan = parse_plan("2\n0 3\n3 0\n0 5\n0 0\n(0,0) (4, 4)\n(3,3)\n")?;
/// assert_eq!(plan.node_count(), 2);
/// assert_eq!(plan.capacities.get(0, 1), 5);
/// assert_eq!(plan.query.x, 3);
/// # Ok::<(), colonet_cli::cli::InputError>(())
/// ```
pub fn parse_plan(text: &str) -> Result<PlanInput, InputError> {
    let mut scanner = Scanner::new(text);

    let (position, count) = scanner.read_integer("colony count")?;
    let node_count = usize::try_from(count)
        .ok()
        .filter(|&n| n > 0)
        .ok_or(InputError::InvalidColonyCount {
            position,
            found: count,
        })?;

    let distances = scanner.read_matrix(node_count, "distance")?;
    distances.validate_distances()?;
    let capacities = scanner.read_matrix(node_count, "capacity")?;

    let facilities = (0..node_count)
        .map(|_| scanner.read_point())
        .collect::<Result<Vec<_>, _>>()?;
    let query = scanner.read_point()?;

    scanner.skip_whitespace();
    if scanner.peek().is_some() {
        warn!(at = %scanner.position(), "ignoring trailing input after the query coordinate");
    }

    Ok(PlanInput {
        distances,
        capacities,
        facilities,
        query,
    })
}

struct Scanner<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let next = self.chars.next()?;
        if next == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(next)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Consumes the rest of the current word for error reporting.
    fn take_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(next) = self.peek() {
            if next.is_whitespace() {
                break;
            }
            word.push(next);
            self.bump();
        }
        word
    }

    fn unexpected(&mut self, position: Position, expected: &'static str) -> InputError {
        if self.peek().is_none() {
            return InputError::UnexpectedEnd { expected };
        }
        InputError::Unexpected {
            position,
            expected,
            found: self.take_word(),
        }
    }

    fn read_integer(&mut self, expected: &'static str) -> Result<(Position, i64), InputError> {
        self.skip_whitespace();
        let position = self.position();
        let mut digits = String::new();
        if let Some(sign @ ('+' | '-')) = self.peek() {
            digits.push(sign);
            self.bump();
        }
        while let Some(digit) = self.peek().filter(char::is_ascii_digit) {
            digits.push(digit);
            self.bump();
        }

        if !digits.ends_with(|c: char| c.is_ascii_digit()) {
            let mut error = self.unexpected(position, expected);
            if let InputError::Unexpected { found, .. } = &mut error {
                found.insert_str(0, &digits);
            }
            return Err(error);
        }
        let value = digits.parse::<i64>().map_err(|_| InputError::OutOfRange {
            position,
            expected,
            value: digits.clone(),
        })?;
        Ok((position, value))
    }

    fn read_weight(&mut self, expected: &'static str) -> Result<Weight, InputError> {
        let (position, value) = self.read_integer(expected)?;
        if value < 0 {
            return Err(InputError::Negative {
                position,
                expected,
                value,
            });
        }
        Weight::try_from(value).map_err(|_| InputError::OutOfRange {
            position,
            expected,
            value: value.to_string(),
        })
    }

    fn read_matrix(
        &mut self,
        node_count: usize,
        expected: &'static str,
    ) -> Result<SquareMatrix, InputError> {
        // Storage grows with the values actually read, never with the declared count.
        let mut rows = Vec::new();
        for _ in 0..node_count {
            let mut row = Vec::new();
            for _ in 0..node_count {
                row.push(self.read_weight(expected)?);
            }
            rows.push(row);
        }
        Ok(SquareMatrix::try_from_rows(rows)?)
    }

    fn expect_char(&mut self, wanted: char, expected: &'static str) -> Result<(), InputError> {
        self.skip_whitespace();
        let position = self.position();
        if self.peek() == Some(wanted) {
            self.bump();
            Ok(())
        } else {
            Err(self.unexpected(position, expected))
        }
    }

    fn read_coordinate(&mut self, expected: &'static str) -> Result<i32, InputError> {
        let (position, value) = self.read_integer(expected)?;
        i32::try_from(value).map_err(|_| InputError::OutOfRange {
            position,
            expected,
            value: value.to_string(),
        })
    }

    fn read_point(&mut self) -> Result<Point, InputError> {
        self.expect_char('(', "`(`")?;
        let x = self.read_coordinate("x coordinate")?;
        self.expect_char(',', "`,`")?;
        let y = self.read_coordinate("y coordinate")?;
        self.expect_char(')', "`)`")?;
        Ok(Point::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    const FOUR_COLONIES: &str = "\
4
0 16 45 32
16 0 18 21
45 18 0 7
32 21 7 0
0 48 12 18
52 0 42 32
18 46 0 56
24 36 52 0
(200,500)
(300,100)
(450,150)
(520,480)
(400,300)
";

    #[test]
    fn parses_a_complete_plan() {
        let plan = parse_plan(FOUR_COLONIES).expect("valid plan");
        assert_eq!(plan.node_count(), 4);
        assert_eq!(plan.distances.row(2), &[45, 18, 0, 7]);
        assert_eq!(plan.capacities.get(1, 0), 52);
        assert_eq!(plan.facilities[3], Point::new(520, 480));
        assert_eq!(plan.query, Point::new(400, 300));
    }

    #[test]
    fn accepts_spaced_and_signed_coordinates() {
        let plan = parse_plan("1 0 0 ( -3 ,\n+4 ) (0,-0)").expect("valid plan");
        assert_eq!(plan.facilities, vec![Point::new(-3, 4)]);
        assert_eq!(plan.query, Point::new(0, 0));
    }

    #[rstest]
    #[case::zero("0", 0)]
    #[case::negative("  -2", -2)]
    fn rejects_non_positive_counts(#[case] text: &str, #[case] found: i64) {
        let err = parse_plan(text).expect_err("count must be positive");
        assert!(matches!(err, InputError::InvalidColonyCount { found: f, .. } if f == found));
        assert_eq!(err.code(), "INPUT_INVALID_COLONY_COUNT");
    }

    #[test]
    fn reports_position_of_negative_distance() {
        let err = parse_plan("2\n0 1\n-1 0\n").expect_err("negative distance");
        assert_eq!(
            err,
            InputError::Negative {
                position: Position { line: 3, column: 1 },
                expected: "distance",
                value: -1,
            }
        );
        assert_eq!(
            err.to_string(),
            "line 3, column 1: distance must not be negative (got -1)"
        );
    }

    #[test]
    fn rejects_non_zero_self_distance() {
        let err = parse_plan("2\n0 1\n1 4\n").expect_err("diagonal must be zero");
        assert_eq!(
            err,
            InputError::Distances {
                source: MatrixError::NonZeroDiagonal { index: 1, value: 4 }
            }
        );
    }

    #[test]
    fn rejects_negative_capacity() {
        let err = parse_plan("1\n0\n-5\n").expect_err("negative capacity");
        assert!(matches!(
            err,
            InputError::Negative {
                expected: "capacity",
                value: -5,
                ..
            }
        ));
    }

    #[rstest]
    #[case::missing_paren("1 0 0 3,4) (1,1)", "`(`", "3,4)")]
    #[case::bad_separator("1 0 0 (3;4) (1,1)", "`,`", ";4)")]
    #[case::word_instead_of_number("two", "colony count", "two")]
    #[case::lonely_sign("1 - 0", "distance", "-")]
    fn reports_unexpected_tokens(
        #[case] text: &str,
        #[case] expected: &str,
        #[case] found: &str,
    ) {
        let err = parse_plan(text).expect_err("malformed input");
        match err {
            InputError::Unexpected {
                expected: actual_expected,
                found: actual_found,
                ..
            } => {
                assert_eq!(actual_expected, expected);
                assert_eq!(actual_found, found);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[rstest]
    #[case::empty("", "colony count")]
    #[case::short_matrix("2 0 1 1", "distance")]
    #[case::missing_query("1 0 0 (1,1)", "`(`")]
    #[case::unclosed_point("1 0 0 (1,1", "`)`")]
    #[case::huge_count_without_data("5000000000", "distance")]
    #[case::large_count_with_few_values("100000 0 3 7", "distance")]
    fn reports_truncated_input(#[case] text: &str, #[case] expected: &'static str) {
        assert_eq!(parse_plan(text), Err(InputError::UnexpectedEnd { expected }));
    }

    #[rstest]
    #[case::weight_too_large("1 4294967296", "distance")]
    #[case::coordinate_too_large("1 0 0 (2147483648, 0) (0,0)", "x coordinate")]
    #[case::beyond_i64("99999999999999999999", "colony count")]
    fn reports_out_of_range_values(#[case] text: &str, #[case] expected: &str) {
        let err = parse_plan(text).expect_err("value out of range");
        assert!(
            matches!(&err, InputError::OutOfRange { expected: e, .. } if *e == expected),
            "unexpected error: {err:?}"
        );
    }
}
