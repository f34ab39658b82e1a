//! Win detection for Quarto.
//!
//! Every candidate line is a fixed list of four cells in a static table:
//! 4 rows, 4 columns, 2 diagonals and, under extended rules, the nine
//! 2x2 squares. Each line goes through the same per-axis uniformity
//! reducer, so rows, columns, diagonals and squares share one code path.

use super::super::piece::{Axis, Piece, SharedAttribute};
use super::super::position::Position;
use super::super::Board;
use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Which kind of line a set of four cells forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Row `0..4`.
    Row(u8),
    /// Column `0..4`.
    Column(u8),
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
    /// 2x2 square identified by its top-left cell (extended rules).
    Square {
        /// Row of the top-left cell.
        row: u8,
        /// Column of the top-left cell.
        col: u8,
    },
}

impl std::fmt::Display for LineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineKind::Row(r) => write!(f, "row {}", r),
            LineKind::Column(c) => write!(f, "column {}", c),
            LineKind::Diagonal => write!(f, "diagonal"),
            LineKind::AntiDiagonal => write!(f, "anti-diagonal"),
            LineKind::Square { row, col } => write!(f, "square at r{}c{}", row, col),
        }
    }
}

/// Four cells that win when filled with pieces sharing an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    kind: LineKind,
    cells: [Position; 4],
}

impl Line {
    /// Returns the kind of line.
    pub fn kind(&self) -> LineKind {
        self.kind
    }

    /// Returns the four cells.
    pub fn cells(&self) -> &[Position; 4] {
        &self.cells
    }

    /// True for 2x2 squares.
    pub fn is_square(&self) -> bool {
        matches!(self.kind, LineKind::Square { .. })
    }
}

/// Lines checked under standard rules.
pub const STANDARD_LINE_COUNT: usize = 10;

/// Lines checked under extended rules.
pub const EXTENDED_LINE_COUNT: usize = 19;

const fn line_table() -> [Line; EXTENDED_LINE_COUNT] {
    let placeholder = Line {
        kind: LineKind::Diagonal,
        cells: [Position::at(0, 0); 4],
    };
    let mut lines = [placeholder; EXTENDED_LINE_COUNT];

    let mut i = 0;
    while i < 4 {
        lines[i] = Line {
            kind: LineKind::Row(i as u8),
            cells: [
                Position::at(i, 0),
                Position::at(i, 1),
                Position::at(i, 2),
                Position::at(i, 3),
            ],
        };
        lines[4 + i] = Line {
            kind: LineKind::Column(i as u8),
            cells: [
                Position::at(0, i),
                Position::at(1, i),
                Position::at(2, i),
                Position::at(3, i),
            ],
        };
        i += 1;
    }

    lines[8] = Line {
        kind: LineKind::Diagonal,
        cells: [
            Position::at(0, 0),
            Position::at(1, 1),
            Position::at(2, 2),
            Position::at(3, 3),
        ],
    };
    lines[9] = Line {
        kind: LineKind::AntiDiagonal,
        cells: [
            Position::at(0, 3),
            Position::at(1, 2),
            Position::at(2, 1),
            Position::at(3, 0),
        ],
    };

    let mut row = 0;
    while row < 3 {
        let mut col = 0;
        while col < 3 {
            lines[STANDARD_LINE_COUNT + row * 3 + col] = Line {
                kind: LineKind::Square {
                    row: row as u8,
                    col: col as u8,
                },
                cells: [
                    Position::at(row, col),
                    Position::at(row, col + 1),
                    Position::at(row + 1, col),
                    Position::at(row + 1, col + 1),
                ],
            };
            col += 1;
        }
        row += 1;
    }

    lines
}

/// Rows, columns, diagonals, then 2x2 squares (row-major by top-left cell).
static LINES: [Line; EXTENDED_LINE_COUNT] = line_table();

/// Returns the candidate lines for the given rule variant.
pub fn lines(include_squares: bool) -> &'static [Line] {
    if include_squares {
        &LINES
    } else {
        &LINES[..STANDARD_LINE_COUNT]
    }
}

/// A line that wins, with every attribute its pieces share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct WinningLine {
    line: Line,
    attributes: Vec<SharedAttribute>,
}

impl WinningLine {
    /// Returns the winning line.
    pub fn line(&self) -> &Line {
        &self.line
    }

    /// Returns the shared attributes (at least one, in axis order).
    pub fn attributes(&self) -> &[SharedAttribute] {
        &self.attributes
    }
}

impl std::fmt::Display for WinningLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let attrs = self
            .attributes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{} ({})", self.line.kind, attrs)
    }
}

/// All winning lines found on a board. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinReport {
    lines: Vec<WinningLine>,
}

impl WinReport {
    /// Winning lines in line-table order.
    pub fn lines(&self) -> &[WinningLine] {
        &self.lines
    }

    /// Looks up a winning line by kind.
    pub fn line(&self, kind: LineKind) -> Option<&WinningLine> {
        self.lines.iter().find(|w| w.line.kind == kind)
    }

    /// True if the given line is among the winners.
    pub fn contains(&self, kind: LineKind) -> bool {
        self.line(kind).is_some()
    }

    /// Every cell that belongs to at least one winning line, for highlighting.
    pub fn cells(&self) -> Vec<Position> {
        let mut cells: Vec<Position> = self.lines.iter().flat_map(|w| w.line.cells).collect();
        cells.sort();
        cells.dedup();
        cells
    }
}

impl std::fmt::Display for WinReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lines = self
            .lines
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{}", lines)
    }
}

/// Attributes on which all four pieces agree, in axis order.
///
/// For each axis, the line is uniform iff every piece's value equals the
/// first piece's value.
pub fn shared_attributes(pieces: &[Piece; 4]) -> Vec<SharedAttribute> {
    let first = pieces[0];
    Axis::iter()
        .filter(|&axis| pieces.iter().all(|p| p.attribute(axis) == first.attribute(axis)))
        .map(|axis| first.attribute(axis))
        .collect()
}

/// Evaluates one line: `Some` iff all four cells are occupied and share an attribute.
pub fn check_line(board: &Board, line: &Line) -> Option<WinningLine> {
    let [a, b, c, d] = line.cells.map(|pos| board.get(pos));
    let pieces = [a?, b?, c?, d?];
    let attributes = shared_attributes(&pieces);
    (!attributes.is_empty()).then(|| WinningLine::new(*line, attributes))
}

/// Finds every winning line on the board.
///
/// Pure and stateless; call it fresh after every placement. With
/// `include_squares`, the nine 2x2 squares are checked as well.
#[instrument(skip(board))]
pub fn find_win(board: &Board, include_squares: bool) -> Option<WinReport> {
    let lines: Vec<WinningLine> = lines(include_squares)
        .iter()
        .filter_map(|line| check_line(board, line))
        .collect();

    if lines.is_empty() {
        return None;
    }

    debug!(count = lines.len(), "Winning lines found");
    Some(WinReport { lines })
}
