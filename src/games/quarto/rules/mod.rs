//! Game rules for Quarto.
//!
//! Pure functions over a [`Board`](super::Board), kept apart from board
//! storage and turn bookkeeping.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{
    EXTENDED_LINE_COUNT, Line, LineKind, STANDARD_LINE_COUNT, WinReport, WinningLine, check_line,
    find_win, lines, shared_attributes,
};
