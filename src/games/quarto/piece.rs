//! Piece and attribute types for Quarto.
//!
//! A piece is the ordered 4-tuple of independent two-valued attributes.
//! Each attribute axis is a closed enum, so exactly 16 pieces can exist.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{EnumIter, IntoEnumIterator};
use tracing::instrument;

/// Piece color.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter, strum::Display,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Color {
    /// Dark piece.
    Black,
    /// Light piece.
    White,
}

/// Piece height.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter, strum::Display,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Size {
    /// Tall piece.
    Large,
    /// Short piece.
    Small,
}

/// Piece cross-section.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter, strum::Display,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Shape {
    /// Square cross-section.
    Square,
    /// Round cross-section.
    Round,
}

/// Piece top.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter, strum::Display,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Top {
    /// Solid top.
    Flat,
    /// Hollow top.
    Hole,
}

/// One of the four attribute axes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Axis {
    /// [`Color`] axis.
    Color,
    /// [`Size`] axis.
    Size,
    /// [`Shape`] axis.
    Shape,
    /// [`Top`] axis.
    Top,
}

/// An attribute value on a specific axis, e.g. `color=BLACK`.
///
/// Used by win detection to report which attribute a line shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharedAttribute {
    /// All pieces share this color.
    Color(Color),
    /// All pieces share this size.
    Size(Size),
    /// All pieces share this shape.
    Shape(Shape),
    /// All pieces share this top.
    Top(Top),
}

impl SharedAttribute {
    /// Returns the axis this attribute lives on.
    pub fn axis(&self) -> Axis {
        match self {
            SharedAttribute::Color(_) => Axis::Color,
            SharedAttribute::Size(_) => Axis::Size,
            SharedAttribute::Shape(_) => Axis::Shape,
            SharedAttribute::Top(_) => Axis::Top,
        }
    }
}

impl std::fmt::Display for SharedAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SharedAttribute::Color(v) => write!(f, "{}={}", Axis::Color, v),
            SharedAttribute::Size(v) => write!(f, "{}={}", Axis::Size, v),
            SharedAttribute::Shape(v) => write!(f, "{}={}", Axis::Shape, v),
            SharedAttribute::Top(v) => write!(f, "{}={}", Axis::Top, v),
        }
    }
}

/// A Quarto piece: one of the 16 attribute combinations.
///
/// Pieces are plain values compared by their attributes. They serialize
/// as their 4-letter code (see [`Piece::code`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Piece {
    color: Color,
    size: Size,
    shape: Shape,
    top: Top,
}

/// Number of distinct pieces.
pub const PIECE_COUNT: usize = 16;

impl Piece {
    /// Creates a piece from its four attributes.
    pub const fn new(color: Color, size: Size, shape: Shape, top: Top) -> Self {
        Self {
            color,
            size,
            shape,
            top,
        }
    }

    /// Returns the color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the shape.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns the top.
    pub fn top(&self) -> Top {
        self.top
    }

    /// Returns this piece's value on the given axis.
    pub fn attribute(&self, axis: Axis) -> SharedAttribute {
        match axis {
            Axis::Color => SharedAttribute::Color(self.color),
            Axis::Size => SharedAttribute::Size(self.size),
            Axis::Shape => SharedAttribute::Shape(self.shape),
            Axis::Top => SharedAttribute::Top(self.top),
        }
    }

    /// Stable index in `0..16`.
    ///
    /// Bit 3 is color, bit 2 size, bit 1 shape, bit 0 top; the first
    /// variant of each axis is the zero bit.
    pub fn index(&self) -> usize {
        let color = matches!(self.color, Color::White) as usize;
        let size = matches!(self.size, Size::Small) as usize;
        let shape = matches!(self.shape, Shape::Round) as usize;
        let top = matches!(self.top, Top::Hole) as usize;
        (color << 3) | (size << 2) | (shape << 1) | top
    }

    /// Inverse of [`Piece::index`]. Returns `None` for indices `>= 16`.
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= PIECE_COUNT {
            return None;
        }
        let bit = |shift: usize| index & (1 << shift) != 0;
        Some(Self {
            color: if bit(3) { Color::White } else { Color::Black },
            size: if bit(2) { Size::Small } else { Size::Large },
            shape: if bit(1) { Shape::Round } else { Shape::Square },
            top: if bit(0) { Top::Hole } else { Top::Flat },
        })
    }

    /// Iterates over all 16 pieces in index order.
    pub fn all() -> impl Iterator<Item = Piece> {
        Color::iter().flat_map(|color| {
            Size::iter().flat_map(move |size| {
                Shape::iter().flat_map(move |shape| {
                    Top::iter().map(move |top| Piece::new(color, size, shape, top))
                })
            })
        })
    }

    /// 4-letter positional code: color (B/W), size (L/S), shape (S/R), top (F/H).
    pub fn code(&self) -> String {
        let mut code = String::with_capacity(4);
        code.push(match self.color {
            Color::Black => 'B',
            Color::White => 'W',
        });
        code.push(match self.size {
            Size::Large => 'L',
            Size::Small => 'S',
        });
        code.push(match self.shape {
            Shape::Square => 'S',
            Shape::Round => 'R',
        });
        code.push(match self.top {
            Top::Flat => 'F',
            Top::Hole => 'H',
        });
        code
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code())
    }
}

/// Error parsing a piece code.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ParsePieceError {
    /// Code was not exactly four letters long.
    #[display("Piece code {:?} must be exactly 4 letters", _0)]
    BadLength(String),

    /// A letter is not valid at its position.
    #[display("Invalid {} letter {:?} in piece code", axis, letter)]
    BadLetter {
        /// Axis the letter was meant to encode.
        axis: Axis,
        /// The offending letter.
        letter: char,
    },
}

impl std::error::Error for ParsePieceError {}

impl FromStr for Piece {
    type Err = ParsePieceError;

    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let letters: Vec<char> = s.trim().chars().map(|c| c.to_ascii_uppercase()).collect();
        let &[color_letter, size_letter, shape_letter, top_letter] = letters.as_slice() else {
            return Err(ParsePieceError::BadLength(s.to_string()));
        };
        let bad = |axis, letter| ParsePieceError::BadLetter { axis, letter };

        let color = match color_letter {
            'B' => Color::Black,
            'W' => Color::White,
            other => return Err(bad(Axis::Color, other)),
        };
        let size = match size_letter {
            'L' => Size::Large,
            'S' => Size::Small,
            other => return Err(bad(Axis::Size, other)),
        };
        let shape = match shape_letter {
            'S' => Shape::Square,
            'R' => Shape::Round,
            other => return Err(bad(Axis::Shape, other)),
        };
        let top = match top_letter {
            'F' => Top::Flat,
            'H' => Top::Hole,
            other => return Err(bad(Axis::Top, other)),
        };
        Ok(Piece::new(color, size, shape, top))
    }
}

impl From<Piece> for String {
    fn from(piece: Piece) -> Self {
        piece.code()
    }
}

impl TryFrom<String> for Piece {
    type Error = ParsePieceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
