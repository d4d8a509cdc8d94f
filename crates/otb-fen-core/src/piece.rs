//! Piece identities as emitted by the piece detector.

use crate::BoardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    White,
    Black,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Pawn,
    ];

    /// Lowercase FEN letter.
    fn fen_letter(self) -> char {
        match self {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        }
    }

    fn name(self) -> &'static str {
        match self {
            PieceKind::King => "King",
            PieceKind::Queen => "Queen",
            PieceKind::Rook => "Rook",
            PieceKind::Bishop => "Bishop",
            PieceKind::Knight => "Knight",
            PieceKind::Pawn => "Pawn",
        }
    }
}

/// A colored piece, one of the 12 detector classes.
///
/// The canonical text form is the detector class name, e.g. `WhiteKnight`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// FEN character: uppercase for white, lowercase for black.
    pub fn fen_char(self) -> char {
        let c = self.kind.fen_letter();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Inverse of [`Piece::fen_char`].
    pub fn from_fen_char(c: char) -> Option<Self> {
        let kind = PieceKind::ALL
            .into_iter()
            .find(|k| k.fen_letter() == c.to_ascii_lowercase())?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Self { color, kind })
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color = match self.color {
            Color::White => "White",
            Color::Black => "Black",
        };
        write!(f, "{color}{}", self.kind.name())
    }
}

impl FromStr for Piece {
    type Err = BoardError;

    /// Parse a detector class name such as `WhitePawn` or `BlackKing`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || BoardError::UnknownPieceType(s.to_string());
        let (color, rest) = if let Some(rest) = s.strip_prefix("White") {
            (Color::White, rest)
        } else if let Some(rest) = s.strip_prefix("Black") {
            (Color::Black, rest)
        } else {
            return Err(unknown());
        };
        let kind = PieceKind::ALL
            .into_iter()
            .find(|k| k.name() == rest)
            .ok_or_else(unknown)?;
        Ok(Self { color, kind })
    }
}

impl TryFrom<String> for Piece {
    type Error = BoardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Piece> for String {
    fn from(value: Piece) -> Self {
        value.to_string()
    }
}
