//! Algebraic square names.

use crate::BoardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of files (columns `A..=H`) on a chessboard.
pub const BOARD_FILES: usize = 8;
/// Number of ranks (rows `1..=8`) on a chessboard.
pub const BOARD_RANKS: usize = 8;

const FILE_LETTERS: [char; BOARD_FILES] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

/// One of the 64 board squares, e.g. `E4`.
///
/// Squares are indexed rank-major from `A1 = 0` to `H8 = 63`. This index is
/// the canonical order used everywhere a square set is iterated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square(u8);

impl Square {
    pub const COUNT: usize = BOARD_FILES * BOARD_RANKS;

    /// Build a square from zero-based file (`A = 0`) and rank (`1 = 0`) indices.
    pub fn new(file: usize, rank: usize) -> Option<Self> {
        if file >= BOARD_FILES || rank >= BOARD_RANKS {
            return None;
        }
        Some(Self((rank * BOARD_FILES + file) as u8))
    }

    /// Square with the given canonical index (`A1 = 0`, `H8 = 63`).
    pub fn from_index(index: usize) -> Option<Self> {
        (index < Self::COUNT).then_some(Self(index as u8))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Zero-based file index, `A = 0`.
    #[inline]
    pub fn file(self) -> usize {
        self.index() % BOARD_FILES
    }

    /// Zero-based rank index, rank `1` = 0.
    #[inline]
    pub fn rank(self) -> usize {
        self.index() / BOARD_FILES
    }

    #[inline]
    pub fn file_letter(self) -> char {
        FILE_LETTERS[self.file()]
    }

    /// All 64 squares in canonical order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::COUNT as u8).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_letter(), self.rank() + 1)
    }
}

impl FromStr for Square {
    type Err = BoardError;

    /// Parse `"E4"` or `"e4"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BoardError::InvalidSquare(s.to_string());
        let mut chars = s.trim().chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let file = FILE_LETTERS
            .iter()
            .position(|&c| c == file.to_ascii_uppercase())
            .ok_or_else(invalid)?;
        let rank = rank
            .to_digit(10)
            .and_then(|r| (r as usize).checked_sub(1))
            .ok_or_else(invalid)?;
        Square::new(file, rank).ok_or_else(invalid)
    }
}

impl TryFrom<String> for Square {
    type Error = BoardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(value: Square) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_rank_major_from_a1() {
        assert_eq!(Square::new(0, 0).unwrap().to_string(), "A1");
        assert_eq!(Square::new(7, 0).unwrap().to_string(), "H1");
        assert_eq!(Square::new(0, 7).unwrap().to_string(), "A8");
        assert_eq!(Square::from_index(63).unwrap().to_string(), "H8");
        assert!(Square::from_index(64).is_none());
        assert!(Square::new(8, 0).is_none());
    }

    #[test]
    fn parses_either_case() {
        let e4: Square = "E4".parse().unwrap();
        assert_eq!(e4, "e4".parse().unwrap());
        assert_eq!((e4.file(), e4.rank()), (4, 3));
    }

    #[test]
    fn rejects_malformed_names() {
        for bad in ["", "E", "E9", "I1", "E0", "E44", "44"] {
            assert_eq!(
                bad.parse::<Square>(),
                Err(BoardError::InvalidSquare(bad.to_string())),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn all_is_canonical_and_complete() {
        let names: Vec<String> = Square::all().map(|s| s.to_string()).collect();
        assert_eq!(names.len(), 64);
        assert_eq!(names[0], "A1");
        assert_eq!(names[8], "A2");
        assert_eq!(names[63], "H8");
    }
}
