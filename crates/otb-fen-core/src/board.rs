use crate::{BoardError, Piece, Square};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Occupancy of all 64 squares.
///
/// A board is built once per reading and not mutated afterwards; every
/// square is present, holding either a piece or nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<Square, Option<Piece>>",
    into = "BTreeMap<Square, Option<Piece>>"
)]
pub struct BoardState {
    squares: [Option<Piece>; Square::COUNT],
}

impl Default for BoardState {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoardState {
    pub const fn empty() -> Self {
        Self {
            squares: [None; Square::COUNT],
        }
    }

    /// Build a board from `(square, piece)` placements.
    ///
    /// Later placements on the same square replace earlier ones.
    pub fn from_placements(placements: impl IntoIterator<Item = (Square, Piece)>) -> Self {
        let mut squares = [None; Square::COUNT];
        for (square, piece) in placements {
            squares[square.index()] = Some(piece);
        }
        Self { squares }
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// All 64 squares in canonical order (`A1`, `B1`, ..., `H8`).
    pub fn iter(&self) -> impl Iterator<Item = (Square, Option<Piece>)> + '_ {
        Square::all().map(move |sq| (sq, self.squares[sq.index()]))
    }

    /// Occupied squares only.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.iter().filter_map(|(sq, p)| p.map(|p| (sq, p)))
    }

    pub fn piece_count(&self) -> usize {
        self.squares.iter().filter(|p| p.is_some()).count()
    }
}

impl TryFrom<BTreeMap<Square, Option<Piece>>> for BoardState {
    type Error = BoardError;

    fn try_from(map: BTreeMap<Square, Option<Piece>>) -> Result<Self, Self::Error> {
        if map.len() != Square::COUNT {
            return Err(BoardError::IncompleteLayout { got: map.len() });
        }
        Ok(Self::from_placements(
            map.into_iter().filter_map(|(sq, p)| p.map(|p| (sq, p))),
        ))
    }
}

impl From<BoardState> for BTreeMap<Square, Option<Piece>> {
    fn from(board: BoardState) -> Self {
        board.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, PieceKind};

    #[test]
    fn empty_board_has_every_square() {
        let board = BoardState::empty();
        assert_eq!(board.iter().count(), 64);
        assert_eq!(board.piece_count(), 0);
    }

    #[test]
    fn later_placement_replaces_earlier() {
        let e4: Square = "E4".parse().unwrap();
        let pawn = Piece::new(Color::White, PieceKind::Pawn);
        let queen = Piece::new(Color::Black, PieceKind::Queen);
        let board = BoardState::from_placements([(e4, pawn), (e4, queen)]);
        assert_eq!(board.get(e4), Some(queen));
        assert_eq!(board.piece_count(), 1);
    }

    #[test]
    fn json_is_a_complete_square_map() {
        let e4: Square = "E4".parse().unwrap();
        let board =
            BoardState::from_placements([(e4, Piece::new(Color::White, PieceKind::Pawn))]);
        let json = serde_json::to_value(board).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 64);
        assert_eq!(obj["E4"], "WhitePawn");
        assert!(obj["A1"].is_null());

        let back: BoardState = serde_json::from_value(json).unwrap();
        assert_eq!(back, board);
    }

    #[test]
    fn json_with_missing_squares_is_rejected() {
        let err = serde_json::from_str::<BoardState>(r#"{"E4":"WhitePawn"}"#).unwrap_err();
        assert!(err.to_string().contains("got 1"), "{err}");
    }
}
