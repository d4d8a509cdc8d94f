//! FEN encoding (and placement parsing) of a [`BoardState`].
//!
//! Only the piece-placement field is derived from the board. The remaining
//! five fields cannot be read off a single photograph and come from a fixed
//! [`FenTrailer`].

use otb_fen_core::{BoardError, BoardState, Color, Piece, Square, BOARD_FILES, BOARD_RANKS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// FEN fields 2 to 6: side to move, castling, en passant, clocks.
///
/// The default is `w - - 0 1`: white to move, no castling rights claimed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FenTrailer {
    pub side_to_move: Color,
    pub castling: String,
    pub en_passant: String,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Default for FenTrailer {
    fn default() -> Self {
        Self {
            side_to_move: Color::White,
            castling: "-".to_string(),
            en_passant: "-".to_string(),
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl FenTrailer {
    /// `w KQkq - 0 1`, as at the start of a game.
    pub fn full_castling() -> Self {
        Self {
            castling: "KQkq".to_string(),
            ..Self::default()
        }
    }
}

impl fmt::Display for FenTrailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        write!(
            f,
            "{side} {} {} {} {}",
            self.castling, self.en_passant, self.halfmove_clock, self.fullmove_number
        )
    }
}

/// Piece-placement field: rank 8 first, files `A..H` within a rank,
/// empty runs collapsed to a digit.
pub fn encode_placement(board: &BoardState) -> String {
    let mut out = String::with_capacity(71);
    for rank in (0..BOARD_RANKS).rev() {
        let mut empty = 0u8;
        for file in 0..BOARD_FILES {
            let piece = Square::new(file, rank).and_then(|sq| board.get(sq));
            match piece {
                Some(piece) => {
                    if empty > 0 {
                        out.push(char::from(b'0' + empty));
                        empty = 0;
                    }
                    out.push(piece.fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push(char::from(b'0' + empty));
        }
        if rank > 0 {
            out.push('/');
        }
    }
    out
}

/// Full six-field FEN string.
pub fn encode(board: &BoardState, trailer: &FenTrailer) -> String {
    format!("{} {trailer}", encode_placement(board))
}

/// Encode raw `(piece class name, square)` pairs.
///
/// An unrecognised class name fails with [`BoardError::UnknownPieceType`];
/// a square named twice keeps the later piece.
pub fn encode_labeled<'a>(
    pieces: impl IntoIterator<Item = (&'a str, Square)>,
    trailer: &FenTrailer,
) -> Result<String, BoardError> {
    let placements = pieces
        .into_iter()
        .map(|(label, square)| Ok((square, label.parse::<Piece>()?)))
        .collect::<Result<Vec<_>, BoardError>>()?;
    Ok(encode(&BoardState::from_placements(placements), trailer))
}

/// Parse the placement field of a FEN string into a board.
///
/// Anything after the first whitespace is ignored, so a full FEN is accepted.
pub fn parse_placement(fen: &str) -> Result<BoardState, BoardError> {
    let invalid = |why: String| BoardError::InvalidFen(why);
    let placement = fen
        .split_whitespace()
        .next()
        .ok_or_else(|| BoardError::EmptyInput("FEN string"))?;

    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != BOARD_RANKS {
        return Err(invalid(format!("expected 8 ranks, found {}", rows.len())));
    }

    let mut placements = Vec::new();
    for (row_idx, row) in rows.iter().enumerate() {
        let rank = BOARD_RANKS - 1 - row_idx;
        let mut file = 0usize;
        for c in row.chars() {
            if let Some(run) = c.to_digit(10) {
                if run == 0 || run as usize > BOARD_FILES {
                    return Err(invalid(format!("bad empty run `{c}` in rank {}", rank + 1)));
                }
                file += run as usize;
            } else {
                let piece = Piece::from_fen_char(c)
                    .ok_or_else(|| invalid(format!("unknown piece `{c}` in rank {}", rank + 1)))?;
                let square = Square::new(file, rank)
                    .ok_or_else(|| invalid(format!("rank {} overflows 8 files", rank + 1)))?;
                placements.push((square, piece));
                file += 1;
            }
            if file > BOARD_FILES {
                return Err(invalid(format!("rank {} overflows 8 files", rank + 1)));
            }
        }
        if file != BOARD_FILES {
            return Err(invalid(format!("rank {} covers {file} files", rank + 1)));
        }
    }

    Ok(BoardState::from_placements(placements))
}
