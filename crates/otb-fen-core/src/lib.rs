//! Core types for reading a physical chessboard into a FEN position.
//!
//! This crate is intentionally small and purely descriptive. It does *not*
//! run any detector; it only models what a detector hands over (square and
//! piece detections in pixel space) and what the board pipeline produces
//! (a complete [`BoardState`]).

mod board;
mod detection;
mod error;
mod orientation;
mod piece;
mod square;

pub use board::BoardState;
pub use detection::{BoundingBox, PieceAnchor, PieceDetection, SquareDetection};
pub use error::BoardError;
pub use orientation::BoardOrientation;
pub use piece::{Color, Piece, PieceKind};
pub use square::{Square, BOARD_FILES, BOARD_RANKS};
