//! High-level facade crate for the `otb-fen-*` workspace.
//!
//! This crate provides:
//! - re-exports of the core types and the board pipeline,
//! - JSON loading of detector output and of the cached square layout,
//! - JSON reports of a board reading,
//! - (feature `cli`) the `otb-fen` command-line tool.
//!
//! ## API map
//! - `otb_fen::core`: squares, pieces, detections, [`BoardState`], errors.
//! - `otb_fen::board`: grid ordering, labeling, nearest-square assignment, FEN.
//! - `otb_fen::io`: detection files, config, layout cache and reports.
//! - `otb_fen::logging`: stderr diagnostics for binaries.

pub use otb_fen_board as board;
pub use otb_fen_core as core;

pub use otb_fen_board::{BoardReader, BoardReaderParams, BoardReading, FenTrailer, SquareLayout};
pub use otb_fen_core::{
    BoardError, BoardOrientation, BoardState, Piece, PieceDetection, Square, SquareDetection,
};

pub mod io;
pub mod logging;
