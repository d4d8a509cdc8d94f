//! Board mapping from chessboard detections to a FEN position.
//!
//! ## Quickstart
//!
//! ```
//! use nalgebra::Point2;
//! use otb_fen_board::{BoardReader, BoardReaderParams};
//! use otb_fen_core::{BoardOrientation, PieceDetection, SquareDetection};
//!
//! let squares: Vec<SquareDetection> = (0..64)
//!     .map(|i| {
//!         let (row, col) = (i / 8, i % 8);
//!         let center = Point2::new(25.0 + 50.0 * col as f32, 25.0 + 50.0 * row as f32);
//!         SquareDetection::new(0.9, center, "square")
//!     })
//!     .collect();
//!
//! let reader = BoardReader::new(BoardReaderParams {
//!     orientation: BoardOrientation::LeftWhite,
//!     ..BoardReaderParams::default()
//! });
//! let layout = reader.locate_squares(&squares).unwrap();
//! let e4 = layout.center("E4".parse().unwrap());
//! let pieces = [PieceDetection::new(e4, "WhitePawn").with_confidence(0.9)];
//!
//! let reading = reader.read_pieces(&layout, &pieces).unwrap();
//! assert_eq!(reading.fen, "8/8/8/8/4P3/8/8/8 w - - 0 1");
//! ```
//!
//! Pipeline:
//! 1. Filter square detections by class and confidence; optionally keep the
//!    64 most confident ([`SquareSelection::TopKByConfidence`]).
//! 2. Order the 64 centers into visual rows and columns ([`order_squares`]).
//! 3. Label the grid with square names for the given orientation ([`label_grid`]).
//! 4. Filter pieces by confidence and snap each to its nearest square
//!    through a k-d tree ([`NearestSquareAssigner`]).
//! 5. Encode the board as FEN ([`fen::encode`]).

mod assign;
pub mod fen;
mod grid;
mod labeling;
mod params;
mod reader;
mod select;

pub use assign::{
    assign_pieces, Assignment, CollisionPolicy, NearestSquareAssigner, PieceAssignment,
    SquareCollision, SquareIndex,
};
pub use fen::FenTrailer;
pub use grid::{order_squares, SquareGrid};
pub use labeling::{cell_for_square, label_grid, square_for_cell, LabeledSquare, SquareLayout};
pub use params::BoardReaderParams;
pub use reader::{BoardReader, BoardReading};
pub use select::{
    select_pieces, select_square_centers, PieceSelectionParams, SquareSelection,
    SquareSelectionParams,
};
