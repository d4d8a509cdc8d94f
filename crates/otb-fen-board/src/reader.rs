//! End-to-end board reading: detections in, FEN out.

use crate::assign::{Assignment, NearestSquareAssigner};
use crate::fen;
use crate::labeling::SquareLayout;
use crate::params::BoardReaderParams;
use crate::select::{select_pieces, select_square_centers};
use log::info;
use otb_fen_core::{BoardError, BoardState, PieceDetection, Square, SquareDetection};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Output of one board reading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardReading {
    pub layout: SquareLayout,
    pub assignment: Assignment,
    pub fen: String,
}

impl BoardReading {
    #[inline]
    pub fn board(&self) -> &BoardState {
        &self.assignment.board
    }
}

/// Chains square selection, grid ordering, labeling, piece assignment and
/// FEN encoding.
///
/// The reader holds only configuration. A [`SquareLayout`] returned by
/// [`BoardReader::locate_squares`] belongs to the caller, who may pass it to
/// any number of later [`BoardReader::read_pieces`] calls.
#[derive(Clone, Debug, Default)]
pub struct BoardReader {
    pub params: BoardReaderParams,
}

impl BoardReader {
    pub fn new(params: BoardReaderParams) -> Self {
        Self { params }
    }

    /// Turn raw square detections into a labelled layout.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, detections), fields(n = detections.len()))
    )]
    pub fn locate_squares(
        &self,
        detections: &[SquareDetection],
    ) -> Result<SquareLayout, BoardError> {
        let centers = select_square_centers(detections, Square::COUNT, &self.params.squares)?;
        let layout = SquareLayout::from_points(&centers, self.params.orientation)?;
        info!(
            "located {} squares ({})",
            Square::COUNT,
            self.params.orientation
        );
        Ok(layout)
    }

    /// Place piece detections on a previously located layout.
    ///
    /// The layout orientation wins over `params.orientation`; it was fixed
    /// when the layout was built.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, layout, pieces), fields(n = pieces.len()))
    )]
    pub fn read_pieces(
        &self,
        layout: &SquareLayout,
        pieces: &[PieceDetection],
    ) -> Result<BoardReading, BoardError> {
        let confident = select_pieces(pieces, &self.params.pieces);
        let assignment =
            NearestSquareAssigner::new(self.params.collisions).assign(layout, &confident)?;
        let fen = fen::encode(&assignment.board, &self.params.trailer);
        info!("read {} pieces: {fen}", assignment.board.piece_count());
        Ok(BoardReading {
            layout: layout.clone(),
            assignment,
            fen,
        })
    }

    /// Locate squares and read pieces in one call.
    pub fn read_board(
        &self,
        squares: &[SquareDetection],
        pieces: &[PieceDetection],
    ) -> Result<BoardReading, BoardError> {
        let layout = self.locate_squares(squares)?;
        self.read_pieces(&layout, pieces)
    }
}
