use crate::assign::CollisionPolicy;
use crate::fen::FenTrailer;
use crate::select::{PieceSelectionParams, SquareSelectionParams};
use otb_fen_core::BoardOrientation;
use serde::{Deserialize, Serialize};

/// Configuration for [`crate::BoardReader`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardReaderParams {
    /// Which side of the frame white starts on.
    pub orientation: BoardOrientation,
    pub squares: SquareSelectionParams,
    pub pieces: PieceSelectionParams,
    pub collisions: CollisionPolicy,
    /// Fixed FEN fields appended after the placement.
    pub trailer: FenTrailer,
}
