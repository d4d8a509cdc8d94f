use crate::{Piece, Square};

/// Validation failures of the board pipeline.
///
/// Every variant is local to a single call; nothing here is retryable.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BoardError {
    #[error("expected {expected} square points, got {got}")]
    ShapeMismatch { expected: usize, got: usize },
    #[error("unsupported board orientation `{0}`")]
    UnsupportedOrientation(String),
    #[error("unknown piece type `{0}`")]
    UnknownPieceType(String),
    #[error("no {0} supplied")]
    EmptyInput(&'static str),
    #[error("invalid square name `{0}`")]
    InvalidSquare(String),
    #[error("invalid FEN placement: {0}")]
    InvalidFen(String),
    #[error("point {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },
    #[error("points {first} and {second} share the same position")]
    CoincidentPoints { first: usize, second: usize },
    #[error("square {square} already holds {kept}, refusing {incoming}")]
    SquareConflict {
        square: Square,
        kept: Piece,
        incoming: Piece,
    },
    #[error("square layout must label all 64 squares exactly once (got {got} distinct)")]
    IncompleteLayout { got: usize },
}
