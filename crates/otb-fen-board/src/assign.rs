//! Nearest-square assignment of piece detections.

use crate::labeling::SquareLayout;
use kiddo::{KdTree, SquaredEuclidean};
use log::{debug, warn};
use nalgebra::Point2;
use otb_fen_core::{BoardError, BoardState, Piece, PieceDetection, Square};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// What happens when two pieces land on the same square.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// The later detection in input order replaces the earlier one.
    #[default]
    LastWins,
    /// The earlier detection stays; later ones are dropped.
    FirstWins,
    /// Fail with [`BoardError::SquareConflict`].
    Reject,
}

/// Where one piece detection ended up.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PieceAssignment {
    /// Position of the detection in the input slice.
    pub detection: usize,
    pub piece: Piece,
    pub square: Square,
    /// Pixel distance from the detection to the square center.
    pub distance_px: f32,
}

/// Two pieces resolved to one square; `dropped` is not on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquareCollision {
    pub square: Square,
    pub kept: Piece,
    pub dropped: Piece,
}

/// Result of assigning a set of piece detections.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub board: BoardState,
    /// One entry per input detection, in input order.
    pub placements: Vec<PieceAssignment>,
    pub collisions: Vec<SquareCollision>,
}

/// Static nearest-neighbor index over the 64 square centers.
///
/// Squares are inserted in canonical order, so when a query is exactly
/// equidistant from several centers the lowest square index (`A1` side)
/// wins. A [`SquareLayout`] never holds two equal centers, which keeps
/// every k-d tree leaf splittable.
pub struct SquareIndex {
    tree: KdTree<f32, 2>,
    squares: Vec<Square>,
}

impl SquareIndex {
    pub fn new(layout: &SquareLayout) -> Self {
        let coords = layout
            .centers()
            .iter()
            .map(|p| [p.x, p.y])
            .collect::<Vec<_>>();
        let tree: KdTree<f32, 2> = (&coords).into();
        Self {
            tree,
            squares: Square::all().collect(),
        }
    }

    /// Closest square to `point` and its pixel distance.
    pub fn nearest(&self, point: Point2<f32>) -> (Square, f32) {
        let query = [point.x, point.y];
        let best = self.tree.nearest_one::<SquaredEuclidean>(&query);

        // Gather every center at the same squared distance and take the
        // lowest index, independent of tree traversal order.
        let radius = best.distance + best.distance * 1e-6 + f32::EPSILON;
        let item = self
            .tree
            .within_unsorted::<SquaredEuclidean>(&query, radius)
            .into_iter()
            .filter(|nn| nn.distance <= best.distance)
            .map(|nn| nn.item)
            .min()
            .unwrap_or(best.item);

        (self.squares[item as usize], best.distance.sqrt())
    }
}

/// Assigns each piece to its geometrically nearest square.
///
/// No confidence filtering happens here; callers pass only the pieces they
/// already trust.
#[derive(Clone, Debug, Default)]
pub struct NearestSquareAssigner {
    pub policy: CollisionPolicy,
}

impl NearestSquareAssigner {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self { policy }
    }

    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, layout, pieces), fields(n = pieces.len()))
    )]
    pub fn assign(
        &self,
        layout: &SquareLayout,
        pieces: &[PieceDetection],
    ) -> Result<Assignment, BoardError> {
        let index = SquareIndex::new(layout);
        let mut squares: [Option<Piece>; Square::COUNT] = [None; Square::COUNT];
        let mut placements = Vec::with_capacity(pieces.len());
        let mut collisions = Vec::new();

        for (i, det) in pieces.iter().enumerate() {
            let piece: Piece = det.label.parse()?;
            if !det.center.x.is_finite() || !det.center.y.is_finite() {
                return Err(BoardError::NonFinitePoint { index: i });
            }
            let (square, distance_px) = index.nearest(det.center);
            placements.push(PieceAssignment {
                detection: i,
                piece,
                square,
                distance_px,
            });

            let slot = &mut squares[square.index()];
            match (*slot, self.policy) {
                (None, _) => *slot = Some(piece),
                (Some(kept), CollisionPolicy::Reject) => {
                    return Err(BoardError::SquareConflict {
                        square,
                        kept,
                        incoming: piece,
                    });
                }
                (Some(previous), CollisionPolicy::LastWins) => {
                    warn!("{square}: {piece} replaces {previous}");
                    *slot = Some(piece);
                    collisions.push(SquareCollision {
                        square,
                        kept: piece,
                        dropped: previous,
                    });
                }
                (Some(kept), CollisionPolicy::FirstWins) => {
                    warn!("{square}: keeping {kept}, dropping {piece}");
                    collisions.push(SquareCollision {
                        square,
                        kept,
                        dropped: piece,
                    });
                }
            }
        }

        let board = BoardState::from_placements(
            Square::all().filter_map(|sq| squares[sq.index()].map(|p| (sq, p))),
        );
        debug!(
            "assigned {} pieces to {} squares ({} collisions)",
            placements.len(),
            board.piece_count(),
            collisions.len()
        );

        Ok(Assignment {
            board,
            placements,
            collisions,
        })
    }
}

/// Assign pieces with the default last-wins collision policy.
pub fn assign_pieces(
    layout: &SquareLayout,
    pieces: &[PieceDetection],
) -> Result<BoardState, BoardError> {
    Ok(NearestSquareAssigner::default().assign(layout, pieces)?.board)
}
