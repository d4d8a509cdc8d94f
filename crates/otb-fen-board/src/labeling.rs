//! Orientation-aware algebraic labels for an ordered 8x8 grid.
//!
//! Grid rows run along files and grid columns along ranks: with white on the
//! left of the frame, the top row is the `A` file and the leftmost column is
//! rank 1. With white on the right, both axes flip.

use crate::grid::{find_coincident, order_squares, SquareGrid};
use nalgebra::Point2;
use otb_fen_core::{BoardError, BoardOrientation, Square, BOARD_FILES, BOARD_RANKS};
use serde::{Deserialize, Serialize};

/// Square shown at grid cell `(row, col)` under `orientation`.
///
/// Returns `None` outside the 8x8 grid.
pub fn square_for_cell(orientation: BoardOrientation, row: usize, col: usize) -> Option<Square> {
    if row >= BOARD_FILES || col >= BOARD_RANKS {
        return None;
    }
    match orientation {
        BoardOrientation::LeftWhite => Square::new(row, col),
        BoardOrientation::RightWhite => Square::new(BOARD_FILES - 1 - row, BOARD_RANKS - 1 - col),
    }
}

/// Inverse of [`square_for_cell`].
pub fn cell_for_square(orientation: BoardOrientation, square: Square) -> (usize, usize) {
    match orientation {
        BoardOrientation::LeftWhite => (square.file(), square.rank()),
        BoardOrientation::RightWhite => {
            (BOARD_FILES - 1 - square.file(), BOARD_RANKS - 1 - square.rank())
        }
    }
}

/// Pixel center of every board square, labelled under a fixed orientation.
///
/// This is the value a caller may keep between a square-detection pass and
/// a later piece-detection pass on the same camera setup. It is plain data:
/// nothing checks that it still matches the current image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LayoutRepr", into = "LayoutRepr")]
pub struct SquareLayout {
    orientation: BoardOrientation,
    centers: [Point2<f32>; Square::COUNT],
}

/// One labelled square center.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabeledSquare {
    pub square: Square,
    pub center: Point2<f32>,
}

impl SquareLayout {
    /// Order `points` into an 8x8 grid and label it.
    pub fn from_points(
        points: &[Point2<f32>],
        orientation: BoardOrientation,
    ) -> Result<Self, BoardError> {
        let grid = order_squares(points, BOARD_FILES, BOARD_RANKS)?;
        label_grid(&grid, orientation)
    }

    #[inline]
    pub fn orientation(&self) -> BoardOrientation {
        self.orientation
    }

    #[inline]
    pub fn center(&self, square: Square) -> Point2<f32> {
        self.centers[square.index()]
    }

    /// All squares in canonical order (`A1` first).
    pub fn iter(&self) -> impl Iterator<Item = LabeledSquare> + '_ {
        Square::all().map(move |square| LabeledSquare {
            square,
            center: self.centers[square.index()],
        })
    }

    /// Centers in canonical square order; index `i` is `Square::from_index(i)`.
    pub fn centers(&self) -> &[Point2<f32>; Square::COUNT] {
        &self.centers
    }
}

/// Label an ordered grid with algebraic square names.
///
/// Only the two fixed orientations are supported, and the grid must be 8x8.
pub fn label_grid(
    grid: &SquareGrid,
    orientation: BoardOrientation,
) -> Result<SquareLayout, BoardError> {
    if grid.rows() != BOARD_FILES || grid.cols() != BOARD_RANKS {
        return Err(BoardError::ShapeMismatch {
            expected: Square::COUNT,
            got: grid.rows() * grid.cols(),
        });
    }

    let mut centers = [Point2::origin(); Square::COUNT];
    for (row, col, center) in grid.iter() {
        // The grid is 8x8, so every cell has a square.
        if let Some(square) = square_for_cell(orientation, row, col) {
            centers[square.index()] = center;
        }
    }

    Ok(SquareLayout {
        orientation,
        centers,
    })
}

#[derive(Serialize, Deserialize)]
struct LayoutRepr {
    orientation: BoardOrientation,
    squares: Vec<LabeledSquare>,
}

impl TryFrom<LayoutRepr> for SquareLayout {
    type Error = BoardError;

    fn try_from(repr: LayoutRepr) -> Result<Self, Self::Error> {
        let mut centers = [Point2::origin(); Square::COUNT];
        let mut seen = [false; Square::COUNT];
        for entry in &repr.squares {
            seen[entry.square.index()] = true;
            centers[entry.square.index()] = entry.center;
        }
        let distinct = seen.iter().filter(|s| **s).count();
        if distinct != Square::COUNT || repr.squares.len() != Square::COUNT {
            return Err(BoardError::IncompleteLayout { got: distinct });
        }
        if let Some(index) = centers
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(BoardError::NonFinitePoint { index });
        }
        if let Some((first, second)) = find_coincident(&centers) {
            return Err(BoardError::CoincidentPoints { first, second });
        }
        Ok(Self {
            orientation: repr.orientation,
            centers,
        })
    }
}

impl From<SquareLayout> for LayoutRepr {
    fn from(layout: SquareLayout) -> Self {
        Self {
            orientation: layout.orientation,
            squares: layout.iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn perfect_points() -> Vec<Point2<f32>> {
        (0..8)
            .flat_map(|r| {
                (0..8).map(move |c| Point2::new(25.0 + 50.0 * c as f32, 25.0 + 50.0 * r as f32))
            })
            .collect()
    }

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn left_white_maps_rows_to_files_directly() {
        let layout = SquareLayout::from_points(&perfect_points(), BoardOrientation::LeftWhite)
            .unwrap();
        // grid[0][0] is files[0] + ranks[0].
        assert_eq!(layout.center(sq("A1")), Point2::new(25.0, 25.0));
        assert_eq!(layout.center(sq("A8")), Point2::new(375.0, 25.0));
        assert_eq!(layout.center(sq("H1")), Point2::new(25.0, 375.0));
        assert_eq!(layout.center(sq("H8")), Point2::new(375.0, 375.0));
    }

    #[test]
    fn right_white_reverses_both_axes() {
        let layout = SquareLayout::from_points(&perfect_points(), BoardOrientation::RightWhite)
            .unwrap();
        assert_eq!(layout.center(sq("H8")), Point2::new(25.0, 25.0));
        assert_eq!(layout.center(sq("H1")), Point2::new(375.0, 25.0));
        assert_eq!(layout.center(sq("A8")), Point2::new(25.0, 375.0));
        assert_eq!(layout.center(sq("A1")), Point2::new(375.0, 375.0));
    }

    #[test]
    fn every_orientation_labels_each_cell_exactly_once() {
        for orientation in [BoardOrientation::LeftWhite, BoardOrientation::RightWhite] {
            let labels: HashSet<Square> = (0..8)
                .flat_map(|r| (0..8).map(move |c| (r, c)))
                .map(|(r, c)| square_for_cell(orientation, r, c).unwrap())
                .collect();
            assert_eq!(labels.len(), 64, "{orientation}");

            let layout = SquareLayout::from_points(&perfect_points(), orientation).unwrap();
            let centers: HashSet<[u32; 2]> = layout
                .iter()
                .map(|s| [s.center.x.to_bits(), s.center.y.to_bits()])
                .collect();
            assert_eq!(centers.len(), 64, "{orientation}");
        }
    }

    #[test]
    fn cell_for_square_inverts_square_for_cell() {
        for orientation in [BoardOrientation::LeftWhite, BoardOrientation::RightWhite] {
            for square in Square::all() {
                let (row, col) = cell_for_square(orientation, square);
                assert_eq!(square_for_cell(orientation, row, col), Some(square));
            }
        }
        assert_eq!(square_for_cell(BoardOrientation::LeftWhite, 8, 0), None);
    }

    #[test]
    fn non_8x8_grid_is_a_shape_mismatch() {
        let points: Vec<Point2<f32>> = perfect_points().into_iter().take(16).collect();
        let grid = order_squares(&points, 4, 4).unwrap();
        assert_eq!(
            label_grid(&grid, BoardOrientation::LeftWhite),
            Err(BoardError::ShapeMismatch {
                expected: 64,
                got: 16
            })
        );
    }

    #[test]
    fn layout_json_requires_all_squares() {
        let layout = SquareLayout::from_points(&perfect_points(), BoardOrientation::RightWhite)
            .unwrap();
        let mut json = serde_json::to_value(&layout).unwrap();
        assert_eq!(json["orientation"], "right_white");
        assert_eq!(json["squares"][0]["square"], "A1");
        assert_eq!(
            serde_json::from_value::<SquareLayout>(json.clone()).unwrap(),
            layout
        );

        json["squares"].as_array_mut().unwrap().pop();
        assert!(serde_json::from_value::<SquareLayout>(json).is_err());
    }

    #[test]
    fn stacked_centers_are_rejected_on_build_and_load() {
        let stacked = vec![Point2::new(10.0, 10.0); 64];
        assert_eq!(
            SquareLayout::from_points(&stacked, BoardOrientation::LeftWhite),
            Err(BoardError::CoincidentPoints {
                first: 0,
                second: 1
            })
        );

        // A hand-edited cache that moves B2 onto A1.
        let layout = SquareLayout::from_points(&perfect_points(), BoardOrientation::LeftWhite)
            .unwrap();
        let mut json = serde_json::to_value(&layout).unwrap();
        let a1 = json["squares"][0]["center"].clone();
        json["squares"][9]["center"] = a1;
        let err = serde_json::from_value::<SquareLayout>(json).unwrap_err();
        assert!(err.to_string().contains("points 0 and 9 share the same position"), "{err}");
    }
}
