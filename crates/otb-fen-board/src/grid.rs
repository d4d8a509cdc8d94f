//! Row-major ordering of unordered square centers.
//!
//! The ordering is pure coordinate sorting: sort everything by `y`, cut the
//! sorted list into `rows` runs of `cols` points, then sort each run by `x`.
//! This is only correct when the board is seen roughly frontally, so that
//! every visual row of squares occupies its own band of `y` values.

use nalgebra::Point2;
use otb_fen_core::BoardError;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Square centers arranged in visual order.
///
/// Row 0 is the top of the image; within a row, columns run left to right.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SquareGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Point2<f32>>,
}

impl SquareGrid {
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Point2<f32>> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.cells[row * self.cols + col])
    }

    pub fn row(&self, row: usize) -> Option<&[Point2<f32>]> {
        self.cells.chunks(self.cols).nth(row)
    }

    /// Iterate `(row, col, center)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Point2<f32>)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, p)| (idx / cols, idx % cols, *p))
    }
}

/// Arrange exactly `rows * cols` points into a [`SquareGrid`].
///
/// Points that share a `y` keep their input order (the sort is stable), so
/// the result is deterministic for a deterministic input order.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(points), fields(n = points.len()))
)]
pub fn order_squares(
    points: &[Point2<f32>],
    rows: usize,
    cols: usize,
) -> Result<SquareGrid, BoardError> {
    if points.is_empty() {
        return Err(BoardError::EmptyInput("square points"));
    }
    let expected = rows * cols;
    if points.len() != expected {
        return Err(BoardError::ShapeMismatch {
            expected,
            got: points.len(),
        });
    }
    if let Some(index) = points
        .iter()
        .position(|p| !p.x.is_finite() || !p.y.is_finite())
    {
        return Err(BoardError::NonFinitePoint { index });
    }
    if let Some((first, second)) = find_coincident(points) {
        return Err(BoardError::CoincidentPoints { first, second });
    }

    let mut cells = points.to_vec();
    cells.sort_by(|a, b| a.y.total_cmp(&b.y));
    for row in cells.chunks_mut(cols) {
        row.sort_by(|a, b| a.x.total_cmp(&b.x));
    }

    Ok(SquareGrid { rows, cols, cells })
}

/// First pair of indices whose points are exactly equal.
pub(crate) fn find_coincident(points: &[Point2<f32>]) -> Option<(usize, usize)> {
    points.iter().enumerate().find_map(|(i, p)| {
        points[i + 1..]
            .iter()
            .position(|q| q == p)
            .map(|offset| (i, i + 1 + offset))
    })
}
