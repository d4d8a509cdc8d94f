//! Detector-side filtering that happens before any geometry.

use log::{debug, warn};
use nalgebra::Point2;
use otb_fen_core::{BoardError, PieceDetection, SquareDetection};
use serde::{Deserialize, Serialize};

/// What to do when the square detector reports a count other than 64.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SquareSelection {
    /// Require exactly the expected number of detections.
    #[default]
    Exact,
    /// With too many detections, keep the most confident ones.
    ///
    /// Too few detections are still a [`BoardError::ShapeMismatch`].
    TopKByConfidence,
}

fn default_square_class() -> Option<String> {
    Some("square".to_string())
}

/// Square detection filtering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SquareSelectionParams {
    /// Keep only detections with this class label. `None` keeps every label.
    #[serde(default = "default_square_class")]
    pub target_class: Option<String>,
    /// Detections below this confidence are discarded.
    #[serde(default)]
    pub min_confidence: f32,
    #[serde(default)]
    pub policy: SquareSelection,
}

impl Default for SquareSelectionParams {
    fn default() -> Self {
        Self {
            target_class: default_square_class(),
            min_confidence: 0.0,
            policy: SquareSelection::Exact,
        }
    }
}

fn default_piece_confidence() -> f32 {
    0.5
}

/// Piece detection filtering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PieceSelectionParams {
    /// Pieces must score strictly above this confidence.
    #[serde(default = "default_piece_confidence")]
    pub min_confidence: f32,
}

impl Default for PieceSelectionParams {
    fn default() -> Self {
        Self {
            min_confidence: default_piece_confidence(),
        }
    }
}

/// Reduce raw square detections to exactly `expected` centers.
///
/// The returned centers keep detection order (confidence order under
/// [`SquareSelection::TopKByConfidence`]).
pub fn select_square_centers(
    detections: &[SquareDetection],
    expected: usize,
    params: &SquareSelectionParams,
) -> Result<Vec<Point2<f32>>, BoardError> {
    if detections.is_empty() {
        return Err(BoardError::EmptyInput("square detections"));
    }

    let mut kept: Vec<&SquareDetection> = detections
        .iter()
        .filter(|d| {
            params
                .target_class
                .as_deref()
                .is_none_or(|class| d.label == class)
        })
        .filter(|d| d.confidence >= params.min_confidence)
        .collect();
    debug!(
        "kept {} of {} square detections after class/confidence filter",
        kept.len(),
        detections.len()
    );

    if kept.len() > expected && params.policy == SquareSelection::TopKByConfidence {
        warn!(
            "{} square detections for {} squares, keeping the {} most confident",
            kept.len(),
            expected,
            expected
        );
        kept.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        kept.truncate(expected);
    }

    if kept.len() != expected {
        return Err(BoardError::ShapeMismatch {
            expected,
            got: kept.len(),
        });
    }

    Ok(kept.into_iter().map(|d| d.center).collect())
}

/// Drop pieces at or below the confidence threshold, preserving order.
pub fn select_pieces(pieces: &[PieceDetection], params: &PieceSelectionParams) -> Vec<PieceDetection> {
    let kept: Vec<PieceDetection> = pieces
        .iter()
        .filter(|p| p.confidence > params.min_confidence)
        .cloned()
        .collect();
    debug!(
        "kept {} of {} piece detections above confidence {}",
        kept.len(),
        pieces.len(),
        params.min_confidence
    );
    kept
}
