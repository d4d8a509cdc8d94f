//! Detector outputs, in image pixel space (origin top-left, y down).

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Axis-aligned detector box `[x1, y1, x2, y2]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Box midpoint.
    pub fn center(&self) -> Point2<f32> {
        Point2::new(0.5 * (self.x1 + self.x2), 0.5 * (self.y1 + self.y2))
    }

    /// Horizontal center, a quarter of the box height above the bottom edge.
    ///
    /// Tall pieces are seen from an angle, so their box midpoint drifts
    /// towards the square behind them; the lower part of the box stays on
    /// the square the piece actually stands on.
    pub fn base_anchor(&self) -> Point2<f32> {
        Point2::new(0.5 * (self.x1 + self.x2), self.y2 - 0.25 * self.height())
    }

    pub fn anchor(&self, anchor: PieceAnchor) -> Point2<f32> {
        match anchor {
            PieceAnchor::Center => self.center(),
            PieceAnchor::Base => self.base_anchor(),
        }
    }
}

impl From<[f32; 4]> for BoundingBox {
    fn from([x1, y1, x2, y2]: [f32; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl From<BoundingBox> for [f32; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

/// Which point of a piece box stands in for the piece position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceAnchor {
    #[default]
    Center,
    Base,
}

/// One candidate board square reported by the square detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SquareDetection {
    /// Detector confidence in `[0, 1]`.
    pub confidence: f32,
    pub center: Point2<f32>,
    /// Detector class name, normally `"square"`.
    pub label: String,
}

impl SquareDetection {
    pub fn new(confidence: f32, center: Point2<f32>, label: impl Into<String>) -> Self {
        Self {
            confidence,
            center,
            label: label.into(),
        }
    }

    pub fn from_bbox(confidence: f32, bbox: BoundingBox, label: impl Into<String>) -> Self {
        Self::new(confidence, bbox.center(), label)
    }
}

/// One piece reported by the piece detector.
///
/// `label` stays a raw class name until assignment, so an unrecognised class
/// surfaces as [`crate::BoardError::UnknownPieceType`] instead of being dropped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PieceDetection {
    pub center: Point2<f32>,
    pub label: String,
    #[serde(default = "full_confidence")]
    pub confidence: f32,
}

fn full_confidence() -> f32 {
    1.0
}

impl PieceDetection {
    pub fn new(center: Point2<f32>, label: impl Into<String>) -> Self {
        Self {
            center,
            label: label.into(),
            confidence: 1.0,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn from_bbox(
        bbox: BoundingBox,
        label: impl Into<String>,
        confidence: f32,
        anchor: PieceAnchor,
    ) -> Self {
        Self {
            center: bbox.anchor(anchor),
            label: label.into(),
            confidence,
        }
    }
}
