//! JSON files around a board reading: detector output, configuration, the
//! caller-owned square layout cache, and reports.

use nalgebra::Point2;
use otb_fen_board::{
    fen, BoardReaderParams, BoardReading, PieceAssignment, SquareCollision, SquareLayout,
};
use otb_fen_core::{
    BoardError, BoardState, BoundingBox, PieceAnchor, PieceDetection, SquareDetection,
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(thiserror::Error, Debug)]
pub enum FenIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("detection {index} has neither `center` nor `bbox`")]
    MissingGeometry { index: usize },
}

fn read_json<T: for<'de> Deserialize<'de>>(path: impl AsRef<Path>) -> Result<T, FenIoError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn write_json<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<(), FenIoError> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

fn default_confidence() -> f32 {
    1.0
}

/// One detector record as written by an external detector.
///
/// Geometry is either a precomputed `center` or a `bbox`; `center` wins when
/// both are present.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    pub label: String,
    #[serde(default = "default_confidence")]
    pub confidence: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<[f32; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,
}

impl DetectionRecord {
    fn point(&self, index: usize, anchor: PieceAnchor) -> Result<Point2<f32>, FenIoError> {
        match (self.center, self.bbox) {
            (Some([x, y]), _) => Ok(Point2::new(x, y)),
            (None, Some(bbox)) => Ok(bbox.anchor(anchor)),
            (None, None) => Err(FenIoError::MissingGeometry { index }),
        }
    }

    /// Square boxes always use their midpoint.
    pub fn to_square_detection(&self, index: usize) -> Result<SquareDetection, FenIoError> {
        let center = self.point(index, PieceAnchor::Center)?;
        Ok(SquareDetection::new(self.confidence, center, self.label.clone()))
    }

    pub fn to_piece_detection(
        &self,
        index: usize,
        anchor: PieceAnchor,
    ) -> Result<PieceDetection, FenIoError> {
        let center = self.point(index, anchor)?;
        Ok(PieceDetection::new(center, self.label.clone()).with_confidence(self.confidence))
    }
}

/// Load a JSON array of [`DetectionRecord`]s as square detections.
pub fn load_square_detections(
    path: impl AsRef<Path>,
) -> Result<Vec<SquareDetection>, FenIoError> {
    let records: Vec<DetectionRecord> = read_json(path)?;
    records
        .iter()
        .enumerate()
        .map(|(i, r)| r.to_square_detection(i))
        .collect()
}

/// Load a JSON array of [`DetectionRecord`]s as piece detections.
pub fn load_piece_detections(
    path: impl AsRef<Path>,
    anchor: PieceAnchor,
) -> Result<Vec<PieceDetection>, FenIoError> {
    let records: Vec<DetectionRecord> = read_json(path)?;
    records
        .iter()
        .enumerate()
        .map(|(i, r)| r.to_piece_detection(i, anchor))
        .collect()
}

/// Load a cached square layout.
pub fn load_layout(path: impl AsRef<Path>) -> Result<SquareLayout, FenIoError> {
    read_json(path)
}

/// Persist a square layout so later piece readings can reuse it.
pub fn write_layout(layout: &SquareLayout, path: impl AsRef<Path>) -> Result<(), FenIoError> {
    write_json(layout, path)
}

/// Reader configuration plus the input-side choices of this crate.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FenReadConfig {
    #[serde(flatten)]
    pub params: BoardReaderParams,
    /// Which point of a piece box represents the piece.
    #[serde(default)]
    pub piece_anchor: PieceAnchor,
}

impl FenReadConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, FenIoError> {
        read_json(path)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), FenIoError> {
        write_json(self, path)
    }
}

/// JSON report of one reading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FenReport {
    pub fen: String,
    pub placement: String,
    pub board: BoardState,
    pub pieces: Vec<PieceAssignment>,
    #[serde(default)]
    pub collisions: Vec<SquareCollision>,
    #[serde(default)]
    pub layout: Option<SquareLayout>,
}

impl FenReport {
    /// Build a report; `include_layout` embeds the square centers.
    pub fn new(reading: &BoardReading, include_layout: bool) -> Self {
        Self {
            fen: reading.fen.clone(),
            placement: fen::encode_placement(reading.board()),
            board: *reading.board(),
            pieces: reading.assignment.placements.clone(),
            collisions: reading.assignment.collisions.clone(),
            layout: include_layout.then(|| reading.layout.clone()),
        }
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, FenIoError> {
        read_json(path)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), FenIoError> {
        write_json(self, path)
    }
}
