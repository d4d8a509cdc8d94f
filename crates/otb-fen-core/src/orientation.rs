use crate::BoardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which side of the image the white pieces start on.
///
/// Orientation is always supplied by the caller; nothing in the pipeline
/// tries to infer it from image content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardOrientation {
    /// White sits on the right of the frame. Both board axes are reversed
    /// relative to the raw grid indices.
    #[default]
    #[serde(alias = "right_w")]
    RightWhite,
    /// White sits on the left of the frame. Grid indices map to files and
    /// ranks directly.
    #[serde(alias = "left_w")]
    LeftWhite,
}

impl fmt::Display for BoardOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BoardOrientation::RightWhite => "right_white",
            BoardOrientation::LeftWhite => "left_white",
        })
    }
}

impl FromStr for BoardOrientation {
    type Err = BoardError;

    /// Accepts `right_white`, `right-white`, `RightWhite`, `right_w` and the
    /// same spellings for the left side.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "rightwhite" | "rightw" => Ok(BoardOrientation::RightWhite),
            "leftwhite" | "leftw" => Ok(BoardOrientation::LeftWhite),
            _ => Err(BoardError::UnsupportedOrientation(s.to_string())),
        }
    }
}
