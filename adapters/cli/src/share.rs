#![allow(clippy::missing_errors_doc)]

use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use tilestead_core::{CellCoord, TileKind, GRID_SIZE};

const SHARE_DOMAIN: &str = "tilestead";
const SHARE_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded result payload.
pub(crate) const SHARE_HEADER: &str = "tilestead:v1";
/// Delimiter used to separate the prefix, grid dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Shareable summary of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ShareCode {
    /// Identifier of the puzzle the game was played against.
    pub puzzle_id: String,
    /// Final score over the completed grid.
    pub score: u32,
    /// Placements in turn order.
    pub placements: Vec<SharePlacement>,
}

/// One recorded placement within a share code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct SharePlacement {
    /// Cell the tile was placed on.
    pub cell: CellCoord,
    /// Kind of tile placed.
    pub kind: TileKind,
}

impl ShareCode {
    /// Encodes the result into a single-line string suitable for sharing.
    #[must_use]
    pub(crate) fn encode(&self) -> String {
        let json = serde_json::to_vec(self).expect("share payload serialization never fails");
        let encoded = STANDARD_NO_PAD.encode(json);
        format!("{SHARE_HEADER}:{GRID_SIZE}x{GRID_SIZE}:{encoded}")
    }

    /// Decodes a result from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, ShareCodeError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ShareCodeError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(ShareCodeError::MissingPrefix)?;
        let version = parts.next().ok_or(ShareCodeError::MissingVersion)?;
        let dimensions = parts.next().ok_or(ShareCodeError::MissingDimensions)?;
        let payload = parts.next().ok_or(ShareCodeError::MissingPayload)?;

        if domain != SHARE_DOMAIN {
            return Err(ShareCodeError::InvalidPrefix(domain.to_owned()));
        }
        if version != SHARE_VERSION {
            return Err(ShareCodeError::UnsupportedVersion(version.to_owned()));
        }
        let expected_dimensions = format!("{GRID_SIZE}x{GRID_SIZE}");
        if dimensions != expected_dimensions {
            return Err(ShareCodeError::InvalidDimensions(dimensions.to_owned()));
        }

        let json = STANDARD_NO_PAD
            .decode(payload)
            .map_err(|error| ShareCodeError::InvalidEncoding(error.to_string()))?;
        serde_json::from_slice(&json)
            .map_err(|error| ShareCodeError::InvalidJson(error.to_string()))
    }
}

/// Reasons a share code cannot be decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ShareCodeError {
    EmptyPayload,
    MissingPrefix,
    MissingVersion,
    MissingDimensions,
    MissingPayload,
    InvalidPrefix(String),
    UnsupportedVersion(String),
    InvalidDimensions(String),
    InvalidEncoding(String),
    InvalidJson(String),
}

impl fmt::Display for ShareCodeError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(formatter, "share code is empty"),
            Self::MissingPrefix => write!(formatter, "share code is missing its prefix"),
            Self::MissingVersion => write!(formatter, "share code is missing its version"),
            Self::MissingDimensions => {
                write!(formatter, "share code is missing its grid dimensions")
            }
            Self::MissingPayload => write!(formatter, "share code is missing its payload"),
            Self::InvalidPrefix(found) => {
                write!(formatter, "unexpected share code prefix `{found}`")
            }
            Self::UnsupportedVersion(found) => {
                write!(formatter, "unsupported share code version `{found}`")
            }
            Self::InvalidDimensions(found) => {
                write!(formatter, "unexpected grid dimensions `{found}`")
            }
            Self::InvalidEncoding(detail) => {
                write!(formatter, "share payload is not valid base64: {detail}")
            }
            Self::InvalidJson(detail) => {
                write!(formatter, "share payload is not a valid result: {detail}")
            }
        }
    }
}

impl Error for ShareCodeError {}
