// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the viewer.

use plan_lite_structure::StructureError;
use thiserror::Error;

/// Result type alias for viewer operations.
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Errors surfaced by viewer entry points.
///
/// Rejected placements and moves are not errors: those return `false` or
/// `None` from the corresponding call.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// The viewer was disposed; the call had no effect.
    #[error("viewer has been disposed")]
    Disposed,

    #[error("structure error: {0}")]
    Structure(#[from] StructureError),

    #[error("asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown furniture type: {0}")]
    UnknownFurnitureType(String),
}

/// Failure to fetch or decode a mesh asset.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(String),

    #[error("failed to decode asset {key}: {message}")]
    Decode { key: String, message: String },
}
