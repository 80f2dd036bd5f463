// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for structure generation.

use thiserror::Error;

/// Result type alias for structure operations.
pub type Result<T> = std::result::Result<T, StructureError>;

/// Errors that can occur while loading plans or generating structures.
#[derive(Debug, Error)]
pub enum StructureError {
    /// The plan violates a plan-level invariant (no rooms, non-positive sizes).
    #[error("invalid plan: {0}")]
    InvalidPlan(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("geometry error: {0}")]
    Geometry(#[from] plan_lite_geometry::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
