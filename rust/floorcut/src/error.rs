// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for decomposition runs.

/// Result type alias for decomposition operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decomposing a floor outline.
///
/// Malformed-but-closed geometry is not an error: it degrades to an empty
/// decomposition. These variants cover inputs that cannot form a polygon at
/// all and failures reported by an injected geometry kernel.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Curve or loop construction failed.
    #[error("geometry error: {0}")]
    Geometry(#[from] floorcut_geometry::Error),

    /// A polygon needs at least one curve.
    #[error("polygon must have at least one curve")]
    EmptyPolygon,

    /// The injected geometry kernel reported a failure.
    #[error("geometry kernel failure: {0}")]
    Kernel(String),

    /// A configuration value is out of range.
    #[error("invalid cutter configuration: {0}")]
    InvalidConfig(String),

    /// Result export failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
