// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building curves and loops
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid loop: {0}")]
    InvalidLoop(String),

    #[error("Degenerate curve: length {0} is below tolerance")]
    DegenerateCurve(f64),
}
