// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for polygon processing

use thiserror::Error;

/// Geometry processing result type
pub type Result<T> = std::result::Result<T, Error>;

/// Geometry processing errors
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    /// Too few points to build the requested shape
    #[error("Insufficient points: expected at least {expected}, got {actual}")]
    InsufficientPoints { expected: usize, actual: usize },

    /// Coordinate that is NaN or infinite
    #[error("Non-finite coordinate at index {index}")]
    NonFinite { index: usize },
}

impl Error {
    /// Create an insufficient points error
    pub fn insufficient_points(expected: usize, actual: usize) -> Self {
        Error::InsufficientPoints { expected, actual }
    }
}
