// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for build volume computation

use printbed_model::ConfigError;
use thiserror::Error;

/// Build volume result type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a rebuild
///
/// Recoverable conflicts such as a colliding prime tower are not errors;
/// they are reported through the computed areas instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration does not match what the computation understands
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Malformed polygon in the configuration
    #[error("Geometry error: {0}")]
    Geometry(#[from] printbed_geometry::Error),
}

impl Error {
    /// Whether the error signals a schema mismatch in the adhesion settings
    pub fn is_unknown_adhesion(&self) -> bool {
        matches!(self, Error::Config(ConfigError::UnknownAdhesionType(_)))
    }
}
