// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for configuration handling

use crate::ExtruderId;
use thiserror::Error;

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while reading or interpreting a machine configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Adhesion type outside the known enumeration
    #[error("Unknown bed adhesion type '{0}': not supported by the build volume calculation")]
    UnknownAdhesionType(String),

    /// Print sequence outside the known enumeration
    #[error("Unknown print sequence '{0}'")]
    UnknownPrintSequence(String),

    /// Bed shape outside the known enumeration
    #[error("Unknown machine shape '{0}'")]
    UnknownBedShape(String),

    /// Extruder referenced but not present in the snapshot
    #[error("Extruder {0} is not defined on this machine")]
    MissingExtruder(ExtruderId),

    /// Malformed JSON configuration
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Create a missing extruder error
    pub fn missing_extruder(id: ExtruderId) -> Self {
        ConfigError::MissingExtruder(id)
    }
}
