// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core identifiers and enumerations shared by the build volume crates

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe extruder identifier
///
/// Wraps the extruder position on the machine (tool number), so the first
/// extruder is `ExtruderId(0)` and is displayed as `T0`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize, Default)]
pub struct ExtruderId(pub u32);

impl fmt::Display for ExtruderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

impl From<u32> for ExtruderId {
    fn from(position: u32) -> Self {
        ExtruderId(position)
    }
}

impl From<ExtruderId> for u32 {
    fn from(id: ExtruderId) -> Self {
        id.0
    }
}

/// Type-safe scene node identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize, Default)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

/// Bed adhesion strategy
///
/// Parsed from the `adhesion_type` setting. Values outside this set are a
/// schema mismatch and are rejected by [`FromStr`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum AdhesionType {
    Skirt,
    Brim,
    Raft,
    None,
}

impl AdhesionType {
    /// Setting value as stored in the configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            AdhesionType::Skirt => "skirt",
            AdhesionType::Brim => "brim",
            AdhesionType::Raft => "raft",
            AdhesionType::None => "none",
        }
    }
}

impl FromStr for AdhesionType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skirt" => Ok(AdhesionType::Skirt),
            "brim" => Ok(AdhesionType::Brim),
            "raft" => Ok(AdhesionType::Raft),
            "none" => Ok(AdhesionType::None),
            other => Err(ConfigError::UnknownAdhesionType(other.to_string())),
        }
    }
}

impl fmt::Display for AdhesionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order in which objects are printed
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PrintSequence {
    /// All objects layer by layer
    AllAtOnce,
    /// Each object completed before the next one starts
    OneAtATime,
}

impl FromStr for PrintSequence {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all_at_once" => Ok(PrintSequence::AllAtOnce),
            "one_at_a_time" => Ok(PrintSequence::OneAtATime),
            other => Err(ConfigError::UnknownPrintSequence(other.to_string())),
        }
    }
}

/// Outline of the build plate
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BedShapeKind {
    Rectangular,
    Elliptic,
}

impl FromStr for BedShapeKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rectangular" => Ok(BedShapeKind::Rectangular),
            "elliptic" => Ok(BedShapeKind::Elliptic),
            other => Err(ConfigError::UnknownBedShape(other.to_string())),
        }
    }
}
