// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Printbed Model - Configuration snapshots and shared types
//!
//! This crate defines the values that flow into the build volume
//! computation. It owns no geometry and no algorithms; everything here is
//! plain data that the settings store fills in and the `printbed-volume`
//! crate consumes.
//!
//! # Overview
//!
//! - [`MachineConfiguration`] - complete snapshot of geometry-affecting settings
//! - [`ExtruderSettings`] - read-only view of one extruder
//! - [`SettingsSource`] - collaborator trait producing snapshots
//! - [`setting_keys`] - which setting changes require a rebuild
//!
//! # Example
//!
//! ```ignore
//! use printbed_model::MachineConfiguration;
//!
//! let config = MachineConfiguration::from_json_file("ultimaker3.json")?;
//! for extruder in config.resolved_used_extruders()? {
//!     println!("{} offset {:?}", extruder.position, extruder.scene_nozzle_offset());
//! }
//! ```

pub mod error;
pub mod setting_keys;
pub mod settings;
pub mod traits;
pub mod types;

// Re-export all public types
pub use error::*;
pub use settings::*;
pub use traits::*;
pub use types::*;
