// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Machine configuration snapshot
//!
//! A [`MachineConfiguration`] is a plain value holding every setting that
//! affects the build volume. It is produced by the settings store (see
//! [`SettingsSource`](crate::SettingsSource)) and handed to the computation
//! by value, so a rebuild never reads live global state.
//!
//! Coordinates of raw areas are `[x, y]` pairs in scene space with the origin
//! at the centre of the bed, matching how machine definitions declare
//! `machine_disallowed_areas`.

use crate::{AdhesionType, BedShapeKind, ConfigError, ExtruderId, PrintSequence, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Raw polygon as declared in a machine definition
pub type RawArea = Vec<[f64; 2]>;

/// Physical machine geometry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineGeometry {
    /// Bed width along X (mm)
    pub width: f64,
    /// Bed depth along the scene Z / g-code Y axis (mm)
    pub depth: f64,
    /// Maximum print height (mm)
    pub height: f64,
    /// `"rectangular"` or `"elliptic"`
    pub shape: String,
    /// Whether g-code coordinates have their origin at the bed centre
    pub center_is_zero: bool,
    /// Areas where no extruder may print, declared by the machine definition
    pub disallowed_areas: Vec<RawArea>,
    /// Widen the border by the reach of the other extruders' nozzle offsets
    pub nozzle_offsetting_for_disallowed_areas: bool,
}

impl Default for MachineGeometry {
    fn default() -> Self {
        Self {
            width: 200.0,
            depth: 200.0,
            height: 200.0,
            shape: "rectangular".to_string(),
            center_is_zero: false,
            disallowed_areas: Vec::new(),
            nozzle_offsetting_for_disallowed_areas: true,
        }
    }
}

impl MachineGeometry {
    /// Parse the bed shape
    pub fn shape_kind(&self) -> Result<BedShapeKind> {
        self.shape.parse()
    }

    /// Whether any dimension is still unset
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.depth <= 0.0 || self.height <= 0.0
    }
}

/// Prime tower placement
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimeTowerSettings {
    pub enable: bool,
    pub circular: bool,
    /// Edge length (square) or diameter (circular)
    pub size: f64,
    /// Position of the tower's back-right corner in g-code coordinates
    pub position_x: f64,
    pub position_y: f64,
}

impl Default for PrimeTowerSettings {
    fn default() -> Self {
        Self {
            enable: false,
            circular: true,
            size: 20.0,
            position_x: 180.0,
            position_y: 180.0,
        }
    }
}

/// Settings resolved on the global stack
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    /// `"all_at_once"` or `"one_at_a_time"`
    pub print_sequence: String,
    /// `"skirt"`, `"brim"`, `"raft"` or `"none"`
    pub adhesion_type: String,

    pub skirt_gap: f64,
    pub skirt_line_count: u32,
    pub skirt_brim_line_width: f64,
    /// Percentage applied to first layer line widths
    pub initial_layer_line_width_factor: f64,
    pub brim_line_count: u32,

    pub raft_margin: f64,
    pub raft_base_thickness: f64,
    pub raft_interface_thickness: f64,
    pub raft_surface_layers: u32,
    pub raft_surface_thickness: f64,
    pub raft_airgap: f64,
    pub layer_0_z_overlap: f64,

    pub support_enable: bool,
    /// Support horizontal expansion
    pub support_offset: f64,

    pub draft_shield_enabled: bool,
    pub draft_shield_dist: f64,
    pub ooze_shield_enabled: bool,
    pub ooze_shield_dist: f64,

    pub travel_avoid_other_parts: bool,
    pub travel_avoid_distance: f64,
    pub infill_wipe_dist: f64,

    pub retraction_hop_enabled: bool,
    pub retraction_hop: f64,

    pub prime_tower: PrimeTowerSettings,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            print_sequence: "all_at_once".to_string(),
            adhesion_type: "brim".to_string(),
            skirt_gap: 3.0,
            skirt_line_count: 1,
            skirt_brim_line_width: 0.4,
            initial_layer_line_width_factor: 100.0,
            brim_line_count: 20,
            raft_margin: 15.0,
            raft_base_thickness: 0.36,
            raft_interface_thickness: 0.15,
            raft_surface_layers: 2,
            raft_surface_thickness: 0.1,
            raft_airgap: 0.3,
            layer_0_z_overlap: 0.15,
            support_enable: false,
            support_offset: 0.2,
            draft_shield_enabled: false,
            draft_shield_dist: 10.0,
            ooze_shield_enabled: false,
            ooze_shield_dist: 2.0,
            travel_avoid_other_parts: true,
            travel_avoid_distance: 0.625,
            infill_wipe_dist: 0.04,
            retraction_hop_enabled: false,
            retraction_hop: 1.0,
            prime_tower: PrimeTowerSettings::default(),
        }
    }
}

impl GlobalSettings {
    /// Parse the adhesion type, rejecting unknown values
    pub fn adhesion(&self) -> Result<AdhesionType> {
        self.adhesion_type.parse()
    }

    /// Parse the print sequence
    pub fn sequence(&self) -> Result<PrintSequence> {
        self.print_sequence.parse()
    }

    /// Pseudo extruder used when the machine has no extruder stacks
    ///
    /// It sits at the nozzle origin, never primes and reads its per-extruder
    /// values from the global stack.
    pub fn as_extruder(&self) -> ExtruderSettings {
        ExtruderSettings {
            position: ExtruderId(0),
            enabled: true,
            skirt_brim_line_width: self.skirt_brim_line_width,
            initial_layer_line_width_factor: self.initial_layer_line_width_factor,
            travel_avoid_other_parts: self.travel_avoid_other_parts,
            travel_avoid_distance: self.travel_avoid_distance,
            infill_wipe_dist: self.infill_wipe_dist,
            retraction_hop_enabled: self.retraction_hop_enabled,
            retraction_hop: self.retraction_hop,
            ..ExtruderSettings::default()
        }
    }
}

/// Read-only view of one extruder
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtruderSettings {
    pub position: ExtruderId,
    pub enabled: bool,

    /// Nozzle offset in g-code coordinates
    pub nozzle_offset_x: f64,
    pub nozzle_offset_y: f64,

    /// Prime blob position in g-code coordinates; `(0, 0)` means unset
    pub prime_pos_x: f64,
    pub prime_pos_y: f64,
    pub prime_blob_enable: bool,

    /// Areas this nozzle must never reach, bed-centred scene coordinates
    pub nozzle_disallowed_areas: Vec<RawArea>,

    pub skirt_brim_line_width: f64,
    pub initial_layer_line_width_factor: f64,
    pub travel_avoid_other_parts: bool,
    pub travel_avoid_distance: f64,
    pub infill_wipe_dist: f64,
    pub retraction_hop_enabled: bool,
    pub retraction_hop: f64,
}

impl Default for ExtruderSettings {
    fn default() -> Self {
        Self {
            position: ExtruderId(0),
            enabled: true,
            nozzle_offset_x: 0.0,
            nozzle_offset_y: 0.0,
            prime_pos_x: 0.0,
            prime_pos_y: 0.0,
            prime_blob_enable: false,
            nozzle_disallowed_areas: Vec::new(),
            skirt_brim_line_width: 0.4,
            initial_layer_line_width_factor: 100.0,
            travel_avoid_other_parts: true,
            travel_avoid_distance: 0.625,
            infill_wipe_dist: 0.04,
            retraction_hop_enabled: false,
            retraction_hop: 1.0,
        }
    }
}

impl ExtruderSettings {
    /// Create an extruder at the given position with default settings
    pub fn new(position: impl Into<ExtruderId>) -> Self {
        Self {
            position: position.into(),
            ..Self::default()
        }
    }

    /// Nozzle offset converted to scene space
    ///
    /// The g-code Y axis points the opposite way of the scene depth axis.
    pub fn scene_nozzle_offset(&self) -> [f64; 2] {
        [self.nozzle_offset_x, -self.nozzle_offset_y]
    }

    /// First layer skirt/brim line width in mm
    pub fn initial_line_width(&self) -> f64 {
        self.skirt_brim_line_width * self.initial_layer_line_width_factor / 100.0
    }
}

/// Complete snapshot of everything that shapes the build volume
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfiguration {
    pub machine: MachineGeometry,
    pub settings: GlobalSettings,
    /// All extruders of the machine, enabled or not
    pub extruders: Vec<ExtruderSettings>,
    /// Extruders used by the current scene
    pub used_extruders: Vec<ExtruderId>,
    /// Extruder selected in the UI
    pub active_extruder: Option<ExtruderId>,
}

impl MachineConfiguration {
    /// Parse a configuration from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Serialize the snapshot to pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up an extruder by position
    pub fn extruder(&self, id: ExtruderId) -> Option<&ExtruderSettings> {
        self.extruders.iter().find(|e| e.position == id)
    }

    /// Whether the extruder at `id` is enabled
    ///
    /// Returns `None` when the machine has no such extruder. A machine
    /// without extruder stacks prints everything with its global pseudo
    /// extruder, which is always enabled.
    pub fn is_extruder_enabled(&self, id: ExtruderId) -> Option<bool> {
        if self.extruders.is_empty() {
            return Some(id == ExtruderId(0));
        }
        self.extruder(id).map(|e| e.enabled)
    }

    /// Extruders that take part in the print
    ///
    /// Falls back to the active extruder when the scene uses none, and to the
    /// global pseudo extruder when there is no active extruder either.
    pub fn resolved_used_extruders(&self) -> Result<Vec<ExtruderSettings>> {
        if !self.used_extruders.is_empty() {
            return self
                .used_extruders
                .iter()
                .map(|id| {
                    self.extruder(*id)
                        .cloned()
                        .ok_or_else(|| ConfigError::missing_extruder(*id))
                })
                .collect();
        }

        if let Some(active) = self.active_extruder.and_then(|id| self.extruder(id)) {
            return Ok(vec![active.clone()]);
        }

        Ok(vec![self.settings.as_extruder()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config = MachineConfiguration::from_json_str("{}").unwrap();
        assert_eq!(config.machine.width, 200.0);
        assert_eq!(config.settings.adhesion_type, "brim");
        assert!(config.extruders.is_empty());
        assert!(config.machine.nozzle_offsetting_for_disallowed_areas);
    }

    #[test]
    fn test_partial_json_overrides() {
        let json = r#"{
            "machine": { "width": 300, "shape": "elliptic" },
            "extruders": [ { "position": 1, "nozzle_offset_y": 2.5 } ],
            "used_extruders": [1]
        }"#;
        let config = MachineConfiguration::from_json_str(json).unwrap();
        assert_eq!(config.machine.width, 300.0);
        assert_eq!(config.machine.depth, 200.0);
        assert_eq!(config.machine.shape_kind().unwrap(), BedShapeKind::Elliptic);

        let used = config.resolved_used_extruders().unwrap();
        assert_eq!(used.len(), 1);
        assert_eq!(used[0].position, ExtruderId(1));
        assert_eq!(used[0].scene_nozzle_offset(), [0.0, -2.5]);
    }

    #[test]
    fn test_used_extruders_fall_back_to_active() {
        let config = MachineConfiguration {
            extruders: vec![ExtruderSettings::new(0), ExtruderSettings::new(1)],
            active_extruder: Some(ExtruderId(1)),
            ..Default::default()
        };
        let used = config.resolved_used_extruders().unwrap();
        assert_eq!(used.len(), 1);
        assert_eq!(used[0].position, ExtruderId(1));
    }

    #[test]
    fn test_used_extruders_fall_back_to_global() {
        let mut config = MachineConfiguration::default();
        config.settings.retraction_hop = 0.8;
        let used = config.resolved_used_extruders().unwrap();
        assert_eq!(used.len(), 1);
        assert_eq!(used[0].retraction_hop, 0.8);
        assert!(!used[0].prime_blob_enable);
    }

    #[test]
    fn test_missing_used_extruder_is_an_error() {
        let config = MachineConfiguration {
            extruders: vec![ExtruderSettings::new(0)],
            used_extruders: vec![ExtruderId(4)],
            ..Default::default()
        };
        let err = config.resolved_used_extruders().unwrap_err();
        assert!(matches!(err, ConfigError::MissingExtruder(ExtruderId(4))));
    }

    #[test]
    fn test_extruder_enabled_lookup() {
        let mut disabled = ExtruderSettings::new(1);
        disabled.enabled = false;
        let config = MachineConfiguration {
            extruders: vec![ExtruderSettings::new(0), disabled],
            ..Default::default()
        };
        assert_eq!(config.is_extruder_enabled(ExtruderId(0)), Some(true));
        assert_eq!(config.is_extruder_enabled(ExtruderId(1)), Some(false));
        assert_eq!(config.is_extruder_enabled(ExtruderId(2)), None);
    }

    #[test]
    fn test_json_round_trip_keeps_areas() {
        let mut config = MachineConfiguration::default();
        config
            .machine
            .disallowed_areas
            .push(vec![[-10.0, -10.0], [10.0, -10.0], [10.0, 10.0]]);
        let json = config.to_json_string().unwrap();
        let back = MachineConfiguration::from_json_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = MachineConfiguration::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
