// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Catalogue of setting keys that shape the build volume
//!
//! The settings store notifies per changed key. Only changes to the keys
//! listed here require the build volume to be rebuilt.

/// Machine dimensions and origin
pub const MACHINE_SETTINGS: &[&str] = &[
    "machine_width",
    "machine_depth",
    "machine_height",
    "machine_shape",
    "machine_center_is_zero",
];

/// Bed adhesion footprint around objects
pub const SKIRT_SETTINGS: &[&str] = &[
    "adhesion_type",
    "skirt_gap",
    "skirt_line_count",
    "skirt_brim_line_width",
    "brim_width",
    "brim_line_count",
    "raft_margin",
    "draft_shield_enabled",
    "draft_shield_dist",
    "initial_layer_line_width_factor",
];

/// Raft layer stack
pub const RAFT_SETTINGS: &[&str] = &[
    "adhesion_type",
    "raft_base_thickness",
    "raft_interface_thickness",
    "raft_surface_layers",
    "raft_surface_thickness",
    "raft_airgap",
    "layer_0_z_overlap",
];

/// Vertical clearance for travel hops
pub const EXTRA_Z_SETTINGS: &[&str] = &["retraction_hop_enabled", "retraction_hop"];

/// Prime blob placement
pub const PRIME_SETTINGS: &[&str] = &[
    "extruder_prime_pos_x",
    "extruder_prime_pos_y",
    "extruder_prime_pos_z",
    "prime_blob_enable",
];

/// Prime tower placement
pub const TOWER_SETTINGS: &[&str] = &[
    "prime_tower_enable",
    "prime_tower_circular",
    "prime_tower_size",
    "prime_tower_position_x",
    "prime_tower_position_y",
];

pub const OOZE_SHIELD_SETTINGS: &[&str] = &["ooze_shield_enabled", "ooze_shield_dist"];

/// Travel and support distances feeding the edge clearance
pub const DISTANCE_SETTINGS: &[&str] = &[
    "infill_wipe_dist",
    "travel_avoid_distance",
    "support_offset",
    "support_enable",
    "travel_avoid_other_parts",
    "travel_avoid_supports",
];

/// Settings that change which extruders are used
pub const EXTRUDER_SETTINGS: &[&str] = &[
    "support_enable",
    "support_bottom_enable",
    "support_roof_enable",
    "support_infill_extruder_nr",
    "support_extruder_nr_layer_0",
    "support_bottom_extruder_nr",
    "support_roof_extruder_nr",
    "brim_line_count",
    "adhesion_extruder_nr",
    "adhesion_type",
];

/// Per-feature extruder selections
pub const LIMIT_TO_EXTRUDER_SETTINGS: &[&str] = &[
    "wall_extruder_nr",
    "wall_0_extruder_nr",
    "wall_x_extruder_nr",
    "top_bottom_extruder_nr",
    "infill_extruder_nr",
    "support_infill_extruder_nr",
    "support_extruder_nr_layer_0",
    "support_bottom_extruder_nr",
    "support_roof_extruder_nr",
    "adhesion_extruder_nr",
];

/// Per-extruder geometry that is not covered by the lists above
pub const NOZZLE_SETTINGS: &[&str] = &[
    "machine_nozzle_offset_x",
    "machine_nozzle_offset_y",
    "machine_disallowed_areas",
    "nozzle_disallowed_areas",
    "print_sequence",
    "extruder_enabled",
];

const ALL_GROUPS: &[&[&str]] = &[
    MACHINE_SETTINGS,
    SKIRT_SETTINGS,
    RAFT_SETTINGS,
    EXTRA_Z_SETTINGS,
    PRIME_SETTINGS,
    TOWER_SETTINGS,
    OOZE_SHIELD_SETTINGS,
    DISTANCE_SETTINGS,
    EXTRUDER_SETTINGS,
    LIMIT_TO_EXTRUDER_SETTINGS,
    NOZZLE_SETTINGS,
];

/// Whether a change to `key` requires a build volume rebuild
pub fn affects_build_volume(key: &str) -> bool {
    ALL_GROUPS.iter().any(|group| group.contains(&key))
}

/// Whether any of the changed keys requires a rebuild
pub fn any_affects_build_volume<'a>(keys: impl IntoIterator<Item = &'a str>) -> bool {
    keys.into_iter().any(affects_build_volume)
}
