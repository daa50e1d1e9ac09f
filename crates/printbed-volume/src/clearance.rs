// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Edge clearance calculation
//!
//! The edge clearance is the width of the band along the bed edge that is
//! consumed by adhesion, shields around support and travel moves.

use crate::Result;
use log::debug;
use printbed_model::{
    AdhesionType, ExtruderSettings, GlobalSettings, MachineConfiguration, PrintSequence,
};

/// Clearance used when objects are printed one at a time
///
/// Per-object margins are handled by the object hulls in that mode; this
/// only keeps a visible border along the edge.
pub const ONE_AT_A_TIME_CLEARANCE: f64 = 0.1;

/// Components of the edge clearance
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeClearance {
    /// Skirt, brim or raft footprint around the objects
    pub bed_adhesion: f64,
    /// Support horizontal expansion
    pub support_expansion: f64,
    /// Largest enabled shield distance
    pub farthest_shield: f64,
    /// Largest distance travel moves keep from printed parts
    pub move_from_wall: f64,
}

impl EdgeClearance {
    /// Break down the clearance for a configuration
    ///
    /// # Arguments
    /// * `config` - Machine configuration snapshot
    /// * `used` - Extruders taking part in the print
    pub fn compute(config: &MachineConfiguration, used: &[ExtruderSettings]) -> Result<Self> {
        let settings = &config.settings;
        Ok(Self {
            bed_adhesion: bed_adhesion_size(settings, used)?,
            support_expansion: support_expansion(settings),
            farthest_shield: farthest_shield_distance(settings),
            move_from_wall: move_from_wall_radius(config, used),
        })
    }

    /// Combined border size
    ///
    /// Adhesion and shields both surround support, so support expansion is
    /// added to each. The widest constraint wins.
    pub fn size(&self) -> f64 {
        self.move_from_wall
            .max(self.support_expansion + self.farthest_shield)
            .max(self.support_expansion + self.bed_adhesion)
    }
}

/// Width of the disallowed band along the bed edge, in mm
///
/// Returns 0 for a machine without extruders and
/// [`ONE_AT_A_TIME_CLEARANCE`] when printing one object at a time. An
/// adhesion type outside the known set is an error.
///
/// # Example
///
/// ```ignore
/// let border = edge_clearance(&config)?;
/// let computer = DisallowedAreaComputer::new(&config, border);
/// ```
pub fn edge_clearance(config: &MachineConfiguration) -> Result<f64> {
    if config.extruders.is_empty() {
        return Ok(0.0);
    }

    if config.settings.sequence()? == PrintSequence::OneAtATime {
        return Ok(ONE_AT_A_TIME_CLEARANCE);
    }

    let used = config.resolved_used_extruders()?;
    let clearance = EdgeClearance::compute(config, &used)?;
    let size = clearance.size();
    debug!(
        "edge clearance {:.3} mm (adhesion {:.3}, support {:.3}, shield {:.3}, travel {:.3})",
        size,
        clearance.bed_adhesion,
        clearance.support_expansion,
        clearance.farthest_shield,
        clearance.move_from_wall
    );
    Ok(size)
}

/// Footprint of the adhesion type around the objects
///
/// Skirt and brim get one extra line per used extruder, except for the
/// extruder that prints the skirt or brim itself.
pub fn bed_adhesion_size(settings: &GlobalSettings, used: &[ExtruderSettings]) -> Result<f64> {
    let line_width =
        settings.skirt_brim_line_width * settings.initial_layer_line_width_factor / 100.0;
    let extra_lines: f64 = used.iter().map(|e| e.initial_line_width()).sum::<f64>() - line_width;

    let size = match settings.adhesion()? {
        AdhesionType::Skirt => {
            settings.skirt_gap + line_width * settings.skirt_line_count as f64 + extra_lines
        }
        AdhesionType::Brim => line_width * settings.brim_line_count as f64 + extra_lines,
        AdhesionType::Raft => settings.raft_margin,
        AdhesionType::None => 0.0,
    };
    Ok(size)
}

/// Support horizontal expansion, 0 unless support is enabled
pub fn support_expansion(settings: &GlobalSettings) -> f64 {
    if settings.support_enable && settings.support_offset != 0.0 {
        settings.support_offset
    } else {
        0.0
    }
}

/// Largest distance of an enabled draft or ooze shield
pub fn farthest_shield_distance(settings: &GlobalSettings) -> f64 {
    let mut distance: f64 = 0.0;
    if settings.draft_shield_enabled {
        distance = distance.max(settings.draft_shield_dist);
    }
    if settings.ooze_shield_enabled {
        distance = distance.max(settings.ooze_shield_dist);
    }
    distance
}

/// Distance travel moves starting at an outer wall can reach
///
/// The infill wipe distance is taken over every machine extruder, the
/// travel avoid distance only over used extruders that avoid printed parts.
pub fn move_from_wall_radius(config: &MachineConfiguration, used: &[ExtruderSettings]) -> f64 {
    let wipe = if config.extruders.is_empty() {
        config.settings.infill_wipe_dist
    } else {
        config
            .extruders
            .iter()
            .map(|e| e.infill_wipe_dist)
            .fold(f64::NEG_INFINITY, f64::max)
    };

    used.iter()
        .filter(|e| e.travel_avoid_other_parts)
        .map(|e| e.travel_avoid_distance)
        .fold(wipe.max(0.0), f64::max)
}
