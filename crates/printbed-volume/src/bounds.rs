// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Printable envelope of the machine
//!
//! Scene space is y-up: x runs along the bed width, z along the bed depth.
//! Disallowed polygons store their depth coordinate as `y`.

use crate::Result;
use nalgebra::{Point3, Vector3};
use printbed_geometry::{Aabb, Polygon};
use printbed_model::{AdhesionType, GlobalSettings, MachineConfiguration, MachineGeometry};

/// Distance the volume reaches below the bed, absorbing contact noise
pub const BED_CONTACT_MARGIN: f64 = 1.0;

/// Vertical space taken by the raft, 0 unless adhesion is raft
pub fn raft_thickness(settings: &GlobalSettings) -> Result<f64> {
    if settings.adhesion()? != AdhesionType::Raft {
        return Ok(0.0);
    }
    Ok(settings.raft_base_thickness
        + settings.raft_interface_thickness
        + settings.raft_surface_layers as f64 * settings.raft_surface_thickness
        + settings.raft_airgap
        - settings.layer_0_z_overlap)
}

/// Head room needed for retraction hops
///
/// The largest hop of any extruder with hopping enabled. Machines without
/// extruder stacks use the global value.
pub fn extra_z_clearance(config: &MachineConfiguration) -> f64 {
    if config.extruders.is_empty() {
        let settings = &config.settings;
        return if settings.retraction_hop_enabled {
            settings.retraction_hop
        } else {
            0.0
        };
    }

    config
        .extruders
        .iter()
        .filter(|e| e.retraction_hop_enabled)
        .map(|e| e.retraction_hop)
        .fold(0.0, f64::max)
}

/// Depth of the largest disallowed area lying entirely at the front half
///
/// Areas reaching behind the bed centre are skipped, which keeps the full
/// width skirt strips out of the measurement.
pub fn disallowed_area_depth(areas: &[Polygon]) -> f64 {
    areas
        .iter()
        .map(|area| area.bounding_rect())
        .filter(|rect| rect.min.y >= 0.0)
        .map(|rect| rect.height().abs())
        .fold(0.0, f64::max)
}

/// Build volume boxes derived from one rebuild
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeBounds {
    /// Printable region
    pub volume: Aabb,
    /// Limit for automatic object scaling
    ///
    /// Narrowed by the edge clearance and by [`disallowed_area_depth`] along
    /// the depth axis. This heuristic matches machines whose only large
    /// disallowed areas are clips at the front; it is an approximation for
    /// everything else.
    pub scale_bounds: Aabb,
    /// Translation the volume's scene node applies, lowering it by the raft
    pub origin: Vector3<f64>,
    pub raft_thickness: f64,
    pub extra_z_clearance: f64,
    pub disallowed_area_depth: f64,
}

impl VolumeBounds {
    /// Combine machine size, raft, hop and disallowed areas
    ///
    /// # Arguments
    /// * `machine` - Bed dimensions
    /// * `raft_thickness` - See [`raft_thickness`]
    /// * `extra_z` - See [`extra_z_clearance`]
    /// * `border_size` - Edge clearance
    /// * `areas` - Brim-aware disallowed areas
    pub fn compute(
        machine: &MachineGeometry,
        raft_thickness: f64,
        extra_z: f64,
        border_size: f64,
        areas: &[Polygon],
    ) -> Self {
        let min_w = -machine.width / 2.0;
        let max_w = machine.width / 2.0;
        let min_h = 0.0;
        let max_h = machine.height;
        let min_d = -machine.depth / 2.0;
        let max_d = machine.depth / 2.0;
        let top = max_h - raft_thickness - extra_z;

        let volume = Aabb::new(
            Point3::new(min_w, min_h - BED_CONTACT_MARGIN, min_d),
            Point3::new(max_w, top, max_d),
        );

        let depth = disallowed_area_depth(areas);
        let scale_bounds = Aabb::new(
            Point3::new(
                min_w + border_size + 1.0,
                min_h,
                min_d + depth - border_size + 1.0,
            ),
            Point3::new(
                max_w - border_size - 1.0,
                top,
                max_d - depth + border_size - 1.0,
            ),
        );

        Self {
            volume,
            scale_bounds,
            origin: Vector3::new(0.0, -raft_thickness, 0.0),
            raft_thickness,
            extra_z_clearance: extra_z,
            disallowed_area_depth: depth,
        }
    }
}
