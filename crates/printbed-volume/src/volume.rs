// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Full rebuild pipeline and the build volume owner

use crate::bounds::{extra_z_clearance, raft_thickness, VolumeBounds};
use crate::classifier::{BoundaryClassifier, BoundaryState, Classification};
use crate::clearance::edge_clearance;
use crate::disallowed::{DisallowedAreaComputer, DisallowedAreas};
use crate::scene::SceneNode;
use crate::Result;
use log::debug;
use nalgebra::Vector3;
use printbed_geometry::{Aabb, Polygon};
use printbed_model::{
    setting_keys, BedShapeKind, ExtruderId, MachineConfiguration, SettingsSource,
};
use rustc_hash::FxHashMap;

/// Everything one rebuild produces
///
/// Snapshots are replaced as a whole; no field is ever updated on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeSnapshot {
    pub bed_shape: BedShapeKind,
    /// Edge clearance used for the areas and scale bounds
    pub border_size: f64,
    pub areas: DisallowedAreas,
    pub bounds: VolumeBounds,
    extruder_enabled: FxHashMap<ExtruderId, bool>,
}

impl VolumeSnapshot {
    /// Printable box
    pub fn bounding_box(&self) -> Aabb {
        self.bounds.volume
    }

    /// Box limiting automatic object scaling
    pub fn scale_bounds(&self) -> Aabb {
        self.bounds.scale_bounds
    }

    /// Brim-aware disallowed areas of all used extruders
    pub fn disallowed_areas(&self) -> &[Polygon] {
        &self.areas.areas
    }

    /// Disallowed areas without the adhesion margin
    pub fn disallowed_areas_no_brim(&self) -> &[Polygon] {
        &self.areas.areas_no_brim
    }

    /// Footprints that could not be placed
    pub fn error_areas(&self) -> &[Polygon] {
        &self.areas.error_areas
    }

    pub fn has_errors(&self) -> bool {
        self.areas.has_errors()
    }

    pub fn raft_thickness(&self) -> f64 {
        self.bounds.raft_thickness
    }

    /// Translation applied to the volume's scene node
    pub fn origin(&self) -> Vector3<f64> {
        self.bounds.origin
    }

    /// Enabled state of an extruder, `None` if the machine has no such extruder
    pub fn is_extruder_enabled(&self, id: ExtruderId) -> Option<bool> {
        self.extruder_enabled.get(&id).copied()
    }
}

/// Run the whole pipeline for one configuration
///
/// Order: edge clearance, disallowed areas, raft and hop clearance, bounds.
/// Returns `Ok(None)` while the machine has no usable dimensions.
pub fn compute_volume(config: &MachineConfiguration) -> Result<Option<VolumeSnapshot>> {
    let machine = &config.machine;
    if machine.is_degenerate() {
        debug!(
            "skipping build volume, machine is {}x{}x{}",
            machine.width, machine.depth, machine.height
        );
        return Ok(None);
    }

    let bed_shape = machine.shape_kind()?;
    let border_size = edge_clearance(config)?;
    let areas = DisallowedAreaComputer::new(config, border_size).compute()?;
    let raft = raft_thickness(&config.settings)?;
    let extra_z = extra_z_clearance(config);
    let bounds = VolumeBounds::compute(machine, raft, extra_z, border_size, &areas.areas);

    let extruder_enabled: FxHashMap<ExtruderId, bool> = if config.extruders.is_empty() {
        std::iter::once((ExtruderId(0), true)).collect()
    } else {
        config
            .extruders
            .iter()
            .map(|e| (e.position, e.enabled))
            .collect()
    };

    debug!(
        "build volume {:?} to {:?}, {} disallowed areas, {} error areas",
        bounds.volume.min,
        bounds.volume.max,
        areas.areas.len(),
        areas.error_areas.len()
    );

    Ok(Some(VolumeSnapshot {
        bed_shape,
        border_size,
        areas,
        bounds,
        extruder_enabled,
    }))
}

/// Owner of the current build volume
///
/// Holds the latest snapshot. A failed or skipped rebuild leaves the
/// previous snapshot in place.
///
/// # Example
///
/// ```ignore
/// let mut volume = BuildVolume::new();
/// volume.rebuild_from(&store)?;
///
/// if let Some(states) = volume.classify(&scene_roots) {
///     for id in states.outside_nodes() {
///         highlight(id);
///     }
/// }
/// ```
#[derive(Debug, Default)]
pub struct BuildVolume {
    snapshot: Option<VolumeSnapshot>,
}

impl BuildVolume {
    /// Create an empty build volume (no machine yet)
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute everything from a configuration
    ///
    /// Returns whether a new snapshot was installed. Configuration errors
    /// propagate and keep the previous snapshot.
    pub fn rebuild(&mut self, config: &MachineConfiguration) -> Result<bool> {
        match compute_volume(config)? {
            Some(snapshot) => {
                self.snapshot = Some(snapshot);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Recompute from a settings source
    pub fn rebuild_from(&mut self, source: &dyn SettingsSource) -> Result<bool> {
        let config = source.snapshot()?;
        self.rebuild(&config)
    }

    /// React to changed setting keys
    ///
    /// Rebuilds only when one of the keys affects the build volume. Returns
    /// whether a new snapshot was installed.
    pub fn on_settings_changed<'k>(
        &mut self,
        keys: impl IntoIterator<Item = &'k str>,
        source: &dyn SettingsSource,
    ) -> Result<bool> {
        if !setting_keys::any_affects_build_volume(keys) {
            return Ok(false);
        }
        self.rebuild_from(source)
    }

    /// Latest snapshot, `None` before the first successful rebuild
    pub fn snapshot(&self) -> Option<&VolumeSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn bounding_box(&self) -> Option<Aabb> {
        self.snapshot.as_ref().map(|s| s.bounding_box())
    }

    pub fn has_errors(&self) -> bool {
        self.snapshot.as_ref().is_some_and(|s| s.has_errors())
    }

    pub fn raft_thickness(&self) -> f64 {
        self.snapshot.as_ref().map_or(0.0, |s| s.raft_thickness())
    }

    /// Classify a scene, `None` when there is no volume yet
    pub fn classify(&self, roots: &[SceneNode]) -> Option<Classification> {
        self.snapshot
            .as_ref()
            .map(|s| BoundaryClassifier::new(s).classify(roots))
    }

    /// Classify one node against the volume or an explicit box
    pub fn check_node(&self, node: &SceneNode, bounds: Option<Aabb>) -> Option<BoundaryState> {
        let snapshot = self.snapshot.as_ref()?;
        let classifier = match bounds {
            Some(bounds) => BoundaryClassifier::with_bounds(snapshot, bounds),
            None => BoundaryClassifier::new(snapshot),
        };
        Some(classifier.check_node(node))
    }
}
