// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Disallowed area computation
//!
//! Produces, per used extruder, the polygons where that extruder must not
//! print. Every call starts from the configuration snapshot and builds all
//! sets from scratch:
//!
//! 1. static machine areas (bed border and machine-declared polygons)
//! 2. prime blob areas, checked for collisions
//! 3. nozzle-declared areas
//! 4. prime tower, or an error area when it cannot be placed
//!
//! Two variants are kept per extruder. The brim-aware set is dilated by the
//! edge clearance and is what objects are tested against; the no-brim set
//! holds the bare footprints used for prime position checks.

use crate::bed_shape::{bed_shape_for, UnreachableBorder};
use crate::Result;
use log::{debug, warn};
use printbed_geometry::Polygon;
use printbed_model::{ExtruderId, ExtruderSettings, MachineConfiguration};

/// Radius kept free around a prime blob, in mm
pub const PRIME_CLEARANCE: f64 = 6.5;

/// Disallowed polygons of one extruder
#[derive(Debug, Clone, PartialEq)]
pub struct ExtruderAreas {
    pub extruder: ExtruderId,
    /// Areas including the adhesion and clearance margin
    pub areas: Vec<Polygon>,
    /// Bare footprints without the margin
    pub areas_no_brim: Vec<Polygon>,
}

/// Result of one disallowed area computation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisallowedAreas {
    /// Edge clearance the areas were computed with
    pub border_size: f64,
    /// Per used extruder, in used-extruder order
    pub per_extruder: Vec<ExtruderAreas>,
    /// All brim-aware areas, concatenated in extruder order
    pub areas: Vec<Polygon>,
    /// All no-brim areas, concatenated in extruder order
    pub areas_no_brim: Vec<Polygon>,
    /// Footprints that could not be placed, such as a colliding prime tower
    pub error_areas: Vec<Polygon>,
    /// Extruders whose prime blob overlaps a disallowed area or another blob
    pub prime_collisions: Vec<ExtruderId>,
}

impl DisallowedAreas {
    /// Whether any footprint could not be placed
    pub fn has_errors(&self) -> bool {
        !self.error_areas.is_empty()
    }

    /// Areas of one extruder
    pub fn for_extruder(&self, id: ExtruderId) -> Option<&ExtruderAreas> {
        self.per_extruder.iter().find(|e| e.extruder == id)
    }
}

/// Computes disallowed areas for a configuration snapshot
///
/// # Example
///
/// ```ignore
/// let border = edge_clearance(&config)?;
/// let areas = DisallowedAreaComputer::new(&config, border).compute()?;
/// if areas.has_errors() {
///     // show a warning, the prime tower does not fit
/// }
/// ```
pub struct DisallowedAreaComputer<'a> {
    config: &'a MachineConfiguration,
    border_size: f64,
}

impl<'a> DisallowedAreaComputer<'a> {
    /// Create a computer for a snapshot and edge clearance
    pub fn new(config: &'a MachineConfiguration, border_size: f64) -> Self {
        Self {
            config,
            border_size,
        }
    }

    /// Run all steps and aggregate the result
    pub fn compute(&self) -> Result<DisallowedAreas> {
        let used = self.config.resolved_used_extruders()?;

        let mut areas = Vec::with_capacity(used.len());
        let mut areas_no_brim = Vec::with_capacity(used.len());
        for extruder in &used {
            areas.push(self.static_areas(extruder, self.border_size)?);
            areas_no_brim.push(self.static_areas(extruder, 0.0)?);
        }

        let prime_blobs: Vec<Option<Polygon>> =
            used.iter().map(|e| self.prime_blob_area(e)).collect();
        let prime_collisions = find_prime_collisions(&used, &prime_blobs, &areas_no_brim);

        for (i, extruder) in used.iter().enumerate() {
            // Blobs are accepted even when they collide
            if let Some(blob) = &prime_blobs[i] {
                areas[i].push(blob.clone());
                areas_no_brim[i].push(blob.clone());
            }

            for raw in &extruder.nozzle_disallowed_areas {
                let polygon = Polygon::from_raw(raw)?;
                areas[i].push(polygon.dilate(self.border_size));
                areas_no_brim[i].push(polygon);
            }
        }

        let mut error_areas = Vec::new();
        if used.len() > 1 {
            if let Some(tower) = self.prime_tower_area() {
                if areas.iter().flatten().any(|area| tower.intersects(area)) {
                    warn!("prime tower collides with a disallowed area");
                    error_areas.push(tower);
                } else {
                    for (set, bare) in areas.iter_mut().zip(areas_no_brim.iter_mut()) {
                        set.push(tower.clone());
                        bare.push(tower.clone());
                    }
                }
            }
        }

        let per_extruder: Vec<ExtruderAreas> = used
            .iter()
            .zip(areas.into_iter().zip(areas_no_brim))
            .map(|(extruder, (areas, areas_no_brim))| {
                debug!(
                    "{}: {} disallowed areas, {} without brim",
                    extruder.position,
                    areas.len(),
                    areas_no_brim.len()
                );
                ExtruderAreas {
                    extruder: extruder.position,
                    areas,
                    areas_no_brim,
                }
            })
            .collect();

        Ok(DisallowedAreas {
            border_size: self.border_size,
            areas: per_extruder.iter().flat_map(|e| e.areas.iter().cloned()).collect(),
            areas_no_brim: per_extruder
                .iter()
                .flat_map(|e| e.areas_no_brim.iter().cloned())
                .collect(),
            per_extruder,
            error_areas,
            prime_collisions,
        })
    }

    /// Machine border and machine-declared areas for one extruder
    ///
    /// Machine-declared polygons are dilated by `border_size` and shifted by
    /// the extruder's nozzle offset.
    pub fn static_areas(
        &self,
        extruder: &ExtruderSettings,
        border_size: f64,
    ) -> Result<Vec<Polygon>> {
        let machine = &self.config.machine;
        let [offset_x, offset_y] = extruder.scene_nozzle_offset();

        let mut result = Vec::with_capacity(machine.disallowed_areas.len() + 4);
        for raw in &machine.disallowed_areas {
            let polygon = Polygon::from_raw(raw)?;
            result.push(polygon.dilate(border_size).translate(offset_x, offset_y));
        }

        let reach = if machine.nozzle_offsetting_for_disallowed_areas {
            UnreachableBorder::from_offsets(
                [offset_x, offset_y],
                self.config
                    .extruders
                    .iter()
                    .filter(|other| other.position != extruder.position)
                    .map(|other| other.scene_nozzle_offset()),
            )
        } else {
            UnreachableBorder::default()
        };

        let shape = bed_shape_for(machine)?;
        result.extend(shape.static_border_polygons(border_size, &reach));
        Ok(result)
    }

    /// Prime blob footprint of one extruder
    ///
    /// `None` when the blob is disabled or the prime position is unset.
    pub fn prime_blob_area(&self, extruder: &ExtruderSettings) -> Option<Polygon> {
        let unset = extruder.prime_pos_x == 0.0 && extruder.prime_pos_y == 0.0;
        if !extruder.prime_blob_enable || unset {
            return None;
        }

        let (x, y) = self.to_scene(extruder.prime_pos_x, extruder.prime_pos_y);
        Some(
            Polygon::approximated_circle(PRIME_CLEARANCE)
                .dilate(self.border_size)
                .translate(x, y),
        )
    }

    /// Prime tower footprint, `None` when the tower is disabled
    ///
    /// The configured position is the tower's back-right corner. It is the
    /// same for every extruder regardless of nozzle offset.
    pub fn prime_tower_area(&self) -> Option<Polygon> {
        let tower = &self.config.settings.prime_tower;
        if !tower.enable {
            return None;
        }

        let (x, y) = self.to_scene(tower.position_x, tower.position_y);
        let size = tower.size;
        if tower.circular {
            let radius = size / 2.0;
            Some(Polygon::approximated_circle(radius).translate(x - radius, y - radius))
        } else {
            Some(Polygon::rectangle(x - size, y - size, x, y))
        }
    }

    /// Convert g-code coordinates to bed-centred scene coordinates
    fn to_scene(&self, x: f64, y: f64) -> (f64, f64) {
        let machine = &self.config.machine;
        let y = -y;
        if machine.center_is_zero {
            (x, y)
        } else {
            (x - machine.width / 2.0, y + machine.depth / 2.0)
        }
    }
}

/// Extruders whose prime blob overlaps something
///
/// A blob is checked against the static no-brim areas of every used
/// extruder and against the blobs of the other extruders.
fn find_prime_collisions(
    used: &[ExtruderSettings],
    prime_blobs: &[Option<Polygon>],
    static_no_brim: &[Vec<Polygon>],
) -> Vec<ExtruderId> {
    let mut collisions = Vec::new();
    for (i, extruder) in used.iter().enumerate() {
        let Some(blob) = &prime_blobs[i] else {
            continue;
        };

        let hits_static = static_no_brim.iter().flatten().any(|area| blob.intersects(area));
        let hits_blob = prime_blobs
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .filter_map(|(_, other)| other.as_ref())
            .any(|other| blob.intersects(other));

        if hits_static || hits_blob {
            warn!("prime blob of {} collides with a disallowed area", extruder.position);
            collisions.push(extruder.position);
        }
    }
    collisions
}
