// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Printbed Volume
//!
//! Computes where on a 3D printer's bed each extruder may print, the
//! resulting printable envelope, and which scene objects fall outside it.
//!
//! ## Pipeline
//!
//! Every rebuild runs the same steps in order, from a configuration
//! snapshot to a new [`VolumeSnapshot`]:
//!
//! 1. [`edge_clearance`] - width of the adhesion and travel margin
//! 2. [`DisallowedAreaComputer`] - border, prime blob, nozzle and tower areas
//! 3. [`raft_thickness`] and [`extra_z_clearance`] - vertical reductions
//! 4. [`VolumeBounds`] - printable box and scale limits
//!
//! [`BoundaryClassifier`] then marks scene nodes inside or outside.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use printbed_model::MachineConfiguration;
//! use printbed_volume::{BuildVolume, SceneNode};
//!
//! let config = MachineConfiguration::from_json_file("machine.json")?;
//! let mut volume = BuildVolume::new();
//! volume.rebuild(&config)?;
//!
//! if volume.has_errors() {
//!     println!("prime tower does not fit");
//! }
//! let states = volume.classify(&scene_roots);
//! ```

pub mod bed_shape;
pub mod bounds;
pub mod classifier;
pub mod clearance;
pub mod disallowed;
pub mod error;
pub mod scene;
pub mod volume;

pub use bed_shape::{
    bed_shape_for, BedShape, EllipticalBedShape, RectangularBedShape, UnreachableBorder,
    ELLIPSE_SECTIONS,
};
pub use bounds::{
    disallowed_area_depth, extra_z_clearance, raft_thickness, VolumeBounds, BED_CONTACT_MARGIN,
};
pub use classifier::{
    classify_scene, BoundaryClassifier, BoundaryState, Classification, UNBOUNDED_FLOOR,
};
pub use clearance::{edge_clearance, EdgeClearance, ONE_AT_A_TIME_CLEARANCE};
pub use disallowed::{DisallowedAreaComputer, DisallowedAreas, ExtruderAreas, PRIME_CLEARANCE};
pub use error::{Error, Result};
pub use scene::{breadth_first, NodeKind, SceneNode};
pub use volume::{compute_volume, BuildVolume, VolumeSnapshot};
