// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Printbed Geometry
//!
//! Small 2D polygon kernel used to describe regions of a build plate.
//!
//! ## Overview
//!
//! - **Polygon**: immutable closed outline with area, bounds and containment
//! - **Dilation**: Minkowski sum with a 32-segment disc, exact for concave input
//! - **Overlap**: interior intersection tests via `i_overlay`
//! - **Bounds**: 2D bounding rectangles and 3D axis-aligned boxes
//!
//! Build plate polygons live in the XZ plane of the scene, stored here as
//! `(x, y)` pairs where `y` is the scene depth axis.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use printbed_geometry::Polygon;
//!
//! let blob = Polygon::approximated_circle(6.5)
//!     .dilate(3.0)
//!     .translate(-95.0, 95.0);
//! let model = Polygon::rectangle(-100.0, 80.0, -80.0, 100.0);
//!
//! assert!(blob.intersects(&model));
//! ```

pub mod bounds;
pub mod error;
pub mod minkowski;
pub mod overlay;
pub mod polygon;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};

// Re-export main types
pub use bounds::{Aabb, BoundingRect, BoxIntersection};
pub use error::{Error, Result};
pub use minkowski::minkowski_hull;
pub use overlay::{intersection_area, union_outline, INTERSECTION_EPSILON};
pub use polygon::{convex_hull, Polygon, CIRCLE_SEGMENTS, DEGENERATE_AREA};
