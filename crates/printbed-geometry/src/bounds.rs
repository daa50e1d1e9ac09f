// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned bounds in 2D and 3D

use nalgebra::{Point2, Point3};

/// Axis-aligned rectangle on the build plate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRect {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl BoundingRect {
    /// Create from two corners
    pub fn new(min: Point2<f64>, max: Point2<f64>) -> Self {
        Self { min, max }
    }

    /// Grow to include a point
    pub fn expanded(self, p: &Point2<f64>) -> Self {
        Self {
            min: Point2::new(self.min.x.min(p.x), self.min.y.min(p.y)),
            max: Point2::new(self.max.x.max(p.x), self.max.y.max(p.y)),
        }
    }

    /// Extent along x
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along y
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Whether the interiors overlap
    ///
    /// Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &BoundingRect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// How one box relates to another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxIntersection {
    /// Disjoint
    None,
    /// Overlapping but not contained
    Partial,
    /// Fully contained, touching faces included
    Full,
}

/// Axis-aligned box in scene space (y up)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create from two corners
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Copy with the bottom face moved to `y`
    pub fn with_bottom(&self, y: f64) -> Self {
        Self {
            min: Point3::new(self.min.x, y, self.min.z),
            max: self.max,
        }
    }

    /// Smallest box containing both
    pub fn merged(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Whether `other` lies inside this box, faces included
    pub fn contains_box(&self, other: &Aabb) -> bool {
        (0..3).all(|i| self.min[i] <= other.min[i] && other.max[i] <= self.max[i])
    }

    /// Relation of `other` to this box
    pub fn intersects_box(&self, other: &Aabb) -> BoxIntersection {
        if self.contains_box(other) {
            return BoxIntersection::Full;
        }
        let overlapping =
            (0..3).all(|i| self.min[i] <= other.max[i] && other.min[i] <= self.max[i]);
        if overlapping {
            BoxIntersection::Partial
        } else {
            BoxIntersection::None
        }
    }
}
