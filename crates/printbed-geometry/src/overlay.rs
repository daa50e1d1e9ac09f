// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boolean operations on polygons via `i_overlay`

use crate::polygon::{signed_area, Polygon};
use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use nalgebra::Point2;

/// Overlap below this area (mm²) counts as touching, not intersecting
pub const INTERSECTION_EPSILON: f64 = 1e-4;

fn contour_area(contour: &[[f64; 2]]) -> f64 {
    let points: Vec<Point2<f64>> = contour.iter().map(|&[x, y]| Point2::new(x, y)).collect();
    signed_area(&points).abs()
}

/// Area shared by two polygons
///
/// Degenerate inputs share no area.
pub fn intersection_area(a: &Polygon, b: &Polygon) -> f64 {
    if a.is_degenerate() || b.is_degenerate() {
        return 0.0;
    }

    let subject = a.to_raw();
    let clip = b.to_raw();
    let shapes = subject.overlay(&[clip], OverlayRule::Intersect, FillRule::NonZero);

    shapes
        .iter()
        .map(|shape| {
            let mut contours = shape.iter();
            let outer = contours.next().map(|c| contour_area(c)).unwrap_or(0.0);
            let holes: f64 = contours.map(|c| contour_area(c)).sum();
            outer - holes
        })
        .sum::<f64>()
        .max(0.0)
}

/// Union of several polygons reduced to a single outline
///
/// Holes are dropped and the outer contour of the largest resulting piece
/// is returned. `None` when the union produced nothing usable.
pub fn union_outline(polygons: &[Polygon]) -> Option<Polygon> {
    let (first, rest) = polygons.split_first()?;
    let mut result: Vec<Vec<[f64; 2]>> = vec![first.to_raw()];

    for polygon in rest {
        let clip = polygon.to_raw();
        let shapes = result.overlay(&[clip], OverlayRule::Union, FillRule::NonZero);

        let merged: Vec<Vec<[f64; 2]>> = shapes
            .into_iter()
            .filter_map(|shape| shape.into_iter().next())
            .filter(|outer| outer.len() >= 3)
            .collect();

        // Keep the previous state if a step collapses
        if !merged.is_empty() {
            result = merged;
        }
    }

    let largest = result.into_iter().max_by(|a, b| {
        contour_area(a)
            .partial_cmp(&contour_area(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    })?;
    Polygon::from_raw(&largest).ok()
}

/// Vertices closer than this (mm) to an edge count as on the edge
const EDGE_TOLERANCE: f64 = 1e-6;

impl Polygon {
    fn contains_point_strictly(&self, point: &Point2<f64>) -> bool {
        self.contains_point(point) && self.distance_to_boundary(point) > EDGE_TOLERANCE
    }

    /// Whether the interiors of two polygons overlap
    ///
    /// Polygons that only touch along an edge or at a vertex do not
    /// intersect, and degenerate polygons never do.
    pub fn intersects(&self, other: &Polygon) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }
        if !self.bounding_rect().overlaps(&other.bounding_rect()) {
            return false;
        }

        // Cheap case: a vertex clear of the other polygon's edges and inside it
        let vertex_inside = self.points().iter().any(|p| other.contains_point_strictly(p))
            || other.points().iter().any(|p| self.contains_point_strictly(p));
        if vertex_inside {
            return true;
        }

        intersection_area(self, other) > INTERSECTION_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_overlapping_rectangles() {
        let a = Polygon::rectangle(0.0, 0.0, 10.0, 10.0);
        let b = Polygon::rectangle(5.0, 5.0, 15.0, 15.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert_relative_eq!(intersection_area(&a, &b), 25.0, epsilon = 1e-6);
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Polygon::rectangle(0.0, 0.0, 10.0, 10.0);
        let b = Polygon::rectangle(10.0, 0.0, 20.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_shared_edge_inside_bounds_does_not_intersect() {
        // The rectangle fills the notch of the L, sharing two edges
        let l_shape = Polygon::from_raw(&[
            [0.0, 0.0],
            [20.0, 0.0],
            [20.0, 5.0],
            [10.0, 5.0],
            [10.0, 20.0],
            [0.0, 20.0],
        ])
        .unwrap();
        let notch = Polygon::rectangle(10.0, 5.0, 20.0, 20.0);
        assert!(l_shape.bounding_rect().overlaps(&notch.bounding_rect()));
        assert!(!l_shape.intersects(&notch));
        assert!(!notch.intersects(&l_shape));

        let overlapping = Polygon::rectangle(9.0, 5.0, 20.0, 20.0);
        assert!(l_shape.intersects(&overlapping));
    }

    #[test]
    fn test_disjoint() {
        let a = Polygon::rectangle(0.0, 0.0, 1.0, 1.0);
        let b = Polygon::rectangle(5.0, 5.0, 6.0, 6.0);
        assert!(!a.intersects(&b));
        assert_relative_eq!(intersection_area(&a, &b), 0.0);
    }

    #[test]
    fn test_crossing_without_contained_vertices() {
        // Plus sign: neither rectangle has a vertex inside the other
        let horizontal = Polygon::rectangle(-10.0, -1.0, 10.0, 1.0);
        let vertical = Polygon::rectangle(-1.0, -10.0, 1.0, 10.0);
        assert!(horizontal.intersects(&vertical));
        assert_relative_eq!(
            intersection_area(&horizontal, &vertical),
            4.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_degenerate_never_intersects() {
        let a = Polygon::rectangle(0.0, 0.0, 10.0, 10.0);
        let line = Polygon::from_raw(&[[-1.0, 5.0], [11.0, 5.0]]).unwrap();
        let flat = Polygon::triangle([-1.0, 5.0], [5.0, 5.0], [11.0, 5.0]);
        assert!(!a.intersects(&line));
        assert!(!a.intersects(&flat));
        assert!(!line.intersects(&a));
    }

    #[test]
    fn test_containment_counts_as_intersection() {
        let outer = Polygon::rectangle(0.0, 0.0, 100.0, 100.0);
        let inner = Polygon::rectangle(40.0, 40.0, 60.0, 60.0);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn test_union_outline_merges_overlapping() {
        let a = Polygon::rectangle(0.0, 0.0, 10.0, 10.0);
        let b = Polygon::rectangle(5.0, 0.0, 15.0, 10.0);
        let merged = union_outline(&[a, b]).unwrap();
        assert_relative_eq!(merged.area(), 150.0, epsilon = 1e-6);
    }

    #[test]
    fn test_union_outline_empty() {
        assert!(union_outline(&[]).is_none());
    }
}
