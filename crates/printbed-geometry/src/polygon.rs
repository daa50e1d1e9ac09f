// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D polygon value type

use crate::bounds::BoundingRect;
use crate::error::{Error, Result};
use nalgebra::Point2;
use std::cmp::Ordering;

/// Number of segments used to approximate a circle
pub const CIRCLE_SEGMENTS: usize = 32;

/// Polygons with less area than this (mm²) have no collision area
pub const DEGENERATE_AREA: f64 = 1e-9;

/// Closed 2D polygon
///
/// The closing edge is implicit: the last point connects back to the first
/// and is never repeated. A polygon always has at least one point. Every
/// transform returns a new value; the points cannot be mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Point2<f64>>,
}

impl Polygon {
    /// Create a polygon from its points
    ///
    /// Fails on an empty point list or a non-finite coordinate.
    pub fn new(points: Vec<Point2<f64>>) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::insufficient_points(1, 0));
        }
        if let Some(index) = points
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(Error::NonFinite { index });
        }
        Ok(Self { points })
    }

    /// Create a polygon from `[x, y]` pairs
    pub fn from_raw(raw: &[[f64; 2]]) -> Result<Self> {
        Self::new(raw.iter().map(|&[x, y]| Point2::new(x, y)).collect())
    }

    /// Triangle from three corners
    pub fn triangle(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> Self {
        Self {
            points: vec![a.into(), b.into(), c.into()],
        }
    }

    /// Quadrilateral from four corners
    pub fn quad(a: [f64; 2], b: [f64; 2], c: [f64; 2], d: [f64; 2]) -> Self {
        Self {
            points: vec![a.into(), b.into(), c.into(), d.into()],
        }
    }

    /// Axis-aligned rectangle spanning two corners
    pub fn rectangle(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::quad([min_x, min_y], [max_x, min_y], [max_x, max_y], [min_x, max_y])
    }

    /// Regular polygon approximating a circle centred on the origin
    pub fn approximated_circle(radius: f64) -> Self {
        let points = (0..CIRCLE_SEGMENTS)
            .map(|i| {
                let angle = 2.0 * std::f64::consts::PI * (i as f64) / (CIRCLE_SEGMENTS as f64);
                Point2::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect();
        Self { points }
    }

    /// Vertices in order
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed polygon
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Vertices as `[x, y]` pairs
    pub fn to_raw(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(|p| [p.x, p.y]).collect()
    }

    /// Copy shifted by `(dx, dy)`
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|p| Point2::new(p.x + dx, p.y + dy))
                .collect(),
        }
    }

    /// Shoelace area, positive for counter-clockwise winding
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.points)
    }

    /// Enclosed area regardless of winding
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Whether the polygon encloses no area
    ///
    /// Degenerate polygons are valid inputs everywhere but never collide.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3 || self.area() < DEGENERATE_AREA
    }

    /// Smallest axis-aligned rectangle containing every vertex
    pub fn bounding_rect(&self) -> BoundingRect {
        let first = self.points[0];
        self.points[1..]
            .iter()
            .fold(BoundingRect::new(first, first), |rect, p| rect.expanded(p))
    }

    /// Whether every turn has the same direction
    ///
    /// Polygons with fewer than three points are treated as convex.
    pub fn is_convex(&self) -> bool {
        is_convex(&self.points)
    }

    /// Convex hull of the vertices, counter-clockwise
    pub fn convex_hull(&self) -> Self {
        Self {
            points: convex_hull(&self.points),
        }
    }

    /// Even-odd point containment
    ///
    /// Points exactly on an edge may report either way.
    pub fn contains_point(&self, point: &Point2<f64>) -> bool {
        if self.points.len() < 3 {
            return false;
        }

        let n = self.points.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let pi = &self.points[i];
            let pj = &self.points[j];
            if (pi.y > point.y) != (pj.y > point.y) {
                let x_cross = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
                if point.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Distance from a point to the nearest edge
    pub fn distance_to_boundary(&self, point: &Point2<f64>) -> f64 {
        let n = self.points.len();
        (0..n)
            .map(|i| segment_distance(point, &self.points[i], &self.points[(i + 1) % n]))
            .fold(f64::INFINITY, f64::min)
    }
}

fn segment_distance(point: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    let edge = b - a;
    let length_sq = edge.norm_squared();
    if length_sq == 0.0 {
        return (point - a).norm();
    }
    let t = ((point - a).dot(&edge) / length_sq).clamp(0.0, 1.0);
    (point - (a + edge * t)).norm()
}

/// Shoelace formula over an implicitly closed ring
pub(crate) fn signed_area(points: &[Point2<f64>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let n = points.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let a = &points[i];
            let b = &points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice / 2.0
}

/// Check if a polygon is convex (all cross products have same sign)
fn is_convex(points: &[Point2<f64>]) -> bool {
    if points.len() < 3 {
        return true;
    }

    let n = points.len();
    let mut sign = 0i8;

    for i in 0..n {
        let p0 = &points[i];
        let p1 = &points[(i + 1) % n];
        let p2 = &points[(i + 2) % n];

        let cross = (p1.x - p0.x) * (p2.y - p1.y) - (p1.y - p0.y) * (p2.x - p1.x);

        if cross.abs() > 1e-10 {
            let current_sign = if cross > 0.0 { 1i8 } else { -1i8 };
            if sign == 0 {
                sign = current_sign;
            } else if sign != current_sign {
                return false;
            }
        }
    }

    true
}

#[inline]
fn cross(o: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Monotone chain convex hull
///
/// Returns the hull counter-clockwise without collinear points. Coincident
/// input collapses to a single point, collinear input to its two ends.
pub fn convex_hull(points: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let mut sorted: Vec<Point2<f64>> = points.to_vec();
    sorted.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap_or(Ordering::Equal)
            .then(a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
    });
    sorted.dedup();

    if sorted.len() < 3 {
        return sorted;
    }

    let mut hull: Vec<Point2<f64>> = Vec::with_capacity(sorted.len() * 2);

    // Lower hull
    for p in &sorted {
        while hull.len() >= 2 && cross(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(*p);
    }

    // Upper hull
    let lower_len = hull.len() + 1;
    for p in sorted.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && cross(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0
        {
            hull.pop();
        }
        hull.push(*p);
    }

    hull.pop();
    hull
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_polygon_is_rejected() {
        assert_eq!(
            Polygon::new(Vec::new()).unwrap_err(),
            Error::insufficient_points(1, 0)
        );
    }

    #[test]
    fn test_non_finite_is_rejected() {
        let err = Polygon::from_raw(&[[0.0, 0.0], [f64::NAN, 1.0]]).unwrap_err();
        assert_eq!(err, Error::NonFinite { index: 1 });
    }

    #[test]
    fn test_rectangle_area_and_bounds() {
        let rect = Polygon::rectangle(-2.0, -1.0, 4.0, 3.0);
        assert_relative_eq!(rect.area(), 24.0);
        assert!(rect.signed_area() > 0.0);

        let bounds = rect.bounding_rect();
        assert_eq!(bounds.min, Point2::new(-2.0, -1.0));
        assert_eq!(bounds.max, Point2::new(4.0, 3.0));
    }

    #[test]
    fn test_circle_approximation() {
        let circle = Polygon::approximated_circle(10.0);
        assert_eq!(circle.len(), CIRCLE_SEGMENTS);
        for p in circle.points() {
            assert_relative_eq!(p.coords.norm(), 10.0, epsilon = 1e-9);
        }
        // Inscribed 32-gon area is slightly below the disc area
        let disc = std::f64::consts::PI * 100.0;
        assert!(circle.area() < disc);
        assert!(circle.area() > disc * 0.99);
        assert!(circle.is_convex());
    }

    #[test]
    fn test_translate_returns_new_value() {
        let tri = Polygon::triangle([0.0, 0.0], [1.0, 0.0], [0.0, 1.0]);
        let moved = tri.translate(5.0, -2.0);
        assert_eq!(moved.points()[0], Point2::new(5.0, -2.0));
        assert_eq!(tri.points()[0], Point2::new(0.0, 0.0));
        assert_relative_eq!(moved.area(), tri.area());
    }

    #[test]
    fn test_degenerate_polygons() {
        assert!(Polygon::from_raw(&[[1.0, 1.0]]).unwrap().is_degenerate());
        assert!(Polygon::from_raw(&[[0.0, 0.0], [1.0, 1.0]]).unwrap().is_degenerate());
        assert!(Polygon::triangle([0.0, 0.0], [1.0, 1.0], [2.0, 2.0]).is_degenerate());
        assert!(!Polygon::rectangle(0.0, 0.0, 1.0, 1.0).is_degenerate());
    }

    #[test]
    fn test_convexity() {
        let notch = Polygon::from_raw(&[
            [0.0, 0.0],
            [4.0, 0.0],
            [4.0, 4.0],
            [2.0, 1.0],
            [0.0, 4.0],
        ])
        .unwrap();
        assert!(!notch.is_convex());
        assert!(Polygon::rectangle(0.0, 0.0, 1.0, 1.0).is_convex());
    }

    #[test]
    fn test_convex_hull_drops_interior_and_collinear_points() {
        let hull = convex_hull(&[
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 4.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 4.0),
            Point2::new(0.0, 4.0),
        ]);
        assert_eq!(hull.len(), 4);
        assert_relative_eq!(signed_area(&hull), 16.0);
    }

    #[test]
    fn test_convex_hull_of_coincident_points() {
        let hull = convex_hull(&[Point2::new(1.0, 1.0), Point2::new(1.0, 1.0)]);
        assert_eq!(hull, vec![Point2::new(1.0, 1.0)]);
    }

    #[test]
    fn test_contains_point() {
        let rect = Polygon::rectangle(0.0, 0.0, 10.0, 5.0);
        assert!(rect.contains_point(&Point2::new(5.0, 2.5)));
        assert!(!rect.contains_point(&Point2::new(11.0, 2.5)));
        assert!(!Polygon::from_raw(&[[0.0, 0.0], [1.0, 1.0]])
            .unwrap()
            .contains_point(&Point2::new(0.5, 0.5)));
    }

    #[test]
    fn test_distance_to_boundary() {
        let square = Polygon::rectangle(0.0, 0.0, 10.0, 10.0);
        assert_relative_eq!(square.distance_to_boundary(&Point2::new(5.0, 2.0)), 2.0);
        assert_relative_eq!(square.distance_to_boundary(&Point2::new(10.0, 5.0)), 0.0);
        assert_relative_eq!(square.distance_to_boundary(&Point2::new(13.0, 14.0)), 5.0);
    }
}
