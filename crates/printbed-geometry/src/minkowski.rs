// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Minkowski dilation by an approximated disc
//!
//! Convex polygons are dilated exactly through the convex hull of all
//! pairwise vertex sums. Concave polygons are dilated by unioning the
//! polygon with one capsule per edge, which keeps the notches that a hull
//! would fill in.

use crate::overlay::union_outline;
use crate::polygon::{convex_hull, Polygon};
use nalgebra::Point2;

/// Minkowski sum of two point sets, as a convex hull
///
/// Exact when both inputs are convex.
pub fn minkowski_hull(a: &[Point2<f64>], b: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let sums: Vec<Point2<f64>> = a
        .iter()
        .flat_map(|p| b.iter().map(move |q| Point2::new(p.x + q.x, p.y + q.y)))
        .collect();
    convex_hull(&sums)
}

impl Polygon {
    /// Minkowski sum with a 32-segment disc of the given radius
    ///
    /// A radius of zero or less returns an unchanged copy.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let blob = Polygon::approximated_circle(6.5).dilate(border_size);
    /// ```
    pub fn dilate(&self, radius: f64) -> Polygon {
        if radius <= 0.0 {
            return self.clone();
        }

        let disc = Polygon::approximated_circle(radius);
        if self.len() < 3 || self.is_convex() {
            return hull_polygon(minkowski_hull(self.points(), disc.points()), self);
        }

        let n = self.len();
        let mut pieces = Vec::with_capacity(n + 1);
        pieces.push(self.clone());
        for i in 0..n {
            let edge = [self.points()[i], self.points()[(i + 1) % n]];
            pieces.push(hull_polygon(minkowski_hull(&edge, disc.points()), self));
        }

        match union_outline(&pieces) {
            Some(outline) => outline,
            None => hull_polygon(minkowski_hull(self.points(), disc.points()), self),
        }
    }
}

// Hull of a non-empty input is never empty
fn hull_polygon(points: Vec<Point2<f64>>, fallback: &Polygon) -> Polygon {
    Polygon::new(points).unwrap_or_else(|_| fallback.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::CIRCLE_SEGMENTS;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_radius_is_identity() {
        let rect = Polygon::rectangle(0.0, 0.0, 2.0, 1.0);
        assert_eq!(rect.dilate(0.0), rect);
        assert_eq!(rect.dilate(-3.0), rect);
    }

    #[test]
    fn test_dilate_point_gives_disc() {
        let point = Polygon::from_raw(&[[3.0, 4.0]]).unwrap();
        let disc = point.dilate(2.0);
        assert_eq!(disc.len(), CIRCLE_SEGMENTS);
        assert_relative_eq!(disc.area(), Polygon::approximated_circle(2.0).area(), epsilon = 1e-9);
        let bounds = disc.bounding_rect();
        assert_relative_eq!(bounds.max.x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(bounds.min.x, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_dilate_rectangle_area() {
        // Rounded rectangle: a*b + r*perimeter + disc area
        let rect = Polygon::rectangle(0.0, 0.0, 10.0, 4.0);
        let r = 1.0;
        let dilated = rect.dilate(r);
        let disc = Polygon::approximated_circle(r).area();
        assert_relative_eq!(dilated.area(), 40.0 + r * 28.0 + disc, epsilon = 1e-6);
        assert!(dilated.is_convex());
    }

    #[test]
    fn test_dilate_circle_grows_radius() {
        let blob = Polygon::approximated_circle(6.5).dilate(2.0);
        let bounds = blob.bounding_rect();
        assert_relative_eq!(bounds.max.x, 8.5, epsilon = 1e-9);
        assert_relative_eq!(bounds.min.x, -8.5, epsilon = 1e-9);
    }

    #[test]
    fn test_dilate_concave_keeps_notch() {
        // U shape with a 6 mm wide slot; a 1 mm dilation must not fill it
        let u = Polygon::from_raw(&[
            [0.0, 0.0],
            [20.0, 0.0],
            [20.0, 20.0],
            [13.0, 20.0],
            [13.0, 5.0],
            [7.0, 5.0],
            [7.0, 20.0],
            [0.0, 20.0],
        ])
        .unwrap();
        let dilated = u.dilate(1.0);
        assert!(!dilated.contains_point(&Point2::new(10.0, 15.0)));
        assert!(dilated.contains_point(&Point2::new(-0.5, 10.0)));
        assert!(dilated.area() > u.area());
        assert!(dilated.area() < u.convex_hull().dilate(1.0).area());
    }
}
