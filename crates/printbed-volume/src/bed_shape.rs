// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bed outline strategies
//!
//! Each bed shape knows how to cover the band along its edge that an
//! extruder cannot use. All polygons are in bed-centred scene coordinates,
//! `y` pointing towards the front of the machine.

use crate::Result;
use printbed_geometry::Polygon;
use printbed_model::{BedShapeKind, MachineGeometry};

/// Number of triangular sections covering an elliptic border
pub const ELLIPSE_SECTIONS: usize = 32;

/// Extra border per side caused by the other extruders' nozzle offsets
///
/// The build volume is the region every extruder can reach, so a nozzle
/// sitting to the right of this one shrinks the usable area on the right.
/// `left` and `top` are zero or negative, `right` and `bottom` zero or
/// positive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UnreachableBorder {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl UnreachableBorder {
    /// Reach of `others` relative to an extruder at `own`
    ///
    /// Offsets are scene-space nozzle offsets (`[x, -y]` of the g-code
    /// offset).
    pub fn from_offsets(own: [f64; 2], others: impl IntoIterator<Item = [f64; 2]>) -> Self {
        others
            .into_iter()
            .fold(Self::default(), |border, [x, y]| Self {
                left: border.left.min(x - own[0]),
                right: border.right.max(x - own[0]),
                top: border.top.min(y - own[1]),
                bottom: border.bottom.max(y - own[1]),
            })
    }
}

/// Outline of a build plate
pub trait BedShape: Send + Sync {
    /// Which outline this is
    fn kind(&self) -> BedShapeKind;

    /// Polygons covering the unusable band along the bed edge
    ///
    /// # Arguments
    /// * `border_size` - Width of the band (edge clearance)
    /// * `reach` - Extra width per side from other extruders' offsets
    fn static_border_polygons(&self, border_size: f64, reach: &UnreachableBorder) -> Vec<Polygon>;
}

/// Build the strategy for a machine's bed outline
pub fn bed_shape_for(machine: &MachineGeometry) -> Result<Box<dyn BedShape>> {
    let half_width = machine.width / 2.0;
    let half_depth = machine.depth / 2.0;
    Ok(match machine.shape_kind()? {
        BedShapeKind::Rectangular => Box::new(RectangularBedShape::new(half_width, half_depth)),
        BedShapeKind::Elliptic => Box::new(EllipticalBedShape::new(half_width, half_depth)),
    })
}

/// Rectangular build plate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangularBedShape {
    half_width: f64,
    half_depth: f64,
}

impl RectangularBedShape {
    pub fn new(half_width: f64, half_depth: f64) -> Self {
        Self {
            half_width,
            half_depth,
        }
    }
}

impl BedShape for RectangularBedShape {
    fn kind(&self) -> BedShapeKind {
        BedShapeKind::Rectangular
    }

    /// One trapezoid per side, mitred at the corners
    ///
    /// A side is skipped when its width is not positive.
    fn static_border_polygons(&self, border_size: f64, reach: &UnreachableBorder) -> Vec<Polygon> {
        let hw = self.half_width;
        let hd = self.half_depth;
        let b = border_size;

        let inner_left = -hw + b - reach.left;
        let inner_right = hw - b - reach.right;
        let inner_top = -hd + b - reach.top;
        let inner_bottom = hd - b - reach.bottom;

        let mut polygons = Vec::with_capacity(4);
        if b - reach.left > 0.0 {
            polygons.push(Polygon::quad(
                [-hw, -hd],
                [-hw, hd],
                [inner_left, inner_bottom],
                [inner_left, inner_top],
            ));
        }
        if b + reach.right > 0.0 {
            polygons.push(Polygon::quad(
                [hw, hd],
                [hw, -hd],
                [inner_right, inner_top],
                [inner_right, inner_bottom],
            ));
        }
        if b + reach.bottom > 0.0 {
            polygons.push(Polygon::quad(
                [-hw, hd],
                [hw, hd],
                [inner_right, inner_bottom],
                [inner_left, inner_bottom],
            ));
        }
        if b - reach.top > 0.0 {
            polygons.push(Polygon::quad(
                [hw, -hd],
                [-hw, -hd],
                [inner_left, inner_top],
                [inner_right, inner_top],
            ));
        }
        polygons
    }
}

/// Elliptic (round) build plate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipticalBedShape {
    half_width: f64,
    half_depth: f64,
}

impl EllipticalBedShape {
    pub fn new(half_width: f64, half_depth: f64) -> Self {
        Self {
            half_width,
            half_depth,
        }
    }

    fn corner(&self, quadrant: usize) -> [f64; 2] {
        let hw = self.half_width;
        let hd = self.half_depth;
        match quadrant {
            0 => [-hw, hd],
            1 => [-hw, -hd],
            2 => [hw, -hd],
            _ => [hw, hd],
        }
    }
}

impl BedShape for EllipticalBedShape {
    fn kind(&self) -> BedShapeKind {
        BedShapeKind::Elliptic
    }

    /// Triangle fan between the bed corners and the inset ellipse
    ///
    /// Nozzle offsets do not apply to round beds; `reach` is ignored. With a
    /// positive border four extra triangles close the gaps at the axes.
    fn static_border_polygons(&self, border_size: f64, _reach: &UnreachableBorder) -> Vec<Polygon> {
        let hw = self.half_width;
        let hd = self.half_depth;
        let b = border_size;

        let mut polygons = Vec::with_capacity(ELLIPSE_SECTIONS + 4);
        let mut arc_vertex = [0.0, hd - b];
        for i in 0..ELLIPSE_SECTIONS {
            let quadrant = 4 * i / ELLIPSE_SECTIONS;
            let angle = 2.0 * std::f64::consts::PI * (i + 1) as f64 / ELLIPSE_SECTIONS as f64;
            let next = [-(hw - b) * angle.sin(), (hd - b) * angle.cos()];
            polygons.push(Polygon::triangle(self.corner(quadrant), arc_vertex, next));
            arc_vertex = next;
        }

        if b > 0.0 {
            polygons.push(Polygon::triangle([-hw, -hd], [-hw, hd], [-hw + b, 0.0]));
            polygons.push(Polygon::triangle([-hw, hd], [hw, hd], [0.0, hd - b]));
            polygons.push(Polygon::triangle([hw, hd], [hw, -hd], [hw - b, 0.0]));
            polygons.push(Polygon::triangle([hw, -hd], [-hw, -hd], [0.0, -hd + b]));
        }
        polygons
    }
}
