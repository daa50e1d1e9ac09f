// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Immutable scene snapshot handed to the classifier

use printbed_geometry::{convex_hull, Aabb, Point2, Polygon};
use printbed_model::{ExtruderId, NodeId};
use std::collections::VecDeque;

/// Role of a node in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Printable mesh
    Sliceable,
    /// Grouping of other nodes, classified as one unit
    Group,
    /// Anything else (cameras, the build plate, helpers); never classified
    Other,
}

/// One node of the scene tree
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub id: NodeId,
    pub kind: NodeKind,
    /// World-space bounding box, `None` for nodes without geometry
    pub bounds: Option<Aabb>,
    /// Convex footprint on the build plate, scene `(x, z)` as `(x, y)`
    pub footprint: Option<Polygon>,
    /// Extruder assigned to the node; defaults to the first one
    pub extruder: Option<ExtruderId>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Printable mesh node
    pub fn sliceable(id: impl Into<NodeId>, bounds: Aabb, footprint: Polygon) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Sliceable,
            bounds: Some(bounds),
            footprint: Some(footprint),
            extruder: None,
            children: Vec::new(),
        }
    }

    /// Group node
    ///
    /// The bounds are the union of the children's bounds and the footprint is
    /// the convex hull of their footprints.
    pub fn group(id: impl Into<NodeId>, children: Vec<SceneNode>) -> Self {
        let bounds = children
            .iter()
            .filter_map(|c| c.bounds)
            .reduce(|a, b| a.merged(&b));

        let points: Vec<Point2<f64>> = children
            .iter()
            .filter_map(|c| c.footprint.as_ref())
            .flat_map(|f| f.points().iter().copied())
            .collect();
        let footprint = Polygon::new(convex_hull(&points)).ok();

        Self {
            id: id.into(),
            kind: NodeKind::Group,
            bounds,
            footprint,
            extruder: None,
            children,
        }
    }

    /// Node that is not subject to classification
    pub fn other(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Other,
            bounds: None,
            footprint: None,
            extruder: None,
            children: Vec::new(),
        }
    }

    /// Assign an extruder
    pub fn with_extruder(mut self, extruder: impl Into<ExtruderId>) -> Self {
        self.extruder = Some(extruder.into());
        self
    }

    /// Replace the children
    pub fn with_children(mut self, children: Vec<SceneNode>) -> Self {
        self.children = children;
        self
    }

    /// Whether the classifier looks at this node
    pub fn is_classifiable(&self) -> bool {
        matches!(self.kind, NodeKind::Sliceable | NodeKind::Group)
    }

    /// All nodes below this one, depth first, excluding itself
    pub fn descendants(&self) -> Vec<&SceneNode> {
        let mut result = Vec::new();
        let mut stack: Vec<&SceneNode> = self.children.iter().rev().collect();
        while let Some(node) = stack.pop() {
            result.push(node);
            stack.extend(node.children.iter().rev());
        }
        result
    }
}

/// All nodes of a forest in breadth-first order
pub fn breadth_first(roots: &[SceneNode]) -> Vec<&SceneNode> {
    let mut result = Vec::new();
    let mut queue: VecDeque<&SceneNode> = roots.iter().collect();
    while let Some(node) = queue.pop_front() {
        result.push(node);
        queue.extend(node.children.iter());
    }
    result
}
