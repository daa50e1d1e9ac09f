// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boundary classification of scene nodes
//!
//! Classification runs in two passes over an immutable scene snapshot.
//! The first pass checks every sliceable and group node on its own; the
//! second walks the groups breadth first and forces each group's
//! descendants to a single state.

use crate::scene::{breadth_first, NodeKind, SceneNode};
use crate::volume::VolumeSnapshot;
use log::{trace, warn};
use printbed_geometry::{Aabb, BoxIntersection, Polygon};
use printbed_model::{ExtruderId, NodeId};
use rustc_hash::FxHashMap;

/// Floor of the box used for whole-scene checks
///
/// Objects may sink below the plate; only the sides and the top count.
pub const UNBOUNDED_FLOOR: f64 = -9001.0;

/// Whether a node lies in the printable area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoundaryState {
    /// Not classified (non-printable node, or no volume yet)
    #[default]
    Unknown,
    Inside,
    Outside,
}

impl BoundaryState {
    /// Outside the build area
    pub fn is_outside(self) -> bool {
        self == BoundaryState::Outside
    }
}

/// Per-node states produced by one classification pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    states: FxHashMap<NodeId, BoundaryState>,
}

impl Classification {
    /// State of a node, `Unknown` when it was not classified
    pub fn state(&self, id: NodeId) -> BoundaryState {
        self.states.get(&id).copied().unwrap_or_default()
    }

    /// Whether a node is outside the build area
    pub fn is_outside(&self, id: NodeId) -> bool {
        self.state(id).is_outside()
    }

    /// Nodes marked outside
    pub fn outside_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.states
            .iter()
            .filter(|(_, state)| state.is_outside())
            .map(|(id, _)| *id)
    }

    /// Number of classified nodes
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterate over all classified nodes
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &BoundaryState)> {
        self.states.iter()
    }
}

/// Checks nodes against one volume snapshot
pub struct BoundaryClassifier<'a> {
    volume: Aabb,
    areas: &'a [Polygon],
    snapshot: &'a VolumeSnapshot,
}

impl<'a> BoundaryClassifier<'a> {
    /// Classifier using the snapshot's volume with an unbounded floor
    pub fn new(snapshot: &'a VolumeSnapshot) -> Self {
        Self {
            volume: snapshot.bounding_box().with_bottom(UNBOUNDED_FLOOR),
            areas: snapshot.disallowed_areas(),
            snapshot,
        }
    }

    /// Classifier using an explicit box, taken as is
    pub fn with_bounds(snapshot: &'a VolumeSnapshot, bounds: Aabb) -> Self {
        Self {
            volume: bounds,
            areas: snapshot.disallowed_areas(),
            snapshot,
        }
    }

    /// Classify a single node, ignoring its group
    ///
    /// Nodes that are neither sliceable nor groups stay `Unknown`.
    pub fn check_node(&self, node: &SceneNode) -> BoundaryState {
        if !node.is_classifiable() {
            return BoundaryState::Unknown;
        }

        if let Some(bounds) = &node.bounds {
            if self.volume.intersects_box(bounds) != BoxIntersection::Full {
                trace!("{} leaves the build volume", node.id);
                return BoundaryState::Outside;
            }
        }

        if let Some(footprint) = &node.footprint {
            if self.areas.iter().any(|area| footprint.intersects(area)) {
                trace!("{} overlaps a disallowed area", node.id);
                return BoundaryState::Outside;
            }
        }

        let extruder = node.extruder.unwrap_or(ExtruderId(0));
        match self.snapshot.is_extruder_enabled(extruder) {
            Some(true) => BoundaryState::Inside,
            Some(false) => {
                trace!("{} uses disabled extruder {}", node.id, extruder);
                BoundaryState::Outside
            }
            None => {
                warn!("{} is assigned to unknown extruder {}", node.id, extruder);
                BoundaryState::Outside
            }
        }
    }

    /// Classify a whole scene
    ///
    /// A group containing any outside descendant is outside, and every
    /// descendant of a group takes the group's state.
    pub fn classify(&self, roots: &[SceneNode]) -> Classification {
        let nodes = breadth_first(roots);
        let mut states: FxHashMap<NodeId, BoundaryState> = FxHashMap::default();

        for node in &nodes {
            if node.is_classifiable() {
                states.insert(node.id, self.check_node(node));
            }
        }

        for group in nodes.iter().filter(|n| n.kind == NodeKind::Group) {
            let descendants = group.descendants();
            let any_outside = descendants
                .iter()
                .any(|child| states.get(&child.id).is_some_and(|s| s.is_outside()));
            if any_outside {
                states.insert(group.id, BoundaryState::Outside);
            }

            let group_state = states.get(&group.id).copied().unwrap_or_default();
            for child in descendants {
                states.insert(child.id, group_state);
            }
        }

        Classification { states }
    }
}

/// Classify every node of a scene against a volume snapshot
pub fn classify_scene(roots: &[SceneNode], snapshot: &VolumeSnapshot) -> Classification {
    BoundaryClassifier::new(snapshot).classify(roots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volume::compute_volume;
    use printbed_geometry::Point3;
    use printbed_model::{ExtruderSettings, MachineConfiguration};

    fn snapshot() -> VolumeSnapshot {
        let mut config = MachineConfiguration::default();
        config.settings.adhesion_type = "none".to_string();
        let mut second = ExtruderSettings::new(1);
        second.enabled = false;
        config.extruders = vec![ExtruderSettings::new(0), second];
        config.used_extruders = vec![ExtruderId(0)];
        config.machine.disallowed_areas =
            vec![vec![[-10.0, -10.0], [10.0, -10.0], [10.0, 10.0], [-10.0, 10.0]]];
        compute_volume(&config).unwrap().unwrap()
    }

    fn block(id: u64, x: f64, z: f64) -> SceneNode {
        SceneNode::sliceable(
            id,
            Aabb::new(Point3::new(x, 0.0, z), Point3::new(x + 10.0, 10.0, z + 10.0)),
            Polygon::rectangle(x, z, x + 10.0, z + 10.0),
        )
    }

    #[test]
    fn test_inside() {
        let snapshot = snapshot();
        let classifier = BoundaryClassifier::new(&snapshot);
        assert_eq!(classifier.check_node(&block(1, 40.0, 40.0)), BoundaryState::Inside);
    }

    #[test]
    fn test_outside_volume() {
        let snapshot = snapshot();
        let classifier = BoundaryClassifier::new(&snapshot);
        assert_eq!(classifier.check_node(&block(1, 95.0, 0.0)), BoundaryState::Outside);
    }

    #[test]
    fn test_outside_disallowed_area() {
        let snapshot = snapshot();
        let classifier = BoundaryClassifier::new(&snapshot);
        assert_eq!(classifier.check_node(&block(1, 5.0, 5.0)), BoundaryState::Outside);
    }

    #[test]
    fn test_disabled_and_unknown_extruder() {
        let snapshot = snapshot();
        let classifier = BoundaryClassifier::new(&snapshot);
        let disabled = block(1, 40.0, 40.0).with_extruder(1);
        let unknown = block(2, 40.0, 40.0).with_extruder(7);
        assert_eq!(classifier.check_node(&disabled), BoundaryState::Outside);
        assert_eq!(classifier.check_node(&unknown), BoundaryState::Outside);
    }

    #[test]
    fn test_other_nodes_stay_unknown() {
        let snapshot = snapshot();
        let scene = vec![SceneNode::other(1).with_children(vec![block(2, 40.0, 40.0)])];
        let result = classify_scene(&scene, &snapshot);
        assert_eq!(result.state(NodeId(1)), BoundaryState::Unknown);
        assert_eq!(result.state(NodeId(2)), BoundaryState::Inside);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_group_forces_descendants_outside() {
        let snapshot = snapshot();
        let inner = SceneNode::group(11, vec![block(3, 40.0, 40.0)]);
        let group = SceneNode::group(
            10,
            vec![block(1, 95.0, -50.0), inner, block(2, -60.0, -60.0)],
        );
        let result = classify_scene(&[group], &snapshot);

        for id in [10, 11, 1, 2, 3] {
            assert!(result.is_outside(NodeId(id)), "node {} should be outside", id);
        }
        assert_eq!(result.outside_nodes().count(), 5);
    }

    #[test]
    fn test_group_inside_keeps_children_inside() {
        let snapshot = snapshot();
        let group = SceneNode::group(10, vec![block(1, 30.0, 30.0), block(2, 50.0, 50.0)]);
        let result = classify_scene(&[group], &snapshot);
        assert_eq!(result.state(NodeId(10)), BoundaryState::Inside);
        assert_eq!(result.state(NodeId(1)), BoundaryState::Inside);
        assert_eq!(result.state(NodeId(2)), BoundaryState::Inside);
    }

    #[test]
    fn test_override_bounds_are_not_lowered() {
        let snapshot = snapshot();
        let tight = Aabb::new(Point3::new(-100.0, 0.0, -100.0), Point3::new(100.0, 200.0, 100.0));
        let sunk = SceneNode::sliceable(
            1,
            Aabb::new(Point3::new(40.0, -5.0, 40.0), Point3::new(50.0, 5.0, 50.0)),
            Polygon::rectangle(40.0, 40.0, 50.0, 50.0),
        );
        assert_eq!(BoundaryClassifier::new(&snapshot).check_node(&sunk), BoundaryState::Inside);
        assert_eq!(
            BoundaryClassifier::with_bounds(&snapshot, tight).check_node(&sunk),
            BoundaryState::Outside
        );
    }
}
