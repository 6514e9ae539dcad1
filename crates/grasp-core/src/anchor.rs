//! Hand-root anchor resolution.
//!
//! Raw interactor proxies jitter and sit at arbitrary offsets, so hand-path
//! filtering samples a *tracking anchor* instead: the most stable,
//! anatomically meaningful node reachable from the grabbing source.
//! Resolution is a two-stage heuristic search over the source's hierarchy:
//! first up to the owning hand node, then down to a prioritized tracking
//! point beneath it.  Every fallback keeps the result usable — resolution
//! never fails outright.

use tracing::debug;

use crate::hierarchy::{NodeId, NodeTree};
use grasp_math::Vec3;

/// Upper bound on the ancestor walk.  Rig hierarchies are shallow; anything
/// deeper is a malformed path and stops at the bound.
const MAX_ANCESTOR_HOPS: usize = 15;

/// Descendant names that indicate a stable tracking point, roughly ordered
/// from most to least preferred by the conventions of common hand rigs.
const TRACKING_POINT_MARKERS: [&str; 6] = [
    "aim pose",
    "pinch point",
    "pinch grab",
    "wrist",
    "palm",
    "stabilized",
];

/// Ancestor names carrying these fragments are interactor/visual/tracking
/// proxies, not the hand itself.
const PROXY_MARKERS: [&str; 3] = ["interactor", "visual", "tracking"];

/// Resolve the tracking anchor for `source`.
///
/// 1. Walk ancestors (bounded) for a node named `"right hand"` /
///    `"left hand"` that is not a proxy.
/// 2. Without one, fall back to the immediate parent, then `source` itself.
/// 3. From the hand node, return the first descendant whose name contains a
///    tracking-point marker and whose position is away from the zero-origin
///    sentinel; otherwise the hand node itself.
pub fn resolve_anchor(tree: &NodeTree, source: NodeId) -> NodeId {
    let Some(hand) = find_hand_parent(tree, source) else {
        let fallback = tree.parent(source).unwrap_or(source);
        debug!(
            source = tree.name(source).unwrap_or("?"),
            "no hand parent found, falling back to immediate parent"
        );
        return fallback;
    };

    for candidate in tree.descendants(hand) {
        let Some(name) = tree.name(candidate) else {
            continue;
        };
        let name = name.to_lowercase();
        if !TRACKING_POINT_MARKERS.iter().any(|m| name.contains(m)) {
            continue;
        }
        // A node still parked at the origin has not received tracking data
        // this session and would anchor the filters to garbage.
        if tree.position(candidate) != Some(Vec3::ZERO) {
            debug!(anchor = %name, "resolved tracking anchor");
            return candidate;
        }
    }

    debug!(
        hand = tree.name(hand).unwrap_or("?"),
        "no tracking point beneath hand, anchoring to the hand node"
    );
    hand
}

fn find_hand_parent(tree: &NodeTree, source: NodeId) -> Option<NodeId> {
    std::iter::once(source)
        .chain(tree.ancestors(source))
        .take(MAX_ANCESTOR_HOPS)
        .find(|&node| {
            let Some(name) = tree.name(node) else {
                return false;
            };
            let name = name.to_lowercase();
            let is_hand = name.contains("right hand") || name.contains("left hand");
            let is_proxy = PROXY_MARKERS.iter().any(|m| name.contains(m));
            is_hand && !is_proxy
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use grasp_math::Quat;

    fn pose(tree: &mut NodeTree, id: NodeId, x: f32, y: f32, z: f32) {
        tree.set_world_pose(id, Vec3::new(x, y, z), Quat::IDENTITY);
    }

    #[test]
    fn resolves_wrist_under_hand_parent() {
        let mut tree = NodeTree::new();
        let root = tree.insert("XR Origin", None);
        let hand = tree.insert("Right Hand", Some(root));
        let wrist = tree.insert("Wrist", Some(hand));
        pose(&mut tree, wrist, 0.2, 1.0, 0.3);

        assert_eq!(resolve_anchor(&tree, hand), wrist);
    }

    #[test]
    fn resolves_from_interactor_leaf() {
        // The interactor node itself says "right hand" but is a proxy; the
        // walk must pass it and land on the real hand parent's wrist.
        let mut tree = NodeTree::new();
        let root = tree.insert("XR Origin", None);
        let hand = tree.insert("Right Hand", Some(root));
        let interactor = tree.insert("Right Hand Interactor", Some(hand));
        let wrist = tree.insert("Wrist", Some(hand));
        pose(&mut tree, wrist, 0.2, 1.0, 0.3);

        assert_eq!(resolve_anchor(&tree, interactor), wrist);
    }

    #[test]
    fn origin_parked_tracking_points_are_skipped() {
        let mut tree = NodeTree::new();
        let root = tree.insert("XR Origin", None);
        let hand = tree.insert("Left Hand", Some(root));
        let _cold_wrist = tree.insert("Wrist", Some(hand)); // still at origin
        let palm = tree.insert("Palm", Some(hand));
        pose(&mut tree, palm, -0.2, 1.0, 0.3);

        assert_eq!(resolve_anchor(&tree, hand), palm);
    }

    #[test]
    fn falls_back_to_hand_parent_without_tracking_points() {
        let mut tree = NodeTree::new();
        let root = tree.insert("XR Origin", None);
        let hand = tree.insert("Right Hand", Some(root));
        let interactor = tree.insert("Grab Interactor", Some(hand));

        assert_eq!(resolve_anchor(&tree, interactor), hand);
    }

    #[test]
    fn falls_back_to_parent_then_self_without_hand() {
        let mut tree = NodeTree::new();
        let root = tree.insert("XR Origin", None);
        let source = tree.insert("RightHand Controller", Some(root));
        // No "right hand" ancestor: fall back to the immediate parent.
        assert_eq!(resolve_anchor(&tree, source), root);

        let mut lone = NodeTree::new();
        let orphan = lone.insert("RightHand Controller", None);
        assert_eq!(resolve_anchor(&lone, orphan), orphan);
    }

    #[test]
    fn ancestor_walk_is_bounded() {
        let mut tree = NodeTree::new();
        let mut current = tree.insert("Right Hand", None);
        // Bury the hand node deeper than the walk bound.
        for i in 0..20 {
            current = tree.insert(&format!("Node {i}"), Some(current));
        }
        let resolved = resolve_anchor(&tree, current);
        // Hand parent unreachable within the bound: immediate parent wins.
        assert_eq!(resolved, tree.parent(current).unwrap());
    }
}
