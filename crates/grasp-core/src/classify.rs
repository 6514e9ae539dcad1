//! Hierarchy-path → source classification.
//!
//! The tracking runtime names its nodes by an external convention
//! ("RightHand Controller", "Right Hand Visual", …).  Matching those names
//! is fragile coupling by nature, so every keyword rule lives in this one
//! module; nothing else in the crate inspects node names for kind or side.
//!
//! Inputs are the lowercased full hierarchy paths produced by
//! [`NodeTree::full_path`](crate::hierarchy::NodeTree::full_path).

use grasp_types::{Side, SourceKind};

/// Path fragments that mark a source as hand tracking regardless of other
/// content.
const HAND_MARKERS: [&str; 6] = [
    "handquest",
    "hand visual",
    "hand poke",
    "hand near",
    "wrist",
    "palm",
];

/// Decide whether a source path belongs to a tracked hand or a controller.
///
/// A path is a hand when it contains any of the dedicated hand markers, or
/// contains `"hand"` without also containing `"controller"`.  Everything
/// else is a controller.
pub fn classify_kind(path: &str) -> SourceKind {
    let is_hand = HAND_MARKERS.iter().any(|m| path.contains(m))
        || (path.contains("hand") && !path.contains("controller"));
    if is_hand {
        SourceKind::Hand
    } else {
        SourceKind::Controller
    }
}

/// Decide which body side a source path belongs to.
///
/// `"right"` wins over `"left"` when both appear; paths naming neither
/// side cannot drive a grab and yield `None`.
pub fn classify_side(path: &str) -> Option<Side> {
    if path.contains("right") {
        Some(Side::Right)
    } else if path.contains("left") {
        Some(Side::Left)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controller_paths_classify_as_controller() {
        assert_eq!(
            classify_kind("xr origin/camera offset/righthand controller"),
            SourceKind::Controller
        );
    }

    #[test]
    fn hand_markers_classify_as_hand() {
        for path in [
            "xr origin/handquest right",
            "rig/right hand visual/index",
            "rig/hand poke interactor",
            "rig/hand near-far interactor",
            "rig/right wrist",
            "rig/left palm",
        ] {
            assert_eq!(classify_kind(path), SourceKind::Hand, "path={path}");
        }
    }

    #[test]
    fn bare_hand_without_controller_is_hand() {
        assert_eq!(classify_kind("rig/right hand"), SourceKind::Hand);
    }

    #[test]
    fn hand_containing_controller_is_controller() {
        // "LeftHand Controller" style rigs name controller nodes with "hand".
        assert_eq!(
            classify_kind("rig/lefthand controller"),
            SourceKind::Controller
        );
    }

    #[test]
    fn side_is_taken_from_path() {
        assert_eq!(classify_side("rig/right hand"), Some(Side::Right));
        assert_eq!(classify_side("rig/lefthand controller"), Some(Side::Left));
        assert_eq!(classify_side("rig/gaze interactor"), None);
    }
}
