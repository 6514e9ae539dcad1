//! [`NodeTree`] – arena of named tracking nodes with world poses.
//!
//! The host tracking runtime mirrors its scene hierarchy into this tree and
//! refreshes node poses between ticks.  The manipulation core only ever
//! reads it: anchor resolution walks ancestor/descendant chains, the source
//! classifier consumes [`NodeTree::full_path`], and the per-frame filters
//! sample anchor poses.
//!
//! # Example
//!
//! ```rust
//! use grasp_core::hierarchy::NodeTree;
//! use grasp_math::{Quat, Vec3};
//!
//! let mut tree = NodeTree::new();
//! let rig = tree.insert("XR Origin", None);
//! let hand = tree.insert("Right Hand", Some(rig));
//! tree.set_world_pose(hand, Vec3::new(0.2, 1.0, 0.3), Quat::IDENTITY);
//!
//! assert_eq!(tree.full_path(hand).unwrap(), "xr origin/right hand");
//! ```

use grasp_math::{Quat, Vec3};

/// Opaque handle into a [`NodeTree`].
///
/// Handles are only minted by [`NodeTree::insert`] and stay valid for the
/// lifetime of the tree (nodes are never removed mid-session).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

struct Node {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    position: Vec3,
    orientation: Quat,
}

/// Append-only arena of tracked scene nodes.
#[derive(Default)]
pub struct NodeTree {
    nodes: Vec<Node>,
}

impl NodeTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node under `parent` (or as a root when `None`).
    ///
    /// The node starts at the origin with identity orientation until the
    /// host pushes a real pose via [`NodeTree::set_world_pose`].
    pub fn insert(&mut self, name: &str, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.to_string(),
            parent,
            children: Vec::new(),
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        });
        if let Some(parent) = parent
            && let Some(node) = self.nodes.get_mut(parent.0)
        {
            node.children.push(id);
        }
        id
    }

    /// Refresh a node's world-space pose for the current frame.
    pub fn set_world_pose(&mut self, id: NodeId, position: Vec3, orientation: Quat) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.position = position;
            node.orientation = orientation;
        }
    }

    /// Node name as registered.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id.0).map(|n| n.name.as_str())
    }

    /// Current world position.
    pub fn position(&self, id: NodeId) -> Option<Vec3> {
        self.nodes.get(id.0).map(|n| n.position)
    }

    /// Current world orientation.
    pub fn orientation(&self, id: NodeId) -> Option<Quat> {
        self.nodes.get(id.0).map(|n| n.orientation)
    }

    /// Parent handle, `None` for roots and unknown handles.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    /// Direct children in insertion order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Ancestors of `id`, nearest first (`id` itself excluded).
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.parent(id);
        std::iter::from_fn(move || {
            let next = current?;
            current = self.parent(next);
            Some(next)
        })
    }

    /// All descendants of `id` in depth-first, insertion order
    /// (`id` itself excluded).
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Root-to-leaf node names joined with `/`, lowercased.
    ///
    /// This is the string the source classifier matches its keyword rules
    /// against.
    pub fn full_path(&self, id: NodeId) -> Option<String> {
        self.nodes.get(id.0)?;
        let mut segments = Vec::new();
        let mut current = Some(id);
        // Bounded like the ancestor walks elsewhere: a cycle in host data
        // must not hang the frame.
        let mut hops = 0;
        while let Some(node) = current
            && hops < 32
        {
            let n = &self.nodes[node.0];
            segments.push(n.name.to_lowercase());
            current = n.parent;
            hops += 1;
        }
        segments.reverse();
        Some(segments.join("/"))
    }
}
