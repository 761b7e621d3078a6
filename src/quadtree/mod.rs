//! Arena-backed quadtree over the bodies of one [`System`](crate::System).
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeIndex`].
//! Each node stores its parent and depth, which is all the
//! [lowest common ancestor](QuadTree::lowest_common_ancestor) query needs.
//! A tree is built once per generation and dropped as a whole afterwards.

mod construction;

pub use construction::MAX_DEPTH;

use crate::{Body, PointMass, Quadrant};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub usize);

/// What a node stands for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeBody {
    /// A leaf bound to the body with this index in the system.
    Real(usize),
    /// An internal node: total mass and center of mass of its subtree.
    Aggregate(PointMass),
}

#[derive(Clone, Debug)]
pub struct TreeNode {
    pub body: NodeBody,
    /// Indexed by [`Direction`](crate::Direction); `None` for empty sub-quadrants.
    pub children: [Option<NodeIndex>; 4],
    pub quadrant: Quadrant,
    pub parent: Option<NodeIndex>,
    pub depth: usize,
}

impl TreeNode {
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    pub fn children(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.children.iter().flatten().copied()
    }
}

#[derive(Clone, Debug, Default)]
pub struct QuadTree {
    nodes: Vec<TreeNode>,
    root: Option<NodeIndex>,
    leaves: Vec<NodeIndex>,
    leaf_of_body: Vec<NodeIndex>,
}

impl QuadTree {
    /// `None` if the tree was built from an empty system.
    #[must_use]
    pub fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    #[must_use]
    pub fn node(&self, index: NodeIndex) -> &TreeNode {
        &self.nodes[index.0]
    }

    #[must_use]
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// One leaf per body, in depth-first order.
    #[must_use]
    pub fn leaves(&self) -> &[NodeIndex] {
        &self.leaves
    }

    /// The leaf bound to body `body`.
    #[must_use]
    pub fn leaf_of(&self, body: usize) -> NodeIndex {
        self.leaf_of_body[body]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth of the deepest node; the root has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Mass and position a node exerts its pull with.
    #[must_use]
    pub fn point_mass(&self, index: NodeIndex, bodies: &[Body]) -> PointMass {
        match self.node(index).body {
            NodeBody::Real(body) => bodies[body].point_mass(),
            NodeBody::Aggregate(point_mass) => point_mass,
        }
    }

    /// The deepest node having both `a` and `b` in its subtree.
    ///
    /// Both nodes share the root, so this always finds a node.
    #[must_use]
    pub fn lowest_common_ancestor(&self, mut a: NodeIndex, mut b: NodeIndex) -> NodeIndex {
        while self.node(a).depth > self.node(b).depth {
            a = self.parent_or_self(a);
        }
        while self.node(b).depth > self.node(a).depth {
            b = self.parent_or_self(b);
        }
        while a != b {
            a = self.parent_or_self(a);
            b = self.parent_or_self(b);
        }
        a
    }

    /// All ancestors of `index` from the root down to `index` itself.
    #[must_use]
    pub fn path_from_root(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut path = vec![index];
        let mut current = index;
        while let Some(parent) = self.node(current).parent {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }

    fn parent_or_self(&self, index: NodeIndex) -> NodeIndex {
        self.node(index).parent.unwrap_or(index)
    }
}
