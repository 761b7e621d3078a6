use log::{debug, trace};
use nalgebra::Vector2;

use super::{NodeBody, NodeIndex, QuadTree, TreeNode};
use crate::{Body, Direction, PointMass, Quadrant, Result, SimulationError, System};

/// Subdivision depth at which two bodies sharing a quadrant count as inseparable.
///
/// The quadrant width has shrunk by a factor of 2^128 at this depth.
pub const MAX_DEPTH: usize = 128;

impl QuadTree {
    /// Build the tree for all bodies of `system`.
    ///
    /// Fails with [`SimulationError::NonSeparableBodies`] if two bodies coincide
    /// or cannot be told apart before [`MAX_DEPTH`].
    pub fn new(system: &System) -> Result<Self> {
        let n = system.len();
        let mut tree = Self {
            nodes: Vec::with_capacity(2 * n),
            root: None,
            leaves: Vec::with_capacity(n),
            leaf_of_body: Vec::new(),
        };

        if n == 0 {
            return Ok(tree);
        }

        let indices = (0..n).collect();
        let root = tree.build_node(&system.bodies, indices, system.bounding_quadrant(), None, 0)?;
        tree.root = Some(root);

        tree.leaf_of_body = vec![root; n];
        for &leaf in &tree.leaves {
            if let NodeBody::Real(body) = tree.nodes[leaf.0].body {
                tree.leaf_of_body[body] = leaf;
            }
        }

        debug!(
            "built quadtree: {} bodies, {} nodes, depth {}",
            n,
            tree.nodes.len(),
            tree.depth()
        );

        Ok(tree)
    }

    fn build_node(
        &mut self,
        bodies: &[Body],
        indices: Vec<usize>,
        quadrant: Quadrant,
        parent: Option<NodeIndex>,
        depth: usize,
    ) -> Result<NodeIndex> {
        let index = NodeIndex(self.nodes.len());

        if let [body] = indices.as_slice() {
            self.nodes.push(TreeNode {
                body: NodeBody::Real(*body),
                children: [None; 4],
                quadrant,
                parent,
                depth,
            });
            self.leaves.push(index);
            return Ok(index);
        }

        Self::check_separable(bodies, &indices, depth)?;
        trace!(
            "subdividing quadrant at {:?} (width {}) holding {} bodies",
            quadrant.origin,
            quadrant.width,
            indices.len()
        );

        // Reserve the slot so children can refer to their parent.
        self.nodes.push(TreeNode {
            body: NodeBody::Aggregate(PointMass::new(0., Vector2::zeros())),
            children: [None; 4],
            quadrant,
            parent,
            depth,
        });

        let mut children = [None; 4];
        let mut aggregate = PointMass::new(0., Vector2::zeros());
        for (direction, part) in Direction::ALL
            .into_iter()
            .zip(quadrant.partition(bodies, &indices))
        {
            let Some(part) = part else {
                continue;
            };
            let child = self.build_node(
                bodies,
                part,
                quadrant.sub_quadrant(direction),
                Some(index),
                depth + 1,
            )?;
            aggregate = aggregate.combine(self.point_mass(child, bodies));
            children[direction.index()] = Some(child);
        }

        let node = &mut self.nodes[index.0];
        node.children = children;
        node.body = NodeBody::Aggregate(aggregate);

        Ok(index)
    }

    /// Two or more bodies in one quadrant must be splittable by further subdivision.
    fn check_separable(bodies: &[Body], indices: &[usize], depth: usize) -> Result<()> {
        let first = indices[0];
        let position = bodies[first].position;
        let distinct = indices[1..]
            .iter()
            .find(|&&i| bodies[i].position != position);

        match distinct {
            Some(_) if depth < MAX_DEPTH => Ok(()),
            _ => Err(SimulationError::NonSeparableBodies {
                first,
                second: indices[1],
                depth,
            }),
        }
    }
}
