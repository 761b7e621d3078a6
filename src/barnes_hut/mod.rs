use nalgebra::Vector2;

use crate::{
    quadtree::{NodeIndex, QuadTree},
    Body, Gravity, PointMass, Result, SimulationError, System,
};

/// The Barnes-Hut force evaluator.
///
/// An internal node is treated as a single point mass when `s / d < theta`,
/// where `s` is the width of the quadrant of the lowest common ancestor of the
/// evaluated leaf and the node, and `d` is the distance from the leaf's body to the
/// node's center of mass. `theta = 0` always descends and gives the exact sum.
/// Ancestors of the evaluated leaf are never approximated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarnesHut {
    theta: f64,
    gravity: Gravity,
}

impl BarnesHut {
    pub fn new(theta: f64, gravity: Gravity) -> Result<Self> {
        if !theta.is_finite() || theta < 0. {
            return Err(SimulationError::InvalidTheta(theta));
        }
        if !gravity.g.is_finite() || gravity.g <= 0. {
            return Err(SimulationError::InvalidGravitationalConstant(gravity.g));
        }
        Ok(Self { theta, gravity })
    }

    #[must_use]
    pub fn theta(&self) -> f64 {
        self.theta
    }

    #[must_use]
    pub fn gravity(&self) -> &Gravity {
        &self.gravity
    }

    /// Net force on the body bound to `leaf`.
    pub fn net_force(
        &self,
        tree: &QuadTree,
        bodies: &[Body],
        leaf: NodeIndex,
    ) -> Result<Vector2<f64>> {
        let Some(root) = tree.root() else {
            return Ok(Vector2::zeros());
        };
        let target = tree.point_mass(leaf, bodies);
        self.force_from(tree, bodies, leaf, &target, root)
    }

    /// Net forces on all bodies, in body order.
    pub fn net_forces(&self, tree: &QuadTree, system: &System) -> Result<Vec<Vector2<f64>>> {
        (0..system.len())
            .map(|i| self.net_force(tree, &system.bodies, tree.leaf_of(i)))
            .collect()
    }

    fn force_from(
        &self,
        tree: &QuadTree,
        bodies: &[Body],
        leaf: NodeIndex,
        target: &PointMass,
        node: NodeIndex,
    ) -> Result<Vector2<f64>> {
        // no self-interaction
        if node == leaf {
            return Ok(Vector2::zeros());
        }

        let source = tree.point_mass(node, bodies);
        let tree_node = tree.node(node);
        if tree_node.is_leaf() {
            return self.gravity.force(target, &source);
        }

        let ancestor = tree.lowest_common_ancestor(leaf, node);
        let s = tree.node(ancestor).quadrant.width;
        let d = (source.position - target.position).norm();

        // The aggregate of an ancestor contains the body itself and is always opened.
        if ancestor != node && s / d < self.theta {
            // far enough away, use the aggregate
            self.gravity.force(target, &source)
        } else {
            // near field, go deeper into tree
            let mut force = Vector2::zeros();
            for child in tree_node.children() {
                force += self.force_from(tree, bodies, leaf, target, child)?;
            }
            Ok(force)
        }
    }
}
