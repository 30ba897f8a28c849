//! Module containing **Bounding Volume Hierarchy** (BVH) structures
//!
//! These are used to accelerate ray-primitive intersection tests by narrowing the search space,
//! by skipping primitives that obviously can't be intersected.
//!
//! The tree does not own any primitives; object nodes store the index of a primitive in the slice
//! the tree was built from, and that same slice must be passed in when querying.

use getset::CopyGetters;
use indextree::{Arena, NodeId};
use itertools::{zip_eq, Itertools};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tracing::trace;
use valuable::Valuable;

use crate::core::targets::ACCEL;
use crate::core::types::Number;
use crate::object::Primitive;
use crate::shared::aabb::Aabb;
use crate::shared::intersect::Intersection;
use crate::shared::interval::Interval;
use crate::shared::ray::Ray;

/// How a [Bvh] is constructed from a list of primitives
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Display, EnumString, Valuable, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum BvhMode {
    /// A single root node, with every primitive attached directly to it
    #[default]
    Flat,
    /// Bounded primitives are recursively split using the **Surface-Area Heuristic**
    Sah,
}

#[derive(CopyGetters, Clone, Debug)]
pub struct Bvh {
    /// The backing store containing all of our nodes, as well as their hierarchy
    arena: Arena<BvhNode>,
    /// The node of the root in the tree. Always a [BvhNode::Nested]
    #[get_copy = "pub"]
    root_id: NodeId,
}

/// The type for each node in the BVH tree
///
/// Nodes are either a branch point [BvhNode::Nested] (which has children),
/// or a leaf [BvhNode::Object] (the index of a primitive)
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BvhNode {
    // Don't need to keep track of children since the tree does that for us
    Nested(Aabb),
    Object(usize),
}

#[derive(Copy, Clone, Debug)]
enum SplitAxis {
    X,
    Y,
    Z,
}

// region Node operations

impl Bvh {
    /// Creates a tree with only a root node, using the given box
    pub fn new(root_aabb: Aabb) -> Self {
        let mut arena = Arena::new();
        let root_id = arena.new_node(BvhNode::Nested(root_aabb));
        Self { arena, root_id }
    }

    /// Appends a new nested node (with the given box) to the end of the parent's children
    pub fn add_child(&mut self, parent: NodeId, aabb: Aabb) -> NodeId {
        debug_assert!(self.is_nested(parent), "parent node should be nested");
        parent.append_value(BvhNode::Nested(aabb), &mut self.arena)
    }

    /// Attaches the primitive with the given index directly to the parent node
    pub fn add_object(&mut self, parent: NodeId, index: usize) -> NodeId {
        debug_assert!(self.is_nested(parent), "parent node should be nested");
        parent.append_value(BvhNode::Object(index), &mut self.arena)
    }

    pub fn node(&self, id: NodeId) -> Option<&BvhNode> { self.arena.get(id).map(|n| n.get()) }

    /// Children of the node, in the order they were added
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ { id.children(&self.arena) }

    fn is_nested(&self, id: NodeId) -> bool { matches!(self.node(id), Some(BvhNode::Nested(_))) }

    /// Total number of nodes in the tree, both nested and objects
    pub fn node_count(&self) -> usize { self.arena.count() }

    /// Number of object nodes in the tree
    pub fn object_count(&self) -> usize {
        self.arena
            .iter()
            .filter(|n| matches!(n.get(), BvhNode::Object(_)))
            .count()
    }
}

// endregion Node operations

// region Building

impl Bvh {
    pub fn build(mode: BvhMode, primitives: &[Primitive]) -> Self {
        match mode {
            BvhMode::Flat => Self::build_flat(primitives),
            BvhMode::Sah => Self::build_sah(primitives),
        }
    }

    /// A root node spanning all usable space (`±RAY_MAG`), with every primitive attached directly to it, in order
    pub fn build_flat(primitives: &[Primitive]) -> Self {
        puffin::profile_function!();

        let mut bvh = Self::new(Aabb::new_unbounded());
        let root = bvh.root_id;
        for index in 0..primitives.len() {
            bvh.add_object(root, index);
        }
        bvh
    }

    /// A root node spanning all usable space (`±RAY_MAG`). Unbounded primitives are attached directly to the root,
    /// the rest are split into a tree using the **Surface-Area Heuristic** (SAH)
    pub fn build_sah(primitives: &[Primitive]) -> Self {
        puffin::profile_function!();

        let mut bvh = Self::new(Aabb::new_unbounded());
        let root = bvh.root_id;

        let (mut bounded, unbounded): (Vec<usize>, Vec<usize>) =
            (0..primitives.len()).partition(|&i| primitives[i].is_bounded());
        trace!(target: ACCEL, bounded = bounded.len(), unbounded = unbounded.len(), "splitting primitives");

        if !bounded.is_empty() {
            bvh.generate_nodes_sah(root, &mut bounded, primitives);
        }
        for index in unbounded {
            bvh.add_object(root, index);
        }
        bvh
    }

    /// Sorts the given primitive indices along the chosen `axis`, by the lower corner of their bounding boxes.
    /// This sort is stable, so the build is deterministic
    fn sort_along_aabb_axis(axis: SplitAxis, indices: &mut [usize], primitives: &[Primitive]) {
        let axis = match axis {
            SplitAxis::X => 0,
            SplitAxis::Y => 1,
            SplitAxis::Z => 2,
        };
        indices.sort_by(|&a, &b| {
            let (a, b) = (primitives[a].aabb().min()[axis], primitives[b].aabb().min()[axis]);
            Number::total_cmp(&a, &b)
        });
    }

    /// Recursively processes the slice of primitive `indices`, appending the created nodes under `parent`,
    /// until the primitives are exhausted and the tree is created
    ///
    /// # **Surface-Area Heuristics** (SAH)
    /// This method uses SAH to optimise the choice of split position.
    /// It does this by choosing the longest axis, and splitting at the point where the overall surface areas are optimal
    fn generate_nodes_sah(&mut self, parent: NodeId, indices: &mut [usize], primitives: &[Primitive]) {
        let aabb_of = |i: &usize| *primitives[*i].aabb();
        let main_aabb = Aabb::encompass_iter(indices.iter().map(aabb_of));

        // Small groups become a leaf
        if indices.len() <= 2 {
            let leaf = self.add_child(parent, main_aabb);
            for &index in indices.iter() {
                self.add_object(leaf, index);
            }
            return;
        }

        // This is a port of Pete Shirley's SAH build
        // https://psgraphics.blogspot.com/2016/03/a-simple-sah-bvh-build.html

        let n = indices.len();

        // Sort along longest axis
        {
            let max_side = match main_aabb.size().to_array().into_iter().position_max_by(Number::total_cmp) {
                Some(1) => SplitAxis::Y,
                Some(2) => SplitAxis::Z,
                _ => SplitAxis::X,
            };
            Self::sort_along_aabb_axis(max_side, indices, primitives);
        }

        // Boxes in sorted order
        let aabbs = indices.iter().map(aabb_of).collect_vec();

        // Calculate the areas of the left/right AABBs, for each given split position
        let (left_areas, right_areas) = {
            let mut left_areas = vec![0.; n];
            let mut right_areas = vec![0.; n];

            // Calculate the area from the left towards right
            let mut left_aabb = aabbs[0];
            for (area, obj_aabb) in zip_eq(left_areas.iter_mut(), aabbs.iter()) {
                left_aabb = Aabb::encompass(&left_aabb, obj_aabb);
                *area = left_aabb.area();
            }

            // Calculate the area from the right towards the left
            let mut right_aabb = aabbs[n - 1];
            for (area, obj_aabb) in zip_eq(right_areas.iter_mut().rev(), aabbs.iter().rev()) {
                right_aabb = Aabb::encompass(&right_aabb, obj_aabb);
                *area = right_aabb.area();
            }
            (left_areas, right_areas)
        };

        // Find the most optimal split index, using the areas calculated above
        // `left[i]` and `right[i+1]` are the non-overlapping halves when splitting after `i`
        let split_index = zip_eq(&left_areas[..n - 1], &right_areas[1..])
            .enumerate()
            .map(|(i, (&l, &r))| (i as Number * l) + ((n - i - 1) as Number * r))
            .position_min_by(Number::total_cmp)
            .unwrap_or(0);

        let node = self.add_child(parent, main_aabb);
        let (left_split, right_split) = indices.split_at_mut(split_index + 1);
        self.generate_nodes_sah(node, left_split, primitives);
        self.generate_nodes_sah(node, right_split, primitives);
    }
}

// endregion Building

// region Queries

impl Bvh {
    /// Finds the nearest intersection along the ray, out of the primitives stored in the tree.
    ///
    /// `primitives` must be the same slice that the tree was built with
    pub fn intersect<'p>(&self, ray: &Ray, interval: &Interval<Number>, primitives: &'p [Primitive]) -> Option<Intersection<'p>> {
        self.node_intersect(self.root_id, ray, interval, primitives)
    }

    /// Whether any primitive in the tree is hit by the ray. Returns on the first hit found
    pub fn any_hit(&self, ray: &Ray, interval: &Interval<Number>, primitives: &[Primitive]) -> bool {
        self.node_any_hit(self.root_id, ray, interval, primitives)
    }

    /// Given a [NodeId] in the tree, calculates the nearest intersection for the given `ray`
    ///
    /// If the node is a [BvhNode::Object], it passes on the check to the primitive.
    /// Otherwise, if it's a [BvhNode::Nested], it:
    ///     - Bails early if the [Aabb] is missed
    ///     - Intersects all nested child nodes, in order (by calling itself recursively)
    ///     - Intersects all directly attached objects, in order
    ///     - Returns the closest intersection of the above. The first of two equally close hits wins
    fn node_intersect<'p>(
        &self,
        node: NodeId,
        ray: &Ray,
        interval: &Interval<Number>,
        primitives: &'p [Primitive],
    ) -> Option<Intersection<'p>> {
        match self.node(node)? {
            BvhNode::Nested(aabb) => {
                if !aabb.hit(ray) {
                    return None;
                }

                let nested = self.children(node).filter(|&c| self.is_nested(c));
                let objects = self.children(node).filter(|&c| !self.is_nested(c));

                let mut closest: Option<Intersection<'p>> = None;
                for hit in nested
                    .chain(objects)
                    .filter_map(|child| self.node_intersect(child, ray, interval, primitives))
                {
                    if closest.map_or(true, |c| hit.t < c.t) {
                        closest = Some(hit);
                    }
                }
                closest
            }
            BvhNode::Object(index) => primitives.get(*index)?.intersect(ray, interval),
        }
    }

    fn node_any_hit(&self, node: NodeId, ray: &Ray, interval: &Interval<Number>, primitives: &[Primitive]) -> bool {
        match self.node(node) {
            Some(BvhNode::Nested(aabb)) => {
                aabb.hit(ray) && self.children(node).any(|child| self.node_any_hit(child, ray, interval, primitives))
            }
            Some(BvhNode::Object(index)) => primitives.get(*index).is_some_and(|p| p.occludes(ray, interval)),
            None => false,
        }
    }
}

// endregion Queries
