//! Recursive quadtree nodes.
//!
//! A node is a leaf while it has no children and holds objects directly.
//! Subdivision turns it into an internal node with exactly four children
//! (NW, SW, NE, SE) and an empty buffer; that transition happens once and is
//! never undone.

use glam::Vec2;
use tracing::{debug, trace};

use crate::{Boundary, QtObject, QuadTreeError};

/// A single node of a [`QuadTree`](crate::QuadTree).
#[derive(Debug, Clone)]
pub struct Node<T> {
    boundary: Boundary,
    objects: Vec<QtObject<T>>,
    capacity: usize,
    depth: u32,
    children: Option<Box<[Node<T>; 4]>>,
}

impl<T> Node<T> {
    /// Create an empty leaf with room for `capacity` objects.
    pub(crate) fn new(
        boundary: Boundary,
        capacity: usize,
        depth: u32,
    ) -> Result<Self, QuadTreeError> {
        if capacity == 0 {
            return Err(QuadTreeError::ZeroCapacity);
        }
        let mut objects = Vec::new();
        objects.try_reserve_exact(capacity)?;

        Ok(Self {
            boundary,
            objects,
            capacity,
            depth,
            children: None,
        })
    }

    #[inline]
    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    /// Objects held directly by this node. Always empty for internal nodes.
    #[inline]
    pub fn objects(&self) -> &[QtObject<T>] {
        &self.objects
    }

    /// Objects this leaf accepts before subdividing or growing.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 1 at the root, parent depth + 1 below.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The four children in NW, SW, NE, SE order, if subdivided.
    #[inline]
    pub fn children(&self) -> Option<&[Node<T>; 4]> {
        self.children.as_deref()
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Insert an object, subdividing or growing as needed.
    ///
    /// Returns `Ok(false)` when the position lies outside this node.
    pub(crate) fn insert(
        &mut self,
        object: QtObject<T>,
        max_depth: u32,
    ) -> Result<bool, QuadTreeError>
    where
        T: Clone,
    {
        if !self.boundary.contains(object.position) {
            return Ok(false);
        }
        self.insert_within(object, max_depth)?;
        Ok(true)
    }

    /// Insert an object the parent has already routed here.
    fn insert_within(&mut self, object: QtObject<T>, max_depth: u32) -> Result<(), QuadTreeError>
    where
        T: Clone,
    {
        if let Some(children) = self.children.as_deref_mut() {
            return place(children, &self.boundary, object, max_depth);
        }

        if self.objects.len() < self.capacity {
            self.objects.push(object);
            return Ok(());
        }

        if self.depth <= max_depth {
            self.subdivide(max_depth)?;
            if let Some(children) = self.children.as_deref_mut() {
                place(children, &self.boundary, object, max_depth)?;
            }
            return Ok(());
        }

        self.grow()?;
        self.objects.push(object);
        Ok(())
    }

    /// Split into four quadrants and push every buffered object down.
    ///
    /// The node is only modified once every object has found a child, so an
    /// allocation failure leaves it as it was.
    fn subdivide(&mut self, max_depth: u32) -> Result<(), QuadTreeError>
    where
        T: Clone,
    {
        let [nw, sw, ne, se] = self.boundary.quadrants();
        let depth = self.depth + 1;
        let mut children = Box::new([
            Node::new(nw, self.capacity, depth)?,
            Node::new(sw, self.capacity, depth)?,
            Node::new(ne, self.capacity, depth)?,
            Node::new(se, self.capacity, depth)?,
        ]);

        for object in &self.objects {
            place(&mut children, &self.boundary, object.clone(), max_depth)?;
        }

        trace!(
            "Subdivided node at depth {} ({} objects pushed down)",
            self.depth,
            self.objects.len()
        );
        self.objects = Vec::new();
        self.children = Some(children);
        Ok(())
    }

    /// Double the buffer of a leaf that may no longer subdivide.
    fn grow(&mut self) -> Result<(), QuadTreeError> {
        let capacity = self.capacity.saturating_mul(2);
        self.objects.try_reserve_exact(capacity - self.objects.len())?;
        debug!(
            "Reached maximum depth at depth {}, growing buffer {} -> {}",
            self.depth, self.capacity, capacity
        );
        self.capacity = capacity;
        Ok(())
    }

    /// Append every object inside `region` to `results`.
    ///
    /// Returns whether this node's boundary intersects `region`; subtrees
    /// that miss it are skipped without scanning.
    pub(crate) fn query_into(&self, region: &Boundary, results: &mut Vec<QtObject<T>>) -> bool
    where
        T: Clone,
    {
        if !self.boundary.intersects(region) {
            return false;
        }

        results.extend(
            self.objects
                .iter()
                .filter(|object| region.contains(object.position))
                .cloned(),
        );

        if let Some(children) = &self.children {
            for child in children.iter() {
                child.query_into(region, results);
            }
        }
        true
    }

    /// Visit this node and all of its descendants, parents first.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Node<T>)) {
        f(self);
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.walk(f);
            }
        }
    }
}

/// Hand an object to the first child (NW, SW, NE, SE) that contains it.
///
/// Points on a shared split line go to the earliest matching quadrant. The
/// quadrant edges are recomputed in f32 and can miss a point the parent
/// accepted by an ulp; such a point goes to the quadrant on its side of the
/// parent's center.
fn place<T: Clone>(
    children: &mut [Node<T>; 4],
    parent: &Boundary,
    object: QtObject<T>,
    max_depth: u32,
) -> Result<(), QuadTreeError> {
    let position = object.position;
    let index = match children.iter().position(|child| child.boundary.contains(position)) {
        Some(index) => index,
        None => {
            let index = quadrant_of(parent.center, position);
            trace!("Point {} missed every quadrant, using quadrant {}", position, index);
            index
        }
    };
    children[index].insert_within(object, max_depth)
}

/// Quadrant index (NW, SW, NE, SE) of `position` relative to `center`.
#[inline]
fn quadrant_of(center: Vec2, position: Vec2) -> usize {
    (usize::from(position.x > center.x) << 1) | usize::from(position.y > center.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(capacity: usize) -> Node<u32> {
        Node::new(Boundary::from_center(Vec2::ZERO, 100.0), capacity, 1).unwrap()
    }

    #[test]
    fn test_new_leaf() {
        let node = root(4);
        assert!(node.is_leaf());
        assert_eq!(node.depth(), 1);
        assert_eq!(node.capacity(), 4);
        assert!(node.objects().is_empty());
        assert!(node.children().is_none());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = Node::<u32>::new(Boundary::from_center(Vec2::ZERO, 1.0), 0, 1);
        assert!(matches!(result, Err(QuadTreeError::ZeroCapacity)));
    }

    #[test]
    fn test_insert_outside_is_rejected() {
        let mut node = root(4);
        assert!(!node.insert(QtObject::at(1, 500.0, 500.0), 10).unwrap());
        assert!(node.objects().is_empty());
    }

    #[test]
    fn test_overflow_subdivides() {
        let mut node = root(4);
        let points = [(10.0, 10.0), (12.0, 12.0), (-10.0, -10.0), (10.0, -10.0), (-10.0, 10.0)];
        for (id, (x, y)) in points.into_iter().enumerate() {
            assert!(node.insert(QtObject::at(id as u32, x, y), 10).unwrap());
        }

        assert!(!node.is_leaf());
        assert!(node.objects().is_empty());

        let children = node.children().unwrap();
        let ids: Vec<Vec<u32>> = children
            .iter()
            .map(|c| c.objects().iter().map(|o| o.payload).collect())
            .collect();
        // NW (-x,-y), SW (-x,+y), NE (+x,-y), SE (+x,+y)
        assert_eq!(ids, vec![vec![2], vec![4], vec![3], vec![0, 1]]);

        for child in children {
            assert_eq!(child.depth(), 2);
            assert_eq!(child.capacity(), 4);
            assert!(child.is_leaf());
        }
    }

    #[test]
    fn test_split_line_goes_to_first_quadrant() {
        let mut node = root(1);
        node.insert(QtObject::at(0, 0.0, 0.0), 10).unwrap();
        node.insert(QtObject::at(1, 0.0, 50.0), 10).unwrap();

        let children = node.children().unwrap();
        // The center touches all four quadrants; NW wins.
        assert_eq!(children[0].objects()[0].payload, 0);
        // (0, 50) sits on the vertical split between SW and SE; SW wins.
        assert_eq!(children[1].objects()[0].payload, 1);
        assert!(children[2].objects().is_empty());
        assert!(children[3].objects().is_empty());
    }

    #[test]
    fn test_quadrant_of_follows_child_order() {
        let c = Vec2::new(1.0, 1.0);
        assert_eq!(quadrant_of(c, Vec2::new(0.0, 0.0)), 0);
        assert_eq!(quadrant_of(c, Vec2::new(0.0, 2.0)), 1);
        assert_eq!(quadrant_of(c, Vec2::new(2.0, 0.0)), 2);
        assert_eq!(quadrant_of(c, Vec2::new(2.0, 2.0)), 3);
        assert_eq!(quadrant_of(c, c), 0);
    }

    #[test]
    fn test_rounded_corners_reach_their_quadrant() {
        // 0.9 and 0.39 are not exact in f32, so the quadrant edges drift.
        let boundary = Boundary::from_center(Vec2::splat(0.9), 0.39);
        let mut node = Node::new(boundary, 2, 1).unwrap();
        for id in 0..2 {
            assert!(node.insert(QtObject::new(id, boundary.min()), 10).unwrap());
        }
        assert!(node.insert(QtObject::new(2, boundary.max()), 10).unwrap());

        let children = node.children().unwrap();
        assert_eq!(children[0].objects().len(), 2);
        assert!(children[1].objects().is_empty());
        assert!(children[2].objects().is_empty());
        assert_eq!(children[3].objects()[0].payload, 2);
    }

    #[test]
    fn test_max_depth_leaf_doubles() {
        let mut node = root(2);
        // Coincident points can never be separated by splitting.
        for id in 0..3 {
            node.insert(QtObject::at(id, 7.0, 7.0), 1).unwrap();
        }

        let children = node.children().unwrap();
        let se = &children[3];
        assert_eq!(se.depth(), 2);
        assert!(se.is_leaf());
        assert_eq!(se.objects().len(), 3);
        assert_eq!(se.capacity(), 4);

        node.insert(QtObject::at(3, 7.0, 7.0), 1).unwrap();
        node.insert(QtObject::at(4, 7.0, 7.0), 1).unwrap();
        let se = &node.children().unwrap()[3];
        assert_eq!(se.objects().len(), 5);
        assert_eq!(se.capacity(), 8);
    }

    #[test]
    fn test_query_prunes_disjoint_nodes() {
        let mut node = root(4);
        node.insert(QtObject::at(1, 1.0, 1.0), 10).unwrap();

        let mut results = Vec::new();
        let far = Boundary::from_center(Vec2::new(1000.0, 1000.0), 10.0);
        assert!(!node.query_into(&far, &mut results));
        assert!(results.is_empty());

        let empty_corner = Boundary::from_center(Vec2::new(90.0, 90.0), 5.0);
        assert!(node.query_into(&empty_corner, &mut results));
        assert!(results.is_empty());
    }

    #[test]
    fn test_walk_visits_parents_first() {
        let mut node = root(1);
        node.insert(QtObject::at(0, -50.0, -50.0), 10).unwrap();
        node.insert(QtObject::at(1, 50.0, 50.0), 10).unwrap();

        let mut depths = Vec::new();
        node.walk(&mut |n| depths.push(n.depth()));
        assert_eq!(depths, vec![1, 2, 2, 2, 2]);
    }
}
