//! QuadTree handle owning the root node.

use glam::Vec2;
use tracing::trace;

use crate::{Boundary, Node, QtObject, QuadTreeConfig, QuadTreeError};

/// Point quadtree for range and proximity queries.
///
/// The tree adapts to the data: a leaf splits into four quadrants once it
/// holds more than `capacity` objects, until `max_depth` is reached. Past
/// that depth a leaf keeps every object it is given and doubles its buffer.
///
/// Not synchronized. Queries only need `&self`, insertion needs `&mut self`,
/// so sharing follows the usual borrow rules (or an `RwLock` around the tree).
#[derive(Clone)]
pub struct QuadTree<T> {
    root: Node<T>,
    config: QuadTreeConfig,
    len: usize,
}

/// Shape summary of a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub nodes: usize,
    pub leaves: usize,
    pub objects: usize,
    /// Deepest node, counting the root as 1.
    pub max_depth: u32,
}

impl<T: Clone> QuadTree<T> {
    /// Create an empty tree covering `boundary` with the default max depth.
    pub fn new(boundary: Boundary, capacity: usize) -> Result<Self, QuadTreeError> {
        Self::with_config(boundary, QuadTreeConfig::new(capacity))
    }

    pub fn with_config(boundary: Boundary, config: QuadTreeConfig) -> Result<Self, QuadTreeError> {
        config.validate()?;
        if !boundary.is_valid() {
            return Err(QuadTreeError::InvalidBoundary {
                center: boundary.center,
                half_extent: boundary.half_extent,
            });
        }

        Ok(Self {
            root: Node::new(boundary, config.capacity, 1)?,
            config,
            len: 0,
        })
    }

    /// Insert an object.
    ///
    /// Returns `Ok(false)` and leaves the tree untouched when the position is
    /// outside the root boundary.
    pub fn insert(&mut self, object: QtObject<T>) -> Result<bool, QuadTreeError> {
        let inserted = self.root.insert(object, self.config.max_depth)?;
        if inserted {
            self.len += 1;
        }
        Ok(inserted)
    }

    /// Find all objects whose position lies inside `region`, edges included.
    pub fn query(&self, region: &Boundary) -> Vec<QtObject<T>> {
        let mut results = Vec::new();
        self.query_into(region, &mut results);
        results
    }

    /// Append all objects inside `region` to `results`.
    ///
    /// Lets callers reuse one buffer across frames. Returns whether `region`
    /// touches the tree at all.
    #[inline]
    pub fn query_into(&self, region: &Boundary, results: &mut Vec<QtObject<T>>) -> bool {
        self.root.query_into(region, results)
    }

    /// Find all objects within `radius` of `center`, edge included.
    pub fn query_radius(&self, center: Vec2, radius: f32) -> Vec<QtObject<T>> {
        let mut results = self.query(&Boundary::from_center(center, radius));
        let radius_sq = radius * radius;
        results.retain(|object| object.position.distance_squared(center) <= radius_sq);
        results
    }

    /// Release every node and buffer.
    ///
    /// Dropping the tree does the same; this only makes the end of its life
    /// explicit.
    pub fn destroy(self) {
        trace!("Destroying quadtree holding {} objects", self.len);
        drop(self);
    }
}

impl<T> QuadTree<T> {
    /// Get the number of objects.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The area covered by the root.
    #[inline]
    pub fn boundary(&self) -> &Boundary {
        self.root.boundary()
    }

    #[inline]
    pub fn config(&self) -> &QuadTreeConfig {
        &self.config
    }

    #[inline]
    pub fn root(&self) -> &Node<T> {
        &self.root
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        self.root.walk(&mut |node| {
            stats.nodes += 1;
            if node.is_leaf() {
                stats.leaves += 1;
            }
            stats.objects += node.objects().len();
            stats.max_depth = stats.max_depth.max(node.depth());
        });
        stats
    }
}

impl<T> std::fmt::Debug for QuadTree<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuadTree")
            .field("items", &self.len)
            .field("bounds", self.root.boundary())
            .field("config", &self.config)
            .finish()
    }
}
