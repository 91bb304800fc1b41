//! Objects stored in the tree.

use glam::Vec2;

/// A payload tagged with the point it is indexed at.
///
/// The payload is meant to be a cheap handle (an id, an index into caller
/// storage, a shared reference). The tree clones the handle into its buffers
/// and into query results; it never inspects, frees or copies the referent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QtObject<T> {
    pub payload: T,
    pub position: Vec2,
}

impl<T> QtObject<T> {
    #[inline]
    pub fn new(payload: T, position: Vec2) -> Self {
        Self { payload, position }
    }

    /// Convenience constructor from raw coordinates.
    #[inline]
    pub fn at(payload: T, x: f32, y: f32) -> Self {
        Self::new(payload, Vec2::new(x, y))
    }
}
