//! Tree configuration.

use serde::{Deserialize, Serialize};

use crate::QuadTreeError;

/// Subdivision depth limit used when none is configured.
pub const DEFAULT_MAX_DEPTH: u32 = 10;

/// Largest accepted `max_depth`. Insertion recurses once per level, and past
/// this many halvings an f32 quadrant no longer separates distinct points.
pub const MAX_DEPTH_LIMIT: u32 = 64;

/// Settings shared by every node of one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuadTreeConfig {
    /// Objects a leaf holds before it tries to subdivide.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Nodes at a depth greater than this never subdivide; their buffers
    /// double instead. The root is at depth 1.
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
}

impl QuadTreeConfig {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn validate(&self) -> Result<(), QuadTreeError> {
        if self.capacity == 0 {
            return Err(QuadTreeError::ZeroCapacity);
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(QuadTreeError::DepthLimit {
                max_depth: self.max_depth,
                limit: MAX_DEPTH_LIMIT,
            });
        }
        Ok(())
    }
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            max_depth: default_max_depth(),
        }
    }
}

fn default_capacity() -> usize {
    4
}
fn default_max_depth() -> u32 {
    DEFAULT_MAX_DEPTH
}
