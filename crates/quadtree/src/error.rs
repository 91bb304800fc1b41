//! Quadtree error types.

use std::collections::TryReserveError;

use glam::Vec2;
use thiserror::Error;

/// Errors that can occur while building or growing a quadtree.
///
/// Geometry checks and queries never fail; only construction and insertion
/// report errors.
#[derive(Debug, Error)]
pub enum QuadTreeError {
    #[error("Node capacity must be at least 1")]
    ZeroCapacity,

    #[error("Invalid boundary: center {center}, half extent {half_extent}")]
    InvalidBoundary { center: Vec2, half_extent: Vec2 },

    #[error("Failed to reserve object buffer: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("Max depth {max_depth} exceeds the limit of {limit}")]
    DepthLimit { max_depth: u32, limit: u32 },
}
