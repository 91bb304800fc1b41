//! Point quadtree.
//!
//! This crate contains:
//! - Rectangle geometry (`Boundary`)
//! - Point-tagged objects (`QtObject`)
//! - The recursive node structure and the `QuadTree` handle
//!   (adaptive subdivision, depth-bounded growth, pruned range queries)

mod boundary;
mod config;
mod error;
mod node;
mod object;
mod tree;

pub use boundary::Boundary;
pub use config::{DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT, QuadTreeConfig};
pub use error::QuadTreeError;
pub use node::Node;
pub use object::QtObject;
pub use tree::{QuadTree, TreeStats};

/// 2D point type used for positions and extents.
pub type Position = glam::Vec2;
