//! Axis-aligned rectangle geometry.

use glam::Vec2;

/// Axis-aligned rectangle described by its center and half extents.
///
/// The rectangle is closed: every edge belongs to it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Boundary {
    pub center: Vec2,
    pub half_extent: Vec2,
}

impl Boundary {
    pub const fn new(center: Vec2, half_extent: Vec2) -> Self {
        Self { center, half_extent }
    }

    /// Create a square boundary from center and half size.
    #[inline]
    pub fn from_center(center: Vec2, half_size: f32) -> Self {
        Self::new(center, Vec2::splat(half_size))
    }

    /// Create bounds from two opposite corners.
    #[inline]
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        let lo = min.min(max);
        let hi = min.max(max);
        Self::new((lo + hi) * 0.5, (hi - lo) * 0.5)
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extent
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extent
    }

    /// Get the width of the bounds.
    #[inline]
    pub fn width(&self) -> f32 {
        self.half_extent.x * 2.0
    }

    /// Get the height of the bounds.
    #[inline]
    pub fn height(&self) -> f32 {
        self.half_extent.y * 2.0
    }

    /// Finite center and finite, non-negative half extents.
    pub fn is_valid(&self) -> bool {
        self.center.is_finite()
            && self.half_extent.is_finite()
            && self.half_extent.x >= 0.0
            && self.half_extent.y >= 0.0
    }

    /// Check if a point lies inside the bounds, edges included.
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.center.x - self.half_extent.x
            && point.x <= self.center.x + self.half_extent.x
            && point.y >= self.center.y - self.half_extent.y
            && point.y <= self.center.y + self.half_extent.y
    }

    /// Check if two bounds intersect. Touching edges or corners count.
    #[inline]
    pub fn intersects(&self, other: &Boundary) -> bool {
        let delta = (self.center - other.center).abs();
        let reach = self.half_extent + other.half_extent;
        !(delta.x > reach.x || delta.y > reach.y)
    }

    /// Split into four equal quadrants, ordered NW, SW, NE, SE.
    ///
    /// Uses screen coordinates: y grows downward, so "north" is `-y`.
    pub fn quadrants(&self) -> [Boundary; 4] {
        let half = self.half_extent * 0.5;
        let c = self.center;
        [
            Boundary::new(Vec2::new(c.x - half.x, c.y - half.y), half),
            Boundary::new(Vec2::new(c.x - half.x, c.y + half.y), half),
            Boundary::new(Vec2::new(c.x + half.x, c.y - half.y), half),
            Boundary::new(Vec2::new(c.x + half.x, c.y + half.y), half),
        ]
    }
}
