//! World-space collision geometry derived from shapes.

use glam::DVec2;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: DVec2,
    pub max: DVec2,
}

impl Aabb {
    /// Test whether two AABBs overlap. Touching edges count as overlap.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn half_extents(&self) -> DVec2 {
        (self.max - self.min) * 0.5
    }
}

/// Circle in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub center: DVec2,
    pub radius: f64,
}

/// Collision geometry of a shape, one variant per supported kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collider {
    Aabb(Aabb),
    Ball(Ball),
}
