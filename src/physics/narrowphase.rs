//! Narrowphase collision detection: one routine per pair of shape kinds.

use glam::DVec2;

use super::collider::{Aabb, Ball, Collider};
use super::contact::ContactInfo;

/// Order in which the dispatcher handed the operands to a routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOrder {
    /// The first operand is the contact's first shape.
    AsGiven,
    /// The operands were swapped so the rectangle comes first.
    Swapped,
}

/// Sign of `n`, with zero counted as positive.
#[inline]
fn sign(n: f64) -> f64 {
    if n < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// AABB vs AABB.
///
/// The normal lies on the axis of least penetration, X on ties.
pub fn aabb_vs_aabb(a: &Aabb, b: &Aabb) -> Option<ContactInfo> {
    if !a.overlaps(b) {
        return None;
    }

    let distance = b.center() - a.center();
    let overlap = a.half_extents() + b.half_extents() - distance.abs();

    let (normal, penetration) = if overlap.x <= overlap.y {
        (DVec2::new(sign(distance.x), 0.0), overlap.x)
    } else {
        (DVec2::new(0.0, sign(distance.y)), overlap.y)
    };

    Some(ContactInfo {
        normal,
        penetration,
    })
}

/// Circle vs circle. Coincident centers push along +X by the first radius.
pub fn circle_vs_circle(a: &Ball, b: &Ball) -> Option<ContactInfo> {
    let diff = b.center - a.center;
    let dist = diff.length();
    let radius_sum = a.radius + b.radius;

    if dist >= radius_sum {
        return None;
    }

    let (normal, penetration) = if dist != 0.0 {
        (diff / dist, radius_sum - dist)
    } else {
        (DVec2::X, a.radius)
    };

    Some(ContactInfo {
        normal,
        penetration,
    })
}

/// AABB vs circle, rectangle first.
///
/// A circle whose center lies inside the box is pushed out through the face
/// on the dominant axis of the center offset.
pub fn aabb_vs_circle(a: &Aabb, b: &Ball) -> Option<ContactInfo> {
    let box_center = a.center();
    let extent = a.half_extents();

    let n = b.center - box_center;
    let mut closest = n.clamp(-extent, extent);

    let inside = closest == n;
    let mut face_normal = DVec2::ZERO;
    if inside {
        if n.x.abs() > n.y.abs() {
            closest.x = if closest.x > 0.0 { extent.x } else { -extent.x };
            face_normal = DVec2::new(sign(closest.x), 0.0);
        } else {
            closest.y = if closest.y > 0.0 { extent.y } else { -extent.y };
            face_normal = DVec2::new(0.0, sign(closest.y));
        }
    }

    let offset = b.center - (box_center + closest);
    let dist = offset.length();
    if dist > b.radius && !inside {
        return None;
    }

    // A center lying exactly on the face leaves no direction to normalize.
    let normal = match offset.try_normalize() {
        Some(dir) if inside => -dir,
        Some(dir) => dir,
        None => face_normal,
    };

    Some(ContactInfo {
        normal,
        penetration: b.radius - dist,
    })
}

/// Detect collision between two colliders, dispatching on their kinds.
pub fn detect_collision(a: &Collider, b: &Collider) -> Option<(ContactInfo, PairOrder)> {
    match (a, b) {
        (Collider::Aabb(a), Collider::Aabb(b)) => {
            aabb_vs_aabb(a, b).map(|c| (c, PairOrder::AsGiven))
        }
        (Collider::Ball(a), Collider::Ball(b)) => {
            circle_vs_circle(a, b).map(|c| (c, PairOrder::AsGiven))
        }
        (Collider::Aabb(a), Collider::Ball(b)) => {
            aabb_vs_circle(a, b).map(|c| (c, PairOrder::AsGiven))
        }
        (Collider::Ball(a), Collider::Aabb(b)) => {
            aabb_vs_circle(b, a).map(|c| (c, PairOrder::Swapped))
        }
    }
}
