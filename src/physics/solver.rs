//! Impulse resolution and positional correction for single collisions.

use glam::DVec2;
use tracing::trace;

use super::contact::CollisionInfo;
use super::shape::Shape;

/// Fraction of the penetration corrected by [`resolve`].
pub const DEFAULT_CORRECTION_PERCENT: f64 = 0.5;

/// Copy of the state a resolution reads from one participant.
#[derive(Debug, Clone, Copy)]
struct BodyData {
    position: DVec2,
    velocity: DVec2,
    inv_mass: f64,
    elasticity: f64,
    friction: f64,
}

impl BodyData {
    fn from_shape(shape: &Shape) -> Self {
        Self {
            position: shape.position(),
            velocity: shape.velocity(),
            inv_mass: shape.inverse_mass(),
            elasticity: shape.elasticity(),
            friction: shape.friction(),
        }
    }
}

fn read_pair(world: &hecs::World, info: &CollisionInfo) -> Option<(BodyData, BodyData)> {
    let a = world
        .get::<&Shape>(info.first().entity)
        .ok()
        .map(|shape| BodyData::from_shape(&shape))?;
    let b = world
        .get::<&Shape>(info.second().entity)
        .ok()
        .map(|shape| BodyData::from_shape(&shape))?;
    Some((a, b))
}

fn write_back(world: &mut hecs::World, entity: hecs::Entity, position: DVec2, velocity: DVec2) {
    if let Ok(shape) = world.query_one_mut::<&mut Shape>(entity) {
        shape.set_position(position);
        shape.set_velocity(velocity);
    }
}

/// Resolve a collision with an impulse along its normal, a velocity damping
/// by each shape's friction, and a positional correction of
/// `correction_percent` of the penetration.
///
/// Returns `true` if the shapes were changed. Nothing happens when the
/// collision is already resolved, when the shapes are not approaching each
/// other (the check is repeated on every call), or when both have infinite
/// mass. Only a successful call marks the collision resolved.
pub fn resolve(
    info: &mut CollisionInfo,
    world: &mut hecs::World,
    correction_percent: f64,
) -> bool {
    if info.is_resolved() {
        return false;
    }

    let Some((a, b)) = read_pair(world, info) else {
        return false;
    };

    let normal = info.normal();
    let vel_along_normal = (b.velocity - a.velocity).dot(normal);
    if vel_along_normal >= 0.0 {
        trace!(collision = %info, "shapes separating, skipping resolution");
        return false;
    }

    let inv_mass_sum = a.inv_mass + b.inv_mass;
    if inv_mass_sum <= 0.0 {
        trace!(collision = %info, "both shapes immovable, skipping resolution");
        return false;
    }

    let restitution = a.elasticity.min(b.elasticity);
    let j = -(1.0 + restitution) * vel_along_normal / inv_mass_sum;
    let impulse = normal * j;

    let velocity_a = (a.velocity - impulse * a.inv_mass) * (1.0 - a.friction);
    let velocity_b = (b.velocity + impulse * b.inv_mass) * (1.0 - b.friction);

    // Push sinking shapes back out.
    let correction = normal * (info.penetration() / inv_mass_sum * correction_percent);
    let position_a = a.position - correction * a.inv_mass;
    let position_b = b.position + correction * b.inv_mass;

    write_back(world, info.first().entity, position_a, velocity_a);
    write_back(world, info.second().entity, position_b, velocity_b);

    info.set_resolved(true);
    true
}

/// Move both shapes out of penetration in proportion to their inverse mass,
/// leaving velocities untouched.
///
/// Returns `true` if the shapes were moved. Shares the resolved flag with
/// [`resolve`]; two immovable shapes are left as they are.
pub fn separate(info: &mut CollisionInfo, world: &mut hecs::World) -> bool {
    if info.is_resolved() {
        return false;
    }

    let Some((a, b)) = read_pair(world, info) else {
        return false;
    };

    let inv_mass_sum = a.inv_mass + b.inv_mass;
    if inv_mass_sum <= 0.0 {
        trace!(collision = %info, "both shapes immovable, skipping separation");
        return false;
    }

    let push = info.normal() * (info.penetration() / inv_mass_sum);
    write_back(
        world,
        info.first().entity,
        a.position - push * a.inv_mass,
        a.velocity,
    );
    write_back(
        world,
        info.second().entity,
        b.position + push * b.inv_mass,
        b.velocity,
    );

    info.set_resolved(true);
    true
}
