//! Per-tick integration over every shape in a world.

use glam::DVec2;

use super::shape::Shape;

/// Advance every non-static shape by one tick (see [`Shape::update_pos`]).
pub fn integrate(world: &mut hecs::World) {
    for (_, shape) in world.query_mut::<&mut Shape>() {
        if shape.is_static() {
            continue;
        }
        shape.update_pos();
    }
}

/// Overwrite the per-shape gravity of every shape, static ones included.
pub fn apply_gravity(world: &mut hecs::World, gravity: DVec2) {
    for (_, shape) in world.query_mut::<&mut Shape>() {
        shape.set_gravity(gravity);
    }
}

/// Mark each listed shape as grounded. Infinite-mass shapes and entities no
/// longer in the world are ignored.
pub fn mark_grounded(world: &mut hecs::World, entities: &[hecs::Entity]) {
    for &entity in entities {
        if let Ok(shape) = world.query_one_mut::<&mut Shape>(entity) {
            shape.mark_grounded();
        }
    }
}
