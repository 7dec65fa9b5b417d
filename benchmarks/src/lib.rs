//! Scene setup shared by the benchmarks.

use anyhow::{ensure, Result};
use clash2d::physics::contact::{CollisionInfo, ContactInfo, Participant};
use clash2d::{hecs, Shape, Space, SpaceConfig};
use glam::DVec2;

/// Gravity used by every falling scene, in units per tick.
pub const GRAVITY: DVec2 = DVec2::new(0.0, 0.5);

/// A static floor with `n` alternating circles and boxes stacked in a grid
/// above it, gravity applied.
pub fn setup_falling_scene(n: usize) -> Result<Space> {
    ensure!(n > 0, "scene needs at least one body");

    let columns = (n as f64).sqrt().ceil() as usize;
    let mut space = Space::new(SpaceConfig {
        gravity: GRAVITY,
        ..Default::default()
    });

    let width = columns as f64 * 12.0;
    space.add_shape(
        Shape::rectangle(DVec2::new(-10.0, 0.0), width + 20.0, 20.0)
            .with_static(true)
            .with_tags(["floor"]),
    );

    for i in 0..n {
        let x = (i % columns) as f64 * 12.0;
        let y = -10.0 - (i / columns) as f64 * 12.0;
        let body = if i % 2 == 0 {
            Shape::circle(DVec2::new(x + 5.0, y - 5.0), 5.0)
        } else {
            Shape::rectangle(DVec2::new(x, y - 10.0), 10.0, 10.0)
        };
        space.add_shape(
            body.with_mass(1.0)
                .with_elasticity(0.2)
                .with_friction(0.1)
                .with_tags(["body"]),
        );
    }

    space.apply_gravity();
    Ok(space)
}

/// `n` circles spread far apart: every pair is tested, none collide.
pub fn setup_sparse_scene(n: usize) -> Space {
    let mut space = Space::default();
    for i in 0..n {
        space.add_shape(Shape::circle(DVec2::new(i as f64 * 10.0, 0.0), 1.0));
    }
    space
}

/// `n` head-on collisions between unit-mass circles, detached from any
/// space. Returns the world holding the shapes and the collisions.
pub fn setup_collisions(n: usize) -> (hecs::World, Vec<CollisionInfo>) {
    let mut world = hecs::World::new();
    let contact = ContactInfo {
        normal: DVec2::X,
        penetration: 0.5,
    };

    let infos = (0..n)
        .map(|i| {
            let y = i as f64 * 10.0;
            let a = Shape::circle(DVec2::new(0.0, y), 1.0)
                .with_mass(1.0)
                .with_elasticity(0.5)
                .with_velocity(DVec2::new(1.0, 0.0));
            let b = Shape::circle(DVec2::new(1.5, y), 1.0)
                .with_mass(1.0)
                .with_elasticity(0.5)
                .with_velocity(DVec2::new(-1.0, 0.0));
            let first = Participant::new(world.spawn((a.clone(),)), &a);
            let second = Participant::new(world.spawn((b.clone(),)), &b);
            CollisionInfo::new(first, second, contact)
        })
        .collect();

    (world, infos)
}

/// Step `space` for `ticks` ticks, resolving every collision after each one.
/// Returns the total number of resolved collisions.
pub fn run_ticks(space: &mut Space, ticks: usize) -> usize {
    (0..ticks)
        .map(|_| {
            space.update();
            space.resolve_collisions(None)
        })
        .sum()
}
