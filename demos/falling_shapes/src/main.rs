//! Falling Shapes Demo - headless host loop
//!
//! Shapes fall onto a static floor under space gravity; the host resolves
//! collisions every tick and reports which shapes are grounded.
//!
//! RUST_LOG=debug cargo run --manifest-path demos/falling_shapes/Cargo.toml

use anyhow::{Context, Result};
use clash2d::{Shape, Space, SpaceConfig};
use glam::DVec2;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Ticks to simulate
const TICKS: usize = 120;
/// Number of falling shapes
const BODIES: usize = 6;
/// Floor top edge
const FLOOR_Y: f64 = 200.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let mut space = Space::new(SpaceConfig {
        gravity: DVec2::new(0.0, 0.5),
        ..Default::default()
    });

    // Floor goes first so it is the first shape of every floor contact.
    space.add_shape(
        Shape::rectangle(DVec2::new(0.0, FLOOR_Y), 400.0, 20.0)
            .with_static(true)
            .with_tags(["floor"]),
    );

    let mut names = Vec::with_capacity(BODIES);
    for i in 0..BODIES {
        let x = 30.0 + i as f64 * 60.0;
        let y = 20.0 + i as f64 * 15.0;
        let body = if i % 2 == 0 {
            Shape::circle(DVec2::new(x, y), 12.0)
        } else {
            Shape::rectangle(DVec2::new(x - 12.0, y - 12.0), 24.0, 24.0)
        };
        let body = body
            .with_mass(1.0 + i as f64)
            .with_elasticity(0.3)
            .with_friction(0.05)
            .with_tags(["body"]);
        names.push(body.name().to_owned());
        space.add_shape(body);
    }

    space.apply_gravity();

    for tick in 0..TICKS {
        space.update();
        let collisions = space.collisions().len();
        let resolved = space.resolve_collisions(None);

        let grounded = space
            .shapes()
            .iter()
            .filter(|&&entity| space.shape(entity).map_or(false, |shape| shape.is_grounded()))
            .count();

        if tick % 20 == 0 || tick == TICKS - 1 {
            info!(tick, collisions, resolved, grounded, "tick");
        }
    }

    for name in &names {
        let entity = space
            .shape_by_name(name)
            .with_context(|| format!("shape {name} vanished from the space"))?;
        let shape = space
            .shape(entity)
            .with_context(|| format!("shape {name} has no state"))?;
        info!(
            kind = shape.kind().kind_name(),
            position = %shape.position(),
            velocity = %shape.velocity(),
            grounded = shape.is_grounded(),
            "final state"
        );
    }

    Ok(())
}
