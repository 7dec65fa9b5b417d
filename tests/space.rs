//! Whole-tick scenarios driven through `Space`.

use clash2d::glam::DVec2;
use clash2d::{CollisionError, Shape, Space, SpaceConfig};

const EPS: f64 = 1e-9;

fn floor() -> Shape {
    Shape::rectangle(DVec2::new(0.0, 100.0), 200.0, 20.0)
        .with_static(true)
        .with_tags(["floor"])
}

#[test]
fn test_overlapping_boxes() {
    let mut space = Space::default();
    space.add_shape(Shape::rectangle(DVec2::ZERO, 10.0, 10.0));
    space.add_shape(Shape::rectangle(DVec2::new(5.0, 5.0), 10.0, 10.0));

    space.update();

    let collisions = space.collisions().get_all();
    assert_eq!(collisions.len(), 1);
    assert!((collisions[0].penetration() - 5.0).abs() < EPS);
    assert_eq!(collisions[0].normal(), DVec2::new(1.0, 0.0));
}

#[test]
fn test_overlapping_circles() {
    let mut space = Space::default();
    space.add_shape(Shape::circle(DVec2::ZERO, 5.0));
    space.add_shape(Shape::circle(DVec2::new(3.0, 4.0), 5.0));

    space.update();

    let collisions = space.collisions().get_all();
    assert_eq!(collisions.len(), 1);
    assert!((collisions[0].penetration() - 5.0).abs() < EPS);
    assert!((collisions[0].normal() - DVec2::new(0.6, 0.8)).length() < EPS);
}

#[test]
fn test_grounded_lifecycle() {
    let mut space = Space::new(SpaceConfig {
        gravity: DVec2::new(0.0, 1.0),
        ..Default::default()
    });
    let ground = space.add_shape(floor());
    let body = space.add_shape(Shape::rectangle(DVec2::new(50.0, 90.0), 10.0, 10.0).with_mass(1.0));
    space.apply_gravity();

    // Falls one unit into the floor: contact normal points up the screen.
    space.update();
    let info = &space.collisions().get_all()[0];
    assert_eq!(info.normal(), DVec2::new(0.0, -1.0));
    assert!((info.penetration() - 1.0).abs() < EPS);
    assert!(space.shape(body).unwrap().is_grounded());
    assert!(!space.shape(ground).unwrap().is_grounded());

    // Lifted clear of the floor, the flag is gone after the next tick.
    space
        .shape_mut(body)
        .unwrap()
        .set_position(DVec2::new(50.0, 0.0));
    space.update();
    assert!(space.collisions().is_empty());
    assert!(!space.shape(body).unwrap().is_grounded());
}

#[test]
fn test_resting_on_floor() {
    let mut space = Space::new(SpaceConfig {
        gravity: DVec2::new(0.0, 1.0),
        ..Default::default()
    });
    space.add_shape(floor());
    let body = space.add_shape(Shape::rectangle(DVec2::new(50.0, 90.0), 10.0, 10.0).with_mass(1.0));
    space.apply_gravity();

    space.update();
    assert_eq!(space.resolve_collisions(Some("floor")), 1);

    // Inelastic impulse stops the fall, correction lifts half the overlap.
    let shape = space.shape(body).unwrap();
    assert!(shape.velocity().length() < EPS);
    assert!((shape.position() - DVec2::new(50.0, 90.5)).length() < EPS);
}

#[test]
fn test_elastic_exchange_through_space() {
    let mut space = Space::default();
    let a = space.add_shape(
        Shape::circle(DVec2::ZERO, 2.0)
            .with_mass(1.0)
            .with_elasticity(1.0)
            .with_velocity(DVec2::new(0.5, 0.0)),
    );
    let b = space.add_shape(
        Shape::circle(DVec2::new(3.5, 0.0), 2.0)
            .with_mass(1.0)
            .with_elasticity(1.0)
            .with_velocity(DVec2::new(-0.5, 0.0)),
    );

    space.update();
    assert_eq!(space.resolve_collisions(None), 1);
    assert_eq!(space.resolve_collisions(None), 0);

    assert!((space.shape(a).unwrap().velocity() - DVec2::new(-0.5, 0.0)).length() < EPS);
    assert!((space.shape(b).unwrap().velocity() - DVec2::new(0.5, 0.0)).length() < EPS);
}

#[test]
fn test_infinite_masses_never_resolve() {
    let mut space = Space::default();
    let a = space.add_shape(Shape::rectangle(DVec2::ZERO, 10.0, 10.0).with_velocity(DVec2::X));
    space.add_shape(Shape::rectangle(DVec2::new(5.0, 0.0), 10.0, 10.0));

    space.update();
    assert_eq!(space.collisions().len(), 1);
    assert_eq!(space.resolve_collisions(None), 0);
    assert_eq!(space.separate_collisions(None), 0);
    assert!(!space.collisions().get_all()[0].is_resolved());
    assert_eq!(space.shape(a).unwrap().position(), DVec2::X);
}

#[test]
fn test_separate_then_resolve() {
    let mut space = Space::default();
    let a = space.add_shape(Shape::circle(DVec2::ZERO, 5.0).with_mass(1.0));
    let b = space.add_shape(Shape::circle(DVec2::new(3.0, 4.0), 5.0).with_mass(1.0));

    space.update();
    assert!(space.separate_collision(0));
    assert!(!space.resolve_collision(0));

    // Each circle moved half the penetration along the normal.
    let push = DVec2::new(0.6, 0.8) * 2.5;
    assert!((space.shape(a).unwrap().center() + push).length() < EPS);
    assert!((space.shape(b).unwrap().center() - DVec2::new(3.0, 4.0) - push).length() < EPS);
}

#[test]
fn test_non_solid_shapes_never_collide() {
    let mut space = Space::default();
    space.add_shape(Shape::circle(DVec2::ZERO, 5.0));
    space.add_shape(Shape::circle(DVec2::ZERO, 5.0).with_solid(false));

    space.update();
    assert!(space.collisions().is_empty());
}

#[test]
fn test_static_shapes_do_not_move() {
    let mut space = Space::new(SpaceConfig {
        gravity: DVec2::new(0.0, 3.0),
        ..Default::default()
    });
    let wall = space.add_shape(
        Shape::rectangle(DVec2::new(1.0, 1.0), 5.0, 5.0)
            .with_static(true)
            .with_velocity(DVec2::new(2.0, 0.0)),
    );
    space.apply_gravity();

    for _ in 0..10 {
        space.update();
    }

    let shape = space.shape(wall).unwrap();
    assert_eq!(shape.position(), DVec2::new(1.0, 1.0));
    assert_eq!(shape.gravity(), DVec2::new(0.0, 3.0));
}

#[test]
fn test_tag_filtered_resolution() {
    let mut space = Space::default();
    let player = space.add_shape(
        Shape::circle(DVec2::ZERO, 5.0)
            .with_mass(1.0)
            .with_tags(["player"])
            .with_velocity(DVec2::new(0.5, 0.0)),
    );
    let enemy = space.add_shape(Shape::circle(DVec2::new(8.0, 0.0), 5.0).with_tags(["enemy"]));
    space.add_shape(
        Shape::rectangle(DVec2::new(100.0, 100.0), 5.0, 5.0)
            .with_mass(1.0)
            .with_tags(["wall"]),
    );
    space.add_shape(
        Shape::rectangle(DVec2::new(102.0, 100.0), 5.0, 5.0)
            .with_mass(1.0)
            .with_velocity(DVec2::new(-1.0, 0.0)),
    );

    space.update();
    let collisions = space.collisions();
    assert_eq!(collisions.len(), 2);
    assert_eq!(collisions.get_tagged("player").len(), 1);
    assert_eq!(collisions.get_tagged("enemy").len(), 1);
    assert_eq!(collisions.get_tagged("wall").len(), 1);
    assert!(collisions.get_tagged("npc").is_empty());

    let info = collisions.get_tagged("enemy")[0];
    assert_eq!(info.get_shape_for_tag("player"), Ok(vec![player]));
    assert_eq!(info.get_shape_for_tag("enemy"), Ok(vec![enemy]));
    assert_eq!(
        info.get_shape_for_tag("wall"),
        Err(CollisionError::TagNotFound("wall".to_owned()))
    );

    assert_eq!(space.resolve_collisions(Some("player")), 1);
    assert!(space.collisions().get_tagged("enemy").is_empty());
    assert_eq!(space.collisions().get_tagged("wall").len(), 1);
}

#[test]
fn test_split_mut_resolves_selected_entries() {
    let mut space = Space::default();
    space.add_shape(Shape::circle(DVec2::ZERO, 5.0).with_mass(1.0).with_tags(["a"]));
    space.add_shape(
        Shape::circle(DVec2::new(6.0, 0.0), 5.0)
            .with_mass(1.0)
            .with_velocity(DVec2::new(-1.0, 0.0)),
    );

    space.update();
    let percent = space.config().correction_percent;
    let (world, collisions) = space.split_mut();
    for info in collisions.get_tagged_mut("a") {
        assert!(info.resolve(world, percent));
    }
    assert!(space.collisions().get_all()[0].is_resolved());
}

#[test]
fn test_removed_shape_leaves_pairs() {
    let mut space = Space::default();
    let a = space.add_shape(Shape::circle(DVec2::ZERO, 5.0));
    let b = space.add_shape(Shape::circle(DVec2::new(1.0, 0.0), 5.0));
    let c = space.add_shape(Shape::circle(DVec2::new(2.0, 0.0), 5.0));

    space.update();
    assert_eq!(space.collisions().len(), 3);

    let name = space.shape(a).unwrap().name().to_owned();
    assert!(space.remove_shape(&name).is_some());
    space.update();

    let collisions = space.collisions().get_all();
    assert_eq!(collisions.len(), 1);
    assert_eq!(collisions[0].first().entity, b);
    assert_eq!(collisions[0].second().entity, c);
}
