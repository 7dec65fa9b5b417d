//! Shapes tracked by a [`Space`](super::Space).
//!
//! A [`Shape`] carries the kinematic and material state shared by every kind
//! plus a [`ShapeKind`] holding the kind-specific geometry.

use glam::DVec2;

use crate::util::id::uuid;

use super::collider::{Aabb, Ball, Collider};

/// Rectangle geometry. The shape's position is its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub width: f64,
    pub height: f64,
}

/// Circle geometry. The center is kept in sync with the shape's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius: f64,
    center: DVec2,
}

impl Circle {
    #[inline]
    pub fn center(&self) -> DVec2 {
        self.center
    }
}

/// Closed set of supported shape kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    Rectangle(Rectangle),
    Circle(Circle),
}

impl ShapeKind {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle(_) => "Rectangle",
            ShapeKind::Circle(_) => "Circle",
        }
    }
}

/// A collidable shape.
#[derive(Debug, Clone)]
pub struct Shape {
    name: String,
    tags: Vec<String>,
    kind: ShapeKind,
    position: DVec2,
    velocity: DVec2,
    acceleration: DVec2,
    gravity: DVec2,
    /// Velocity bound, ignored unless both components are positive.
    max_velocity: DVec2,
    /// Acceleration bound, ignored unless both components are positive.
    max_acceleration: DVec2,
    grounded: bool,
    is_static: bool,
    solid: bool,
    mass: f64,
    inverse_mass: f64,
    /// Coefficient of restitution (0.0 - 1.0).
    elasticity: f64,
    /// Velocity scaling applied on resolution (0.0 - 1.0).
    friction: f64,
}

impl Shape {
    fn new(position: DVec2, kind: ShapeKind) -> Self {
        Self {
            name: uuid(),
            tags: Vec::new(),
            kind,
            position,
            velocity: DVec2::ZERO,
            acceleration: DVec2::ZERO,
            gravity: DVec2::ZERO,
            max_velocity: DVec2::ZERO,
            max_acceleration: DVec2::ZERO,
            grounded: false,
            is_static: false,
            solid: true,
            mass: 0.0,
            inverse_mass: 0.0,
            elasticity: 0.0,
            friction: 0.0,
        }
    }

    /// Create a rectangle anchored at its top-left corner.
    pub fn rectangle(position: DVec2, width: f64, height: f64) -> Self {
        Self::new(position, ShapeKind::Rectangle(Rectangle { width, height }))
    }

    /// Create a circle from its center.
    pub fn circle(center: DVec2, radius: f64) -> Self {
        Self::new(
            center - DVec2::splat(radius),
            ShapeKind::Circle(Circle { radius, center }),
        )
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.set_mass(mass);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_tags(tags);
        self
    }

    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_gravity(mut self, gravity: DVec2) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_solid(mut self, solid: bool) -> Self {
        self.solid = solid;
        self
    }

    pub fn with_elasticity(mut self, elasticity: f64) -> Self {
        self.elasticity = elasticity;
        self
    }

    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }

    /// Advance this shape by one tick.
    ///
    /// Acceleration and gravity feed the velocity, the velocity moves the
    /// shape, and the grounded flag is cleared until the next collision pass
    /// sets it again.
    pub fn update_pos(&mut self) {
        self.acceleration = clamp_to_bound(self.acceleration, self.max_acceleration);
        self.velocity += self.acceleration + self.gravity;
        self.velocity = clamp_to_bound(self.velocity, self.max_velocity);
        self.set_position(self.position + self.velocity);
        self.grounded = false;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn set_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    #[inline]
    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Move the shape by its anchor. Circles re-derive their center.
    pub fn set_position(&mut self, position: DVec2) {
        self.position = position;
        if let ShapeKind::Circle(circle) = &mut self.kind {
            circle.center = position + DVec2::splat(circle.radius);
        }
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        match &self.kind {
            ShapeKind::Rectangle(rect) => {
                self.position + DVec2::new(rect.width / 2.0, rect.height / 2.0)
            }
            ShapeKind::Circle(circle) => circle.center,
        }
    }

    /// Move the shape by its center.
    pub fn set_center(&mut self, center: DVec2) {
        let half = DVec2::new(self.width() / 2.0, self.height() / 2.0);
        self.set_position(center - half);
    }

    pub fn width(&self) -> f64 {
        match &self.kind {
            ShapeKind::Rectangle(rect) => rect.width,
            ShapeKind::Circle(circle) => circle.radius * 2.0,
        }
    }

    pub fn height(&self) -> f64 {
        match &self.kind {
            ShapeKind::Rectangle(rect) => rect.height,
            ShapeKind::Circle(circle) => circle.radius * 2.0,
        }
    }

    /// World-space geometry used by the narrowphase.
    pub fn collider(&self) -> Collider {
        match &self.kind {
            ShapeKind::Rectangle(rect) => Collider::Aabb(Aabb {
                min: self.position,
                max: self.position + DVec2::new(rect.width, rect.height),
            }),
            ShapeKind::Circle(circle) => Collider::Ball(Ball {
                center: circle.center,
                radius: circle.radius,
            }),
        }
    }

    #[inline]
    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: DVec2) {
        self.velocity = velocity;
    }

    pub fn max_velocity(&self) -> DVec2 {
        self.max_velocity
    }

    pub fn set_max_velocity(&mut self, max_velocity: DVec2) {
        self.max_velocity = max_velocity;
    }

    pub fn acceleration(&self) -> DVec2 {
        self.acceleration
    }

    pub fn set_acceleration(&mut self, acceleration: DVec2) {
        self.acceleration = acceleration;
    }

    pub fn max_acceleration(&self) -> DVec2 {
        self.max_acceleration
    }

    pub fn set_max_acceleration(&mut self, max_acceleration: DVec2) {
        self.max_acceleration = max_acceleration;
    }

    pub fn gravity(&self) -> DVec2 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: DVec2) {
        self.gravity = gravity;
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn set_grounded(&mut self, grounded: bool) {
        self.grounded = grounded;
    }

    /// Flag the shape as standing on something. Infinite-mass shapes are
    /// never grounded.
    pub fn mark_grounded(&mut self) {
        if self.mass != 0.0 {
            self.grounded = true;
        }
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn set_static(&mut self, is_static: bool) {
        self.is_static = is_static;
    }

    pub fn is_solid(&self) -> bool {
        self.solid
    }

    pub fn set_solid(&mut self, solid: bool) {
        self.solid = solid;
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Set the mass. Zero or negative mass means infinite mass.
    pub fn set_mass(&mut self, mass: f64) {
        self.mass = mass;
        self.inverse_mass = if mass <= 0.0 { 0.0 } else { 1.0 / mass };
    }

    #[inline]
    pub fn inverse_mass(&self) -> f64 {
        self.inverse_mass
    }

    pub fn elasticity(&self) -> f64 {
        self.elasticity
    }

    pub fn set_elasticity(&mut self, elasticity: f64) {
        self.elasticity = elasticity;
    }

    pub fn friction(&self) -> f64 {
        self.friction
    }

    pub fn set_friction(&mut self, friction: f64) {
        self.friction = friction;
    }
}

/// Clamp `v` componentwise to `[-bound, bound]`.
///
/// A bound with any non-positive component disables clamping.
#[inline]
fn clamp_to_bound(v: DVec2, bound: DVec2) -> DVec2 {
    if bound.x > 0.0 && bound.y > 0.0 {
        v.clamp(-bound, bound)
    } else {
        v
    }
}
