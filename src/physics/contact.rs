//! Contact data structures for collision response.

use std::fmt;

use glam::DVec2;
use thiserror::Error;

use super::shape::Shape;
use super::solver;

/// Result of a single narrowphase test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactInfo {
    /// Contact normal (from shape A to shape B).
    pub normal: DVec2,
    /// Penetration depth along the normal.
    pub penetration: f64,
}

impl ContactInfo {
    /// Whether the normal points straight down the Y axis, which marks the
    /// participants as grounded.
    #[inline]
    pub fn is_grounding(&self) -> bool {
        self.normal.y == -1.0
    }
}

/// Errors returned when querying a [`CollisionInfo`] for a participant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollisionError {
    #[error("no shape tagged {0:?} in this collision")]
    TagNotFound(String),
    #[error("no shape named {0:?} in this collision")]
    NameNotFound(String),
}

/// One side of a collision: the entity plus its name and tags at detection time.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub entity: hecs::Entity,
    pub name: String,
    pub tags: Vec<String>,
}

impl Participant {
    pub fn new(entity: hecs::Entity, shape: &Shape) -> Self {
        Self {
            entity,
            name: shape.name().to_owned(),
            tags: shape.tags().to_vec(),
        }
    }
}

/// A collision between two shapes, and the unit of resolution.
#[derive(Debug, Clone)]
pub struct CollisionInfo {
    first: Participant,
    second: Participant,
    /// Contact normal (from `first` to `second`).
    normal: DVec2,
    penetration: f64,
    resolved: bool,
}

impl CollisionInfo {
    pub fn new(first: Participant, second: Participant, contact: ContactInfo) -> Self {
        Self {
            first,
            second,
            normal: contact.normal,
            penetration: contact.penetration,
            resolved: false,
        }
    }

    pub fn first(&self) -> &Participant {
        &self.first
    }

    pub fn second(&self) -> &Participant {
        &self.second
    }

    #[inline]
    pub fn normal(&self) -> DVec2 {
        self.normal
    }

    #[inline]
    pub fn penetration(&self) -> f64 {
        self.penetration
    }

    pub fn is_grounding(&self) -> bool {
        ContactInfo {
            normal: self.normal,
            penetration: self.penetration,
        }
        .is_grounding()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub fn set_resolved(&mut self, resolved: bool) {
        self.resolved = resolved;
    }

    /// Every participant carrying `tag`.
    pub fn get_shape_for_tag(&self, tag: &str) -> Result<Vec<hecs::Entity>, CollisionError> {
        let shapes: Vec<hecs::Entity> = [&self.first, &self.second]
            .into_iter()
            .filter(|p| p.tags.iter().any(|t| t == tag))
            .map(|p| p.entity)
            .collect();

        if shapes.is_empty() {
            Err(CollisionError::TagNotFound(tag.to_owned()))
        } else {
            Ok(shapes)
        }
    }

    /// The participant named `name`.
    pub fn get_shape_for_name(&self, name: &str) -> Result<hecs::Entity, CollisionError> {
        if self.first.name == name {
            Ok(self.first.entity)
        } else if self.second.name == name {
            Ok(self.second.entity)
        } else {
            Err(CollisionError::NameNotFound(name.to_owned()))
        }
    }

    /// Union of both participants' tags, without duplicates.
    pub fn tag_union(&self) -> Vec<&str> {
        let mut tags: Vec<&str> =
            Vec::with_capacity(self.first.tags.len() + self.second.tags.len());
        for tag in self.first.tags.iter().chain(&self.second.tags) {
            if !tags.contains(&tag.as_str()) {
                tags.push(tag.as_str());
            }
        }
        tags
    }

    /// Apply impulse and positional correction to both participants.
    ///
    /// See [`solver::resolve`].
    pub fn resolve(&mut self, world: &mut hecs::World, correction_percent: f64) -> bool {
        solver::resolve(self, world, correction_percent)
    }

    /// Push both participants out of penetration without touching velocity.
    ///
    /// See [`solver::separate`].
    pub fn separate(&mut self, world: &mut hecs::World) -> bool {
        solver::separate(self, world)
    }
}

impl fmt::Display for CollisionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "first: {}  second: {}  penetration: {}  normal: {}",
            self.first.name, self.second.name, self.penetration, self.normal
        )
    }
}
