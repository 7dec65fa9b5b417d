//! CPU-based 2D collision engine for axis-aligned rectangles and circles.
//!
//! # Architecture
//!
//! [`Space::update`] runs one tick:
//!
//! 1. Integrate every non-static shape
//! 2. Broadphase (every unordered pair of solid shapes)
//! 3. Narrowphase collision detection (AABB/AABB, circle/circle, AABB/circle)
//! 4. Mark grounded shapes
//! 5. Replace the collision index
//!
//! Resolution is left to the host: after an update it queries
//! [`Space::collisions`] and resolves or separates the collisions it cares
//! about.

pub mod broadphase;
pub mod collider;
pub mod contact;
pub mod index;
pub mod narrowphase;
pub mod rigid_body;
pub mod shape;
pub mod solver;

use glam::DVec2;
use tracing::{debug, trace};

use self::broadphase::AllPairs;
use self::contact::{CollisionInfo, Participant};
use self::index::CollisionIndex;
use self::narrowphase::{detect_collision, PairOrder};
use self::shape::Shape;

/// Configuration for a [`Space`].
#[derive(Debug, Clone)]
pub struct SpaceConfig {
    /// Space-wide gravity, pushed to shapes by [`Space::apply_gravity`].
    /// Default: (0, 0).
    pub gravity: DVec2,
    /// Fraction of the penetration removed when resolving a collision.
    /// Default: 0.5.
    pub correction_percent: f64,
}

impl Default for SpaceConfig {
    fn default() -> Self {
        Self {
            gravity: DVec2::ZERO,
            correction_percent: solver::DEFAULT_CORRECTION_PERCENT,
        }
    }
}

/// Owns the shapes and the collisions found by the last update.
#[derive(Default)]
pub struct Space {
    config: SpaceConfig,
    world: hecs::World,
    /// Insertion order; decides which shape comes first in a collision.
    order: Vec<hecs::Entity>,
    broadphase: AllPairs,
    collisions: CollisionIndex,
}

impl Space {
    /// Create an empty space with the given configuration.
    pub fn new(config: SpaceConfig) -> Self {
        Self {
            config,
            world: hecs::World::new(),
            order: Vec::new(),
            broadphase: AllPairs::new(),
            collisions: CollisionIndex::new(),
        }
    }

    pub fn config(&self) -> &SpaceConfig {
        &self.config
    }

    /// Add a shape after every shape already in the space.
    pub fn add_shape(&mut self, shape: Shape) -> hecs::Entity {
        debug!(name = shape.name(), kind = shape.kind().kind_name(), "adding shape");
        let entity = self.world.spawn((shape,));
        self.order.push(entity);
        entity
    }

    /// Remove the shape named `name`, keeping the order of the others.
    ///
    /// Returns `None` if no shape has that name. Collisions already recorded
    /// against the shape stay in the index but can no longer be resolved.
    pub fn remove_shape(&mut self, name: &str) -> Option<Shape> {
        let position = self.order.iter().position(|&entity| {
            self.world
                .get::<&Shape>(entity)
                .map_or(false, |shape| shape.name() == name)
        })?;

        let entity = self.order.remove(position);
        let shape = self.world.remove_one::<Shape>(entity).ok()?;
        self.world.despawn(entity).ok();
        debug!(name, "removed shape");
        Some(shape)
    }

    /// Advance the space by one tick and rebuild the collision index.
    pub fn update(&mut self) {
        // 1. Integrate
        rigid_body::integrate(&mut self.world);

        // 2. Broadphase
        let pairs = self.broadphase.find_pairs(&self.world, &self.order);

        // 3. Narrowphase
        let mut collisions = CollisionIndex::new();
        let mut grounded = Vec::new();
        for (entity_a, entity_b) in pairs {
            let info = {
                let shape_a = self.world.get::<&Shape>(entity_a);
                let shape_b = self.world.get::<&Shape>(entity_b);

                if let (Ok(a), Ok(b)) = (shape_a, shape_b) {
                    detect_collision(&a.collider(), &b.collider()).map(|(contact, order)| {
                        let a = Participant::new(entity_a, &a);
                        let b = Participant::new(entity_b, &b);
                        match order {
                            PairOrder::AsGiven => CollisionInfo::new(a, b, contact),
                            PairOrder::Swapped => CollisionInfo::new(b, a, contact),
                        }
                    })
                } else {
                    None
                }
            };

            if let Some(info) = info {
                if info.is_grounding() {
                    grounded.push(info.first().entity);
                    grounded.push(info.second().entity);
                }
                collisions.add(info);
            }
        }

        // 4. Mark grounded shapes
        rigid_body::mark_grounded(&mut self.world, &grounded);

        // 5. Replace the collision index
        trace!(
            shapes = self.order.len(),
            collisions = collisions.len(),
            "space updated"
        );
        self.collisions = collisions;
    }

    /// Set the space-wide gravity. Shapes only pick it up on
    /// [`apply_gravity`](Self::apply_gravity).
    pub fn set_gravity(&mut self, gravity: DVec2) {
        self.config.gravity = gravity;
    }

    pub fn gravity(&self) -> DVec2 {
        self.config.gravity
    }

    /// Copy the space-wide gravity onto every shape in the space.
    pub fn apply_gravity(&mut self) {
        debug!(gravity = %self.config.gravity, shapes = self.order.len(), "applying gravity");
        rigid_body::apply_gravity(&mut self.world, self.config.gravity);
    }

    /// Shapes in insertion order.
    pub fn shapes(&self) -> &[hecs::Entity] {
        &self.order
    }

    pub fn shape(&self, entity: hecs::Entity) -> Option<hecs::Ref<'_, Shape>> {
        self.world.get::<&Shape>(entity).ok()
    }

    pub fn shape_mut(&mut self, entity: hecs::Entity) -> Option<&mut Shape> {
        self.world.query_one_mut::<&mut Shape>(entity).ok()
    }

    /// Entity of the shape named `name`.
    pub fn shape_by_name(&self, name: &str) -> Option<hecs::Entity> {
        self.order.iter().copied().find(|&entity| {
            self.world
                .get::<&Shape>(entity)
                .map_or(false, |shape| shape.name() == name)
        })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn world(&self) -> &hecs::World {
        &self.world
    }

    /// Collisions found by the last [`update`](Self::update).
    pub fn collisions(&self) -> &CollisionIndex {
        &self.collisions
    }

    /// Take the current collision index, leaving an empty one behind.
    pub fn take_collisions(&mut self) -> CollisionIndex {
        std::mem::take(&mut self.collisions)
    }

    /// Borrow the shapes and the collision index at the same time, for
    /// resolving individual collisions.
    pub fn split_mut(&mut self) -> (&mut hecs::World, &mut CollisionIndex) {
        (&mut self.world, &mut self.collisions)
    }

    /// Resolve every unresolved collision, or only those involving a shape
    /// tagged `tag`, in detection order. Returns how many were resolved.
    pub fn resolve_collisions(&mut self, tag: Option<&str>) -> usize {
        let percent = self.config.correction_percent;
        let world = &mut self.world;
        match tag {
            Some(tag) => self
                .collisions
                .get_tagged_mut(tag)
                .into_iter()
                .map(|info| info.resolve(world, percent))
                .filter(|&resolved| resolved)
                .count(),
            None => self
                .collisions
                .get_all_mut()
                .iter_mut()
                .map(|info| info.resolve(world, percent))
                .filter(|&resolved| resolved)
                .count(),
        }
    }

    /// Like [`resolve_collisions`](Self::resolve_collisions), but only pushes
    /// shapes apart.
    pub fn separate_collisions(&mut self, tag: Option<&str>) -> usize {
        let world = &mut self.world;
        match tag {
            Some(tag) => self
                .collisions
                .get_tagged_mut(tag)
                .into_iter()
                .map(|info| info.separate(world))
                .filter(|&separated| separated)
                .count(),
            None => self
                .collisions
                .get_all_mut()
                .iter_mut()
                .map(|info| info.separate(world))
                .filter(|&separated| separated)
                .count(),
        }
    }

    /// Resolve the collision at `index` in [`collisions`](Self::collisions).
    pub fn resolve_collision(&mut self, index: usize) -> bool {
        let percent = self.config.correction_percent;
        match self.collisions.get_mut(index) {
            Some(info) => info.resolve(&mut self.world, percent),
            None => false,
        }
    }

    /// Separate the collision at `index` in [`collisions`](Self::collisions).
    pub fn separate_collision(&mut self, index: usize) -> bool {
        match self.collisions.get_mut(index) {
            Some(info) => info.separate(&mut self.world),
            None => false,
        }
    }
}
