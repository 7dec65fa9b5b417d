//! clash2d
//!
//! A small 2D collision engine for axis-aligned rectangles and circles.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **physics::shape** - Rectangles and circles with kinematic and material state
//! 2. **physics::narrowphase** - Pairwise intersection tests
//! 3. **physics::contact** / **physics::solver** - Collisions and their resolution
//! 4. **physics::index** - Per-step collisions indexed by tag
//! 5. **physics** - [`Space`], the per-tick driver
//! 6. **util** - Identifier generation
//!
//! ```
//! use clash2d::glam::DVec2;
//! use clash2d::{Shape, Space, SpaceConfig};
//!
//! let mut space = Space::new(SpaceConfig {
//!     gravity: DVec2::new(0.0, 1.0),
//!     ..Default::default()
//! });
//! space.add_shape(Shape::rectangle(DVec2::new(0.0, 100.0), 200.0, 20.0).with_static(true));
//! space.add_shape(Shape::circle(DVec2::new(50.0, 90.0), 12.0).with_mass(1.0).with_tags(["ball"]));
//! space.apply_gravity();
//!
//! space.update();
//! let resolved = space.resolve_collisions(Some("ball"));
//! assert_eq!(resolved, 1);
//! ```

pub mod physics;
pub mod util;

// Re-export commonly used types
pub use physics::contact::{CollisionError, CollisionInfo, ContactInfo, Participant};
pub use physics::index::CollisionIndex;
pub use physics::shape::{Shape, ShapeKind};
pub use physics::{Space, SpaceConfig};

// Re-export math and storage crates for convenience
pub use glam;
pub use hecs;
