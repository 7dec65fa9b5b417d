//! Broadphase: candidate pairs for the narrowphase.

use super::shape::Shape;

/// Exhaustive broadphase (O(n^2) pair enumeration).
///
/// Every unordered pair of solid shapes is a candidate; the narrowphase does
/// the actual rejection.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllPairs;

impl AllPairs {
    pub fn new() -> Self {
        Self
    }

    /// Find all candidate pairs among `order`, in insertion order.
    ///
    /// Each pair `(a, b)` has `a` added before `b`. Non-solid shapes and
    /// entities no longer in `world` are skipped.
    pub fn find_pairs(
        &self,
        world: &hecs::World,
        order: &[hecs::Entity],
    ) -> Vec<(hecs::Entity, hecs::Entity)> {
        let solid: Vec<hecs::Entity> = order
            .iter()
            .copied()
            .filter(|&entity| {
                world
                    .get::<&Shape>(entity)
                    .map_or(false, |shape| shape.is_solid())
            })
            .collect();

        let mut pairs = Vec::with_capacity(solid.len() * solid.len().saturating_sub(1) / 2);
        for i in 0..solid.len() {
            for j in (i + 1)..solid.len() {
                pairs.push((solid[i], solid[j]));
            }
        }

        pairs
    }
}
