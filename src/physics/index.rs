//! Per-step collection of collisions, indexed by participant tag.

use std::collections::HashMap;

use super::contact::CollisionInfo;

/// Collisions found during one step.
///
/// Every collision is also registered under each tag carried by either of its
/// participants, so hosts can cheaply fetch e.g. all collisions involving a
/// `"player"`.
#[derive(Debug, Clone, Default)]
pub struct CollisionIndex {
    infos: Vec<CollisionInfo>,
    /// Tag -> positions in `infos`, ascending.
    by_tag: HashMap<String, Vec<usize>>,
}

impl CollisionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a collision and register it under the union of its
    /// participants' tags.
    pub fn add(&mut self, info: CollisionInfo) {
        let position = self.infos.len();
        for tag in info.tag_union() {
            self.by_tag.entry(tag.to_owned()).or_default().push(position);
        }
        self.infos.push(info);
    }

    /// Every collision of the step, resolved or not.
    pub fn get_all(&self) -> &[CollisionInfo] {
        &self.infos
    }

    pub fn get_all_mut(&mut self) -> &mut [CollisionInfo] {
        &mut self.infos
    }

    /// Unresolved collisions involving a shape tagged `tag`.
    pub fn get_tagged(&self, tag: &str) -> Vec<&CollisionInfo> {
        self.tagged_positions(tag)
            .iter()
            .map(|&i| &self.infos[i])
            .filter(|info| !info.is_resolved())
            .collect()
    }

    /// Mutable variant of [`get_tagged`](Self::get_tagged).
    pub fn get_tagged_mut(&mut self, tag: &str) -> Vec<&mut CollisionInfo> {
        let Some(positions) = self.by_tag.get(tag) else {
            return Vec::new();
        };
        self.infos
            .iter_mut()
            .enumerate()
            .filter(|(i, info)| !info.is_resolved() && positions.binary_search(i).is_ok())
            .map(|(_, info)| info)
            .collect()
    }

    /// Filter with at most one tag: no tag returns every collision, one tag
    /// behaves like [`get_tagged`](Self::get_tagged).
    ///
    /// # Panics
    ///
    /// Panics if more than one tag is given.
    pub fn select(&self, tags: &[&str]) -> Vec<&CollisionInfo> {
        match tags {
            [] => self.infos.iter().collect(),
            [tag] => self.get_tagged(tag),
            _ => panic!("filtering on more than one tag is not supported: {tags:?}"),
        }
    }

    /// Positions in [`get_all`](Self::get_all) registered under `tag`,
    /// resolved ones included.
    pub fn tagged_positions(&self, tag: &str) -> &[usize] {
        self.by_tag.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Tags with at least one registered collision.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.by_tag.keys().map(String::as_str)
    }

    pub fn get(&self, index: usize) -> Option<&CollisionInfo> {
        self.infos.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut CollisionInfo> {
        self.infos.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CollisionInfo> {
        self.infos.iter()
    }

    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    /// Drop every collision and tag entry.
    pub fn reset(&mut self) {
        self.infos.clear();
        self.by_tag.clear();
    }
}

impl<'a> IntoIterator for &'a CollisionIndex {
    type Item = &'a CollisionInfo;
    type IntoIter = std::slice::Iter<'a, CollisionInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
