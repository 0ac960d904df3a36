//! Ordered scene list with edit, delete and renumber
//!
//! The list owns the numbering invariant: for `N` scenes the numbers are
//! exactly `1..=N` in list order after every operation. Callers only ever
//! see shared slices, so numbers cannot drift from positions.

use super::errors::{EditorError, Result};
use slugline_core::{ParsedScene, SceneId, Screenplay, TimeOfDay};
use std::collections::HashSet;

/// Ordered scenes of one import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "Vec<ParsedScene>", into = "Vec<ParsedScene>")
)]
pub struct SceneList {
    scenes: Vec<ParsedScene>,
}

impl SceneList {
    /// Empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of scenes, renumbering them in the given order
    ///
    /// A repeated id is replaced with a fresh one above the largest id in
    /// the list.
    pub fn from_scenes(scenes: Vec<ParsedScene>) -> Self {
        let mut list = Self { scenes };
        list.dedup_ids();
        list.renumber();
        list
    }

    fn dedup_ids(&mut self) {
        let mut next = self
            .scenes
            .iter()
            .map(|scene| scene.id.get())
            .max()
            .unwrap_or(0);
        let mut seen = HashSet::with_capacity(self.scenes.len());

        for scene in &mut self.scenes {
            if !seen.insert(scene.id) {
                next = next.saturating_add(1);
                tracing::debug!(duplicate = %scene.id, fresh = next, "scene id reassigned");
                scene.id = SceneId::new(next);
                seen.insert(scene.id);
            }
        }
    }

    /// Scenes in order
    pub fn scenes(&self) -> &[ParsedScene] {
        &self.scenes
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParsedScene> {
        self.scenes.iter()
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Find a scene by id
    pub fn get(&self, id: SceneId) -> Option<&ParsedScene> {
        self.scenes.iter().find(|scene| scene.id == id)
    }

    pub fn contains(&self, id: SceneId) -> bool {
        self.get(id).is_some()
    }

    fn position(&self, id: SceneId) -> Result<usize> {
        self.scenes
            .iter()
            .position(|scene| scene.id == id)
            .ok_or(EditorError::SceneNotFound { id })
    }

    /// Replace a scene's location and time of day
    ///
    /// Heading, interior/exterior marker, id and number are untouched, as is
    /// every other scene.
    ///
    /// # Errors
    ///
    /// [`EditorError::SceneNotFound`] for an unknown id,
    /// [`EditorError::EmptyLocation`] for a blank location.
    pub fn edit(&mut self, id: SceneId, location: &str, time_of_day: TimeOfDay) -> Result<()> {
        let location = location.trim();
        if location.is_empty() {
            return Err(EditorError::EmptyLocation);
        }

        let index = self.position(id)?;
        let scene = &mut self.scenes[index];
        scene.location = location.to_string();
        scene.time_of_day = time_of_day;

        tracing::debug!(%id, number = scene.scene_number, location, %time_of_day, "scene edited");
        Ok(())
    }

    /// Remove a scene and renumber the rest
    ///
    /// # Errors
    ///
    /// [`EditorError::SceneNotFound`] for an unknown id.
    pub fn delete(&mut self, id: SceneId) -> Result<ParsedScene> {
        let index = self.position(id)?;
        let removed = self.scenes.remove(index);
        self.renumber();

        tracing::debug!(%id, number = removed.scene_number, remaining = self.len(), "scene deleted");
        Ok(removed)
    }

    fn renumber(&mut self) {
        for (scene, number) in self.scenes.iter_mut().zip(1u32..) {
            scene.scene_number = number;
        }
    }

    /// Whether numbers are `1..=N` in order
    pub fn is_contiguous(&self) -> bool {
        self.scenes
            .iter()
            .zip(1u32..)
            .all(|(scene, number)| scene.scene_number == number)
    }

    pub fn into_vec(self) -> Vec<ParsedScene> {
        self.scenes
    }
}

impl From<Vec<ParsedScene>> for SceneList {
    fn from(scenes: Vec<ParsedScene>) -> Self {
        Self::from_scenes(scenes)
    }
}

impl From<SceneList> for Vec<ParsedScene> {
    fn from(list: SceneList) -> Self {
        list.scenes
    }
}

impl From<Screenplay> for SceneList {
    fn from(screenplay: Screenplay) -> Self {
        Self::from_scenes(screenplay.into_parts().0)
    }
}

impl<'a> IntoIterator for &'a SceneList {
    type Item = &'a ParsedScene;
    type IntoIter = core::slice::Iter<'a, ParsedScene>;

    fn into_iter(self) -> Self::IntoIter {
        self.scenes.iter()
    }
}
