//! In-progress edit of a single scene
//!
//! A draft holds the values being typed for one scene until they are saved
//! or discarded. The scene list is untouched until save.

use slugline_core::{ParsedScene, SceneId, TimeOfDay};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    /// Scene under edit
    pub scene_id: SceneId,
    pub location: String,
    pub time_of_day: TimeOfDay,
}

impl EditDraft {
    /// Seed a draft from the scene's current values
    pub fn for_scene(scene: &ParsedScene) -> Self {
        Self {
            scene_id: scene.id,
            location: scene.location.clone(),
            time_of_day: scene.time_of_day,
        }
    }

    /// Whether the draft differs from the scene it was opened on
    pub fn differs_from(&self, scene: &ParsedScene) -> bool {
        self.location.trim() != scene.location || self.time_of_day != scene.time_of_day
    }
}
