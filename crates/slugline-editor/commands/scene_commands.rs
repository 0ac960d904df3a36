//! Single-scene commands
//!
//! Thin command wrappers over [`SceneList::edit`] and [`SceneList::delete`]
//! so they can be batched and run through a session.

use super::SceneCommand;
use crate::core::{Result, SceneList};
use slugline_core::{SceneId, TimeOfDay};

/// Replace a scene's location and time of day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSceneCommand {
    pub scene_id: SceneId,
    pub location: String,
    pub time_of_day: TimeOfDay,
    /// Optional description override
    pub description: Option<String>,
}

impl EditSceneCommand {
    pub fn new(scene_id: SceneId, location: impl Into<String>, time_of_day: TimeOfDay) -> Self {
        Self {
            scene_id,
            location: location.into(),
            time_of_day,
            description: None,
        }
    }

    /// Set a custom description for this command
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl SceneCommand for EditSceneCommand {
    fn apply(&self, scenes: &mut SceneList) -> Result<()> {
        scenes.edit(self.scene_id, &self.location, self.time_of_day)
    }

    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("Edit scene")
    }
}

/// Remove a scene; the rest are renumbered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteSceneCommand {
    pub scene_id: SceneId,
    /// Optional description override
    pub description: Option<String>,
}

impl DeleteSceneCommand {
    pub const fn new(scene_id: SceneId) -> Self {
        Self {
            scene_id,
            description: None,
        }
    }

    /// Set a custom description for this command
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl SceneCommand for DeleteSceneCommand {
    fn apply(&self, scenes: &mut SceneList) -> Result<()> {
        scenes.delete(self.scene_id).map(drop)
    }

    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("Delete scene")
    }
}
