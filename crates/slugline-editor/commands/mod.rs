//! Command system for scene list operations
//!
//! Scene edits and deletions are command objects applied to a
//! [`SceneList`]. Sessions run them through
//! [`ImportSession::execute`](crate::ImportSession::execute), which only
//! accepts them while the scene list is still editable. A [`BatchCommand`]
//! groups commands into one all-or-nothing step.

pub mod scene_commands;

pub use scene_commands::{DeleteSceneCommand, EditSceneCommand};

use crate::core::{EditorError, Result, SceneList};

/// Trait for operations on a scene list
///
/// # Examples
///
/// Creating a custom command:
///
/// ```
/// use slugline_editor::{ImportSession, SceneCommand, SceneList, Result, SourceFile};
///
/// /// Drops every scene after the first
/// #[derive(Debug)]
/// struct KeepFirstCommand;
///
/// impl SceneCommand for KeepFirstCommand {
///     fn apply(&self, scenes: &mut SceneList) -> Result<()> {
///         let rest: Vec<_> = scenes.iter().skip(1).map(|scene| scene.id).collect();
///         for id in rest {
///             scenes.delete(id)?;
///         }
///         Ok(())
///     }
///
///     fn description(&self) -> &str {
///         "Keep first scene"
///     }
/// }
///
/// let text = "INT. A - DAY\nEXT. B - NIGHT\nINT. C - DUSK\n";
/// let session = ImportSession::new()
///     .load(SourceFile::new("short.fountain", text.len() as u64), text.as_bytes())?
///     .parse()?
///     .execute(&KeepFirstCommand)?;
///
/// assert_eq!(session.scenes().len(), 1);
/// # Ok::<(), slugline_editor::EditorError>(())
/// ```
pub trait SceneCommand: core::fmt::Debug + Send + Sync {
    /// Apply the command
    ///
    /// On error the list may be partially modified; callers that need
    /// atomicity apply to a copy.
    fn apply(&self, scenes: &mut SceneList) -> Result<()>;

    /// Get a human-readable description of the command
    fn description(&self) -> &str;
}

/// Batch command that applies multiple commands as a single atomic operation
#[derive(Debug)]
pub struct BatchCommand {
    /// Commands to apply in order
    pub commands: Vec<Box<dyn SceneCommand>>,
    /// Description of the batch operation
    pub description: String,
}

impl BatchCommand {
    /// Create a new, empty batch command
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            commands: Vec::new(),
            description: description.into(),
        }
    }

    /// Add a command to the batch
    #[must_use]
    pub fn add_command(mut self, command: Box<dyn SceneCommand>) -> Self {
        self.commands.push(command);
        self
    }

    /// Add multiple commands to the batch
    #[must_use]
    pub fn add_commands(mut self, commands: Vec<Box<dyn SceneCommand>>) -> Self {
        self.commands.extend(commands);
        self
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl SceneCommand for BatchCommand {
    fn apply(&self, scenes: &mut SceneList) -> Result<()> {
        let mut working = scenes.clone();

        for command in &self.commands {
            command.apply(&mut working).map_err(|err| {
                EditorError::command_failed(format!(
                    "Batch '{}' failed at '{}': {err}",
                    self.description,
                    command.description()
                ))
            })?;
        }

        *scenes = working;
        Ok(())
    }

    fn description(&self) -> &str {
        &self.description
    }
}
