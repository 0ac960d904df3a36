//! Import session lifecycle
//!
//! An [`ImportSession`] is one attempt at importing a screenplay file:
//!
//! ```text
//! Empty --load--> Loaded --parse--> Parsed --commit--> Imported
//!                        \--------> ParseFailed
//! ```
//!
//! `clear` returns any session to `Empty`. Every transition borrows the
//! current session and returns the next one, so a rejected transition leaves
//! the caller's value exactly as it was.

use crate::commands::SceneCommand;
use crate::core::{EditDraft, EditorError, Result, SceneBreakdown, SceneList};
use crate::formats::{read_source, ImportConfig, ImporterRegistry, LoadedSource, SourceFile};
use core::fmt;
use slugline_core::utils::decode_source;
use slugline_core::{IssueCategory, ParseIssue, ParsedScene, SceneId, TimeOfDay};
use std::path::Path;

#[cfg(feature = "async")]
use crate::formats::read_source_async;

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LifecycleState {
    /// No file selected
    #[default]
    Empty,
    /// Bytes read, not yet parsed
    Loaded,
    /// Parsing produced an error; only `clear` is useful
    ParseFailed,
    /// Scenes available for review and editing
    Parsed,
    /// Committed; the scene list is frozen
    Imported,
}

impl LifecycleState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Loaded => "loaded",
            Self::ParseFailed => "parse-failed",
            Self::Parsed => "parsed",
            Self::Imported => "imported",
        }
    }

    /// Whether no further transition except `clear` is possible
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::ParseFailed | Self::Imported)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One screenplay import attempt
///
/// # Examples
///
/// ```
/// use slugline_editor::{ImportSession, LifecycleState, SourceFile, TimeOfDay};
///
/// let text = "INT. WAREHOUSE - NIGHT\nShe enters.\nEXT. STREET - DAY\nHe runs.";
/// let session = ImportSession::new()
///     .load(SourceFile::new("heist.fountain", text.len() as u64), text.as_bytes())?
///     .parse()?;
/// assert_eq!(session.state(), LifecycleState::Parsed);
///
/// let street = session.scenes()[1].id;
/// let session = session
///     .edit_scene(street, "ALLEY", TimeOfDay::Dusk)?
///     .commit()?;
///
/// let breakdown = session.breakdown().expect("committed session");
/// assert_eq!(breakdown.entries[1].location, "ALLEY");
/// # Ok::<(), slugline_editor::EditorError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportSession {
    state: LifecycleState,
    config: ImportConfig,
    source: Option<SourceFile>,

    /// Decoded text, only while Loaded
    text: Option<String>,

    scenes: SceneList,
    issues: Vec<ParseIssue>,

    /// Only while ParseFailed
    error_message: Option<String>,

    draft: Option<EditDraft>,
}

impl ImportSession {
    /// Create an empty session with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session with custom configuration
    pub fn with_config(config: ImportConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub const fn state(&self) -> LifecycleState {
        self.state
    }

    pub const fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// File being imported; `None` while Empty
    pub const fn source(&self) -> Option<&SourceFile> {
        self.source.as_ref()
    }

    /// Decoded text; only available while Loaded
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Scenes in order; empty unless Parsed or Imported
    pub fn scenes(&self) -> &[ParsedScene] {
        self.scenes.scenes()
    }

    pub const fn scene_list(&self) -> &SceneList {
        &self.scenes
    }

    /// Soft issues from decoding and parsing
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// Why parsing failed; only set while ParseFailed
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// The open scene edit, if any
    pub const fn draft(&self) -> Option<&EditDraft> {
        self.draft.as_ref()
    }

    /// Whether the open draft holds values not yet saved
    pub fn has_unsaved_edit(&self) -> bool {
        self.draft.as_ref().is_some_and(|draft| {
            self.scenes
                .get(draft.scene_id)
                .is_some_and(|scene| draft.differs_from(scene))
        })
    }

    fn require(&self, expected: LifecycleState, operation: &'static str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(EditorError::invalid_state(operation, self.state))
        }
    }

    fn file_name(&self) -> &str {
        self.source.as_ref().map_or("", |source| source.name.as_str())
    }

    /// Load raw source bytes
    ///
    /// The recorded size is always `bytes.len()`, whatever `source` declared.
    /// A leading byte order mark is dropped. Invalid UTF-8 is replaced and
    /// recorded as a warning unless the configuration asks for strict
    /// decoding.
    ///
    /// # Errors
    ///
    /// - [`EditorError::InvalidState`] unless the session is Empty
    /// - [`EditorError::FileTooLarge`] above the configured limit
    /// - [`EditorError::Core`] wrapping
    ///   [`CoreError::InvalidEncoding`](slugline_core::CoreError::InvalidEncoding)
    ///   in strict mode
    pub fn load(&self, source: SourceFile, bytes: &[u8]) -> Result<Self> {
        self.require(LifecycleState::Empty, "load a file")?;

        let size = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        self.config.check_size(size)?;
        if source.size_bytes != size {
            tracing::debug!(declared = source.size_bytes, actual = size, "source size corrected");
        }
        let source = SourceFile {
            size_bytes: size,
            ..source
        };

        let decoded = decode_source(bytes, self.config.strict_utf8)?;

        let mut issues = Vec::new();
        if decoded.had_bom {
            issues.push(ParseIssue::info(
                IssueCategory::Encoding,
                "byte order mark removed".to_string(),
                0,
            ));
        }
        if decoded.lossy {
            issues.push(ParseIssue::warning(
                IssueCategory::Encoding,
                "invalid UTF-8 sequences were replaced".to_string(),
                0,
            ));
        }

        tracing::info!(
            file = %source.name,
            format = %source.format,
            bytes = bytes.len(),
            "source loaded"
        );

        Ok(Self {
            state: LifecycleState::Loaded,
            config: self.config.clone(),
            source: Some(source),
            text: Some(decoded.text),
            issues,
            ..Self::default()
        })
    }

    /// Load text that is already in memory
    ///
    /// # Errors
    ///
    /// Same as [`ImportSession::load`].
    pub fn load_text(&self, name: &str, text: &str) -> Result<Self> {
        let size = u64::try_from(text.len()).unwrap_or(u64::MAX);
        self.load(SourceFile::new(name, size), text.as_bytes())
    }

    /// Load the output of one of the source readers
    ///
    /// # Errors
    ///
    /// Same as [`ImportSession::load`].
    pub fn load_source(&self, loaded: LoadedSource) -> Result<Self> {
        self.load(loaded.source, &loaded.bytes)
    }

    /// Read a file from disk and load it
    ///
    /// # Errors
    ///
    /// [`EditorError::IoError`] when the file cannot be read, otherwise the
    /// same as [`ImportSession::load`].
    pub fn open_path(&self, path: &Path) -> Result<Self> {
        self.require(LifecycleState::Empty, "load a file")?;
        let loaded = read_source(path, &self.config)?;
        self.load_source(loaded)
    }

    /// Read a file from disk without blocking and load it
    ///
    /// # Errors
    ///
    /// Same as [`ImportSession::open_path`].
    #[cfg(feature = "async")]
    pub async fn open_path_async(&self, path: &Path) -> Result<Self> {
        self.require(LifecycleState::Empty, "load a file")?;
        let loaded = read_source_async(path, &self.config).await?;
        self.load_source(loaded)
    }

    /// Parse the loaded text with the built-in importers
    ///
    /// # Errors
    ///
    /// Same as [`ImportSession::parse_with`].
    pub fn parse(&self) -> Result<Self> {
        self.parse_with(&ImporterRegistry::default())
    }

    /// Parse the loaded text with the importer registered for its format
    ///
    /// Parse errors are not returned as `Err`: they move the session to
    /// ParseFailed with a message, and no scenes are exposed.
    ///
    /// # Errors
    ///
    /// [`EditorError::InvalidState`] unless the session is Loaded.
    pub fn parse_with(&self, registry: &ImporterRegistry) -> Result<Self> {
        self.require(LifecycleState::Loaded, "parse")?;

        let (Some(source), Some(text)) = (self.source.as_ref(), self.text.as_deref()) else {
            return Err(EditorError::invalid_state("parse", self.state));
        };

        let parsed = match registry.find_importer(source.format) {
            Some(importer) => importer.import_text(text).map_err(|err| err.to_string()),
            None => Err(format!("No importer registered for {} documents", source.format)),
        };

        let mut next = Self {
            config: self.config.clone(),
            source: self.source.clone(),
            issues: self.issues.clone(),
            ..Self::default()
        };

        match parsed {
            Ok(screenplay) => {
                let (scenes, issues) = screenplay.into_parts();
                next.issues.extend(issues);
                next.scenes = SceneList::from_scenes(scenes);
                next.state = LifecycleState::Parsed;
                tracing::info!(
                    file = %source.name,
                    scenes = next.scenes.len(),
                    issues = next.issues.len(),
                    "session parsed"
                );
            }
            Err(message) => {
                tracing::warn!(file = %source.name, %message, "session parse failed");
                next.error_message = Some(message);
                next.state = LifecycleState::ParseFailed;
            }
        }

        Ok(next)
    }

    /// Replace one scene's location and time of day
    ///
    /// # Errors
    ///
    /// - [`EditorError::InvalidState`] unless the session is Parsed
    /// - [`EditorError::SceneNotFound`] or [`EditorError::EmptyLocation`]
    pub fn edit_scene(&self, id: SceneId, location: &str, time_of_day: TimeOfDay) -> Result<Self> {
        self.require(LifecycleState::Parsed, "edit a scene")?;
        let mut next = self.clone();
        next.scenes.edit(id, location, time_of_day)?;
        Ok(next)
    }

    /// Delete one scene and renumber the rest
    ///
    /// An open draft for the deleted scene is discarded.
    ///
    /// # Errors
    ///
    /// - [`EditorError::InvalidState`] unless the session is Parsed
    /// - [`EditorError::SceneNotFound`] for an unknown id
    pub fn delete_scene(&self, id: SceneId) -> Result<Self> {
        self.require(LifecycleState::Parsed, "delete a scene")?;
        let mut next = self.clone();
        next.scenes.delete(id)?;
        next.drop_stale_draft();
        Ok(next)
    }

    /// Run a command against the scene list
    ///
    /// The command sees a copy; on error the session is unchanged.
    ///
    /// # Errors
    ///
    /// [`EditorError::InvalidState`] unless the session is Parsed, or the
    /// command's own error.
    pub fn execute(&self, command: &dyn SceneCommand) -> Result<Self> {
        self.require(LifecycleState::Parsed, "run a command")?;
        let mut next = self.clone();
        command.apply(&mut next.scenes)?;
        next.drop_stale_draft();
        tracing::debug!(command = command.description(), scenes = next.scenes.len(), "command applied");
        Ok(next)
    }

    fn drop_stale_draft(&mut self) {
        if let Some(draft) = &self.draft {
            if !self.scenes.contains(draft.scene_id) {
                tracing::debug!(scene = %draft.scene_id, "draft discarded with its scene");
                self.draft = None;
            }
        }
    }

    /// Open an edit draft for a scene, replacing any open draft
    ///
    /// # Errors
    ///
    /// - [`EditorError::InvalidState`] unless the session is Parsed
    /// - [`EditorError::SceneNotFound`] for an unknown id
    pub fn start_edit(&self, id: SceneId) -> Result<Self> {
        self.require(LifecycleState::Parsed, "start an edit")?;
        let scene = self
            .scenes
            .get(id)
            .ok_or(EditorError::SceneNotFound { id })?;

        let mut next = self.clone();
        next.draft = Some(EditDraft::for_scene(scene));
        Ok(next)
    }

    /// Change the values in the open draft
    ///
    /// # Errors
    ///
    /// - [`EditorError::InvalidState`] unless the session is Parsed
    /// - [`EditorError::NoActiveEdit`] without an open draft
    pub fn update_draft(&self, location: impl Into<String>, time_of_day: TimeOfDay) -> Result<Self> {
        self.require(LifecycleState::Parsed, "update an edit")?;
        let mut next = self.clone();
        let draft = next.draft.as_mut().ok_or(EditorError::NoActiveEdit)?;
        draft.location = location.into();
        draft.time_of_day = time_of_day;
        Ok(next)
    }

    /// Apply the open draft and close it
    ///
    /// # Errors
    ///
    /// - [`EditorError::InvalidState`] unless the session is Parsed
    /// - [`EditorError::NoActiveEdit`] without an open draft
    /// - [`EditorError::EmptyLocation`] when the draft location is blank;
    ///   the draft stays open
    pub fn save_edit(&self) -> Result<Self> {
        self.require(LifecycleState::Parsed, "save an edit")?;
        let draft = self.draft.as_ref().ok_or(EditorError::NoActiveEdit)?;

        let mut next = self.clone();
        next.scenes
            .edit(draft.scene_id, &draft.location, draft.time_of_day)?;
        next.draft = None;
        Ok(next)
    }

    /// Discard the open draft; a no-op without one
    ///
    /// # Errors
    ///
    /// [`EditorError::InvalidState`] unless the session is Parsed.
    pub fn cancel_edit(&self) -> Result<Self> {
        self.require(LifecycleState::Parsed, "cancel an edit")?;
        let mut next = self.clone();
        next.draft = None;
        Ok(next)
    }

    /// Freeze the scene list
    ///
    /// An unsaved draft is discarded.
    ///
    /// # Errors
    ///
    /// [`EditorError::InvalidState`] unless the session is Parsed.
    pub fn commit(&self) -> Result<Self> {
        self.require(LifecycleState::Parsed, "commit")?;
        let mut next = self.clone();
        next.draft = None;
        next.state = LifecycleState::Imported;
        tracing::info!(file = self.file_name(), scenes = next.scenes.len(), "session committed");
        Ok(next)
    }

    /// Discard everything and start over, keeping the configuration
    #[must_use]
    pub fn clear(&self) -> Self {
        if self.state != LifecycleState::Empty {
            tracing::info!(file = self.file_name(), from = %self.state, "session cleared");
        }
        Self::with_config(self.config.clone())
    }

    /// The committed scenes; `None` until Imported
    pub fn breakdown(&self) -> Option<SceneBreakdown> {
        if self.state != LifecycleState::Imported {
            return None;
        }
        self.source
            .as_ref()
            .map(|source| SceneBreakdown::new(source.clone(), &self.scenes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TWO_SCENES: &str = "INT. WAREHOUSE - NIGHT\nShe enters.\nEXT. STREET - DAY\nHe runs.";

    fn parsed() -> ImportSession {
        ImportSession::new()
            .load_text("heist.fountain", TWO_SCENES)
            .unwrap()
            .parse()
            .unwrap()
    }

    #[test]
    fn lifecycle_state_display() {
        assert_eq!(LifecycleState::ParseFailed.to_string(), "parse-failed");
        assert!(LifecycleState::Imported.is_terminal());
        assert!(!LifecycleState::Parsed.is_terminal());
    }

    #[test]
    fn load_keeps_text_until_parse() {
        let loaded = ImportSession::new()
            .load_text("heist.fountain", TWO_SCENES)
            .unwrap();
        assert_eq!(loaded.state(), LifecycleState::Loaded);
        assert_eq!(loaded.text(), Some(TWO_SCENES));
        assert!(loaded.scenes().is_empty());

        let parsed = loaded.parse().unwrap();
        assert_eq!(parsed.text(), None);
        assert_eq!(parsed.scenes().len(), 2);
    }

    #[test]
    fn load_only_from_empty() {
        let session = parsed();
        let err = session.load_text("other.fountain", TWO_SCENES).unwrap_err();
        assert_eq!(
            err,
            EditorError::invalid_state("load a file", LifecycleState::Parsed)
        );
    }

    #[test]
    fn load_rejects_oversized_source() {
        let session = ImportSession::with_config(ImportConfig {
            max_source_bytes: 8,
            ..ImportConfig::default()
        });
        let err = session.load_text("big.fountain", TWO_SCENES).unwrap_err();
        assert!(matches!(err, EditorError::FileTooLarge { limit: 8, .. }));
        assert_eq!(session.state(), LifecycleState::Empty);
    }

    #[test]
    fn bom_and_lossy_bytes_become_issues() {
        let mut bytes = b"\xEF\xBB\xBFINT. CAVE - NIGHT \xFF\n".to_vec();
        bytes.extend_from_slice(b"EXT. HILL - DAY\n");
        let session = ImportSession::new()
            .load(SourceFile::new("cave.fountain", bytes.len() as u64), &bytes)
            .unwrap();

        let categories: Vec<_> = session.issues().iter().map(|i| i.category).collect();
        assert_eq!(categories, vec![IssueCategory::Encoding, IssueCategory::Encoding]);

        let parsed = session.parse().unwrap();
        assert_eq!(parsed.scenes().len(), 2);
        assert_eq!(parsed.scenes()[0].int_ext, slugline_core::IntExt::Int);
    }

    #[test]
    fn recorded_size_comes_from_bytes() {
        let session = ImportSession::new()
            .load(SourceFile::new("heist.fountain", 9_999), TWO_SCENES.as_bytes())
            .unwrap();
        assert_eq!(
            session.source().map(|s| s.size_bytes),
            Some(TWO_SCENES.len() as u64)
        );
    }

    #[test]
    fn strict_decoding_rejects_invalid_utf8() {
        let session = ImportSession::with_config(ImportConfig {
            strict_utf8: true,
            ..ImportConfig::default()
        });
        let err = session
            .load(SourceFile::new("bad.txt", 3), b"\xFF\xFE\xFD")
            .unwrap_err();
        assert!(err.as_core_error().is_some());
    }

    #[test]
    fn parse_failure_exposes_message_not_scenes() {
        let failed = ImportSession::new()
            .load_text("notes.txt", "FADE IN:\nNothing here.\n")
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(failed.state(), LifecycleState::ParseFailed);
        assert_eq!(
            failed.error_message(),
            Some("No scene headings found in Plain Text document")
        );
        assert!(failed.scenes().is_empty());
        assert!(failed.commit().is_err());
    }

    #[test]
    fn missing_importer_fails_the_parse() {
        let failed = ImportSession::new()
            .load_text("heist.fountain", TWO_SCENES)
            .unwrap()
            .parse_with(&ImporterRegistry::empty())
            .unwrap();
        assert_eq!(failed.state(), LifecycleState::ParseFailed);
        assert_eq!(
            failed.error_message(),
            Some("No importer registered for Fountain documents")
        );
    }

    #[test]
    fn draft_lifecycle() {
        let session = parsed();
        let id = session.scenes()[0].id;

        let editing = session.start_edit(id).unwrap();
        assert_eq!(editing.draft().map(|d| d.location.as_str()), Some("WAREHOUSE"));

        assert!(!editing.has_unsaved_edit());

        let editing = editing.update_draft("LOFT", TimeOfDay::Morning).unwrap();
        assert!(editing.has_unsaved_edit());
        // the list is untouched until save
        assert_eq!(editing.scenes()[0].location, "WAREHOUSE");

        let saved = editing.save_edit().unwrap();
        assert!(saved.draft().is_none());
        assert_eq!(saved.scenes()[0].location, "LOFT");
        assert_eq!(saved.scenes()[0].time_of_day, TimeOfDay::Morning);

        let cancelled = editing.cancel_edit().unwrap();
        assert!(cancelled.draft().is_none());
        assert_eq!(cancelled.scenes()[0].location, "WAREHOUSE");
    }

    #[test]
    fn blank_draft_stays_open() {
        let session = parsed();
        let id = session.scenes()[1].id;
        let editing = session.start_edit(id).unwrap().update_draft("  ", TimeOfDay::Day).unwrap();

        assert_eq!(editing.save_edit().unwrap_err(), EditorError::EmptyLocation);
        assert!(editing.draft().is_some());
    }

    #[test]
    fn starting_another_edit_replaces_draft() {
        let session = parsed();
        let first = session.scenes()[0].id;
        let second = session.scenes()[1].id;

        let editing = session
            .start_edit(first)
            .unwrap()
            .update_draft("LOFT", TimeOfDay::Night)
            .unwrap()
            .start_edit(second)
            .unwrap();
        assert_eq!(editing.draft().map(|d| d.scene_id), Some(second));
        assert_eq!(editing.draft().map(|d| d.location.as_str()), Some("STREET"));
    }

    #[test]
    fn deleting_edited_scene_discards_draft() {
        let session = parsed();
        let first = session.scenes()[0].id;
        let second = session.scenes()[1].id;

        let kept = session.start_edit(first).unwrap().delete_scene(second).unwrap();
        assert!(kept.draft().is_some());

        let dropped = session.start_edit(first).unwrap().delete_scene(first).unwrap();
        assert!(dropped.draft().is_none());
    }

    #[test]
    fn draft_operations_need_a_draft() {
        let session = parsed();
        assert_eq!(session.save_edit().unwrap_err(), EditorError::NoActiveEdit);
        assert_eq!(
            session.update_draft("X", TimeOfDay::Day).unwrap_err(),
            EditorError::NoActiveEdit
        );
    }

    #[test]
    fn breakdown_only_after_commit() {
        let session = parsed();
        assert!(session.breakdown().is_none());

        let committed = session.commit().unwrap();
        let breakdown = committed.breakdown().unwrap();
        assert_eq!(breakdown.source.name, "heist.fountain");
        assert_eq!(breakdown.len(), 2);
    }

    #[test]
    fn clear_keeps_configuration() {
        let config = ImportConfig {
            max_source_bytes: 1024,
            strict_utf8: true,
        };
        let session = ImportSession::with_config(config.clone())
            .load_text("heist.fountain", TWO_SCENES)
            .unwrap();

        let cleared = session.clear();
        assert_eq!(cleared.state(), LifecycleState::Empty);
        assert!(cleared.source().is_none());
        assert!(cleared.issues().is_empty());
        assert_eq!(cleared.config(), &config);
    }
}
