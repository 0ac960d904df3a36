//! Import sessions and scene-list editing for screenplays
//!
//! `slugline-editor` drives one screenplay import from file selection to a
//! committed scene breakdown, built on the parsers in `slugline-core`.
//!
//! # Features
//!
//! - **Lifecycle as values**: every transition returns a new session, a
//!   rejected one leaves the old session untouched
//! - **Scene list editing**: edit location and time of day, delete with
//!   automatic renumbering, batched commands
//! - **Modal drafts**: one in-progress scene edit at a time
//! - **Importer registry**: FDX, Fountain and plain text out of the box
//! - **Async reading**: optional tokio-based file loading
//!
//! # Example
//!
//! ```
//! use slugline_editor::{ImportSession, LifecycleState, TimeOfDay};
//!
//! let text = "INT. WAREHOUSE - NIGHT\nShe enters.\nEXT. STREET - DAY\nHe runs.";
//! let session = ImportSession::new().load_text("heist.fountain", text)?.parse()?;
//!
//! let warehouse = session.scenes()[0].id;
//! let session = session.delete_scene(warehouse)?.commit()?;
//!
//! assert_eq!(session.state(), LifecycleState::Imported);
//! assert_eq!(session.scenes()[0].scene_number, 1);
//! assert_eq!(session.scenes()[0].time_of_day, TimeOfDay::Day);
//! # Ok::<(), slugline_editor::EditorError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]

pub mod commands;
pub mod core;
pub mod formats;
pub mod sessions;

// Re-export slugline-core types as first-class citizens
pub use slugline_core::{
    CoreError, IntExt, IssueCategory, IssueSeverity, ParseIssue, ParsedScene, SceneId,
    Screenplay, ScriptFormat, TimeOfDay,
};

// Public API exports
pub use commands::{BatchCommand, DeleteSceneCommand, EditSceneCommand, SceneCommand};
pub use core::{
    BreakdownEntry, EditDraft, EditorError, Result, SceneBreakdown, SceneList,
};
pub use formats::{
    read_source, read_source_from_reader, FdxImporter, FormatInfo, FountainImporter,
    ImportConfig, ImporterRegistry, LoadedSource, ScriptImporter, SourceFile,
};
pub use sessions::{ImportSession, LifecycleState};

#[cfg(feature = "async")]
pub use formats::read_source_async;
